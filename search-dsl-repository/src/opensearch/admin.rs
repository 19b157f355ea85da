//! OpenSearch implementation of the administrative sub-client.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts, IndicesRefreshParts},
    OpenSearch,
};
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::errors::SearchError;
use crate::interfaces::AdminClient;
use crate::opensearch::client::into_action_response;
use search_dsl_shared::ActionResponse;

/// Index and cluster management over an `OpenSearch` handle.
///
/// Shares the transport of the `OpenSearchClient` that owns it.
#[derive(Clone)]
pub struct OpenSearchAdmin {
    client: OpenSearch,
}

impl OpenSearchAdmin {
    pub(crate) fn new(client: OpenSearch) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AdminClient for OpenSearchAdmin {
    #[instrument(skip(self))]
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchError::request(e.to_string()))?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            status => Err(SearchError::response(status, "unexpected status for index exists")),
        }
    }

    #[instrument(skip(self, body))]
    async fn create_index(&self, index: &str, body: Value) -> Result<ActionResponse, SearchError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::request(e.to_string()))?;

        let response = into_action_response(response).await?;
        info!(index = %index, "Created index");
        Ok(response)
    }

    #[instrument(skip(self))]
    async fn delete_index(&self, index: &str) -> Result<ActionResponse, SearchError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchError::request(e.to_string()))?;

        into_action_response(response).await
    }

    #[instrument(skip(self))]
    async fn refresh(&self, indices: &[&str]) -> Result<ActionResponse, SearchError> {
        let parts = if indices.is_empty() {
            IndicesRefreshParts::None
        } else {
            IndicesRefreshParts::Index(indices)
        };

        let response = self
            .client
            .indices()
            .refresh(parts)
            .send()
            .await
            .map_err(|e| SearchError::request(e.to_string()))?;

        into_action_response(response).await
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let health = into_action_response(response).await?;
        let status = health
            .get("/status")
            .and_then(Value::as_str)
            .unwrap_or("unknown");

        if status == "green" || status == "yellow" {
            info!(status = %status, "Cluster is healthy");
            Ok(true)
        } else {
            error!(status = %status, "Cluster is unhealthy");
            Ok(false)
        }
    }
}
