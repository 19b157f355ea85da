//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchClient`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    http::{
        headers::HeaderMap,
        request::{JsonBody, NdBody},
        response::Response,
        transport::{SingleNodeConnectionPool, TransportBuilder},
        Method,
    },
    OpenSearch,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::config::ClientSettings;
use crate::errors::SearchError;
use crate::interfaces::{AdminClient, SearchClient};
use crate::opensearch::admin::OpenSearchAdmin;
use crate::opensearch::routes::{self, HttpMethod, Route, RouteBody};
use search_dsl_shared::{
    ActionResponse, BulkRequest, ClearScrollRequest, CountRequest, DeleteByQueryRequest,
    DeleteIndexedScriptRequest, DeleteRequest, ExplainRequest, GetIndexedScriptRequest,
    GetRequest, IndexRequest, MoreLikeThisRequest, MultiGetRequest, MultiPercolateRequest,
    MultiSearchRequest, MultiTermVectorRequest, PercolateRequest, PutIndexedScriptRequest,
    SearchRequest, SearchScrollRequest, SuggestRequest, TermVectorRequest, UpdateRequest,
};

/// OpenSearch client implementation.
///
/// Every operation is translated into an HTTP route and sent through the
/// underlying `OpenSearch` transport.
///
/// # Example
///
/// ```ignore
/// use search_dsl_repository::{ClientSettings, OpenSearchClient, SearchClient};
/// let client = OpenSearchClient::new(ClientSettings::new("http://localhost:9200"))?;
///
/// let mut request = IndexRequest::default();
/// request.index("twitter").id("1").source(json!({"user": "kimchy"}));
/// client.index(request).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    settings: ClientSettings,
    admin: OpenSearchAdmin,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client for the configured URL.
    ///
    /// No connection is opened until the first request.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If the URL is invalid or transport setup fails
    pub fn new(settings: ClientSettings) -> Result<Self, SearchError> {
        let parsed_url =
            Url::parse(&settings.url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool);
        if settings.disable_proxy {
            builder = builder.disable_proxy();
        }
        let transport = builder
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %settings.url,
            timeout = ?settings.request_timeout,
            "Created OpenSearch client"
        );

        Ok(Self {
            admin: OpenSearchAdmin::new(client.clone()),
            client,
            settings,
        })
    }

    /// Send a route and collect the response.
    #[instrument(skip(self, route), fields(method = ?route.method, path = %route.path))]
    async fn execute(&self, route: Route) -> Result<ActionResponse, SearchError> {
        let method = match route.method {
            HttpMethod::Get => Method::Get,
            HttpMethod::Put => Method::Put,
            HttpMethod::Post => Method::Post,
            HttpMethod::Delete => Method::Delete,
        };
        let query = Some(&route.params);
        let timeout = self.settings.request_timeout;

        let result = match route.body {
            RouteBody::Empty => {
                self.client
                    .send::<JsonBody<Value>, _>(
                        method,
                        &route.path,
                        HeaderMap::new(),
                        query,
                        None,
                        timeout,
                    )
                    .await
            }
            RouteBody::Json(body) => {
                self.client
                    .send(
                        method,
                        &route.path,
                        HeaderMap::new(),
                        query,
                        Some(JsonBody::new(body)),
                        timeout,
                    )
                    .await
            }
            RouteBody::NdJson(lines) => {
                let body = NdBody::new(lines.into_iter().map(JsonBody::new).collect());
                self.client
                    .send(method, &route.path, HeaderMap::new(), query, Some(body), timeout)
                    .await
            }
        };

        let response = result.map_err(|e| SearchError::request(e.to_string()))?;
        into_action_response(response).await
    }
}

/// Convert a transport response into an `ActionResponse`.
///
/// 2xx and 404 resolve normally (a missing document is an answer, not a
/// failure); any other status becomes `SearchError::ResponseError`.
pub(crate) async fn into_action_response(
    response: Response,
) -> Result<ActionResponse, SearchError> {
    let status = response.status_code().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| SearchError::request(e.to_string()))?;

    if !(200..300).contains(&status) && status != 404 {
        error!(status = status, body = %text, "Request failed");
        return Err(SearchError::response(status, text));
    }

    let body = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).map_err(|e| SearchError::parse(e.to_string()))?
    };

    debug!(status = status, "Request completed");
    Ok(ActionResponse::new(status, body))
}

#[async_trait]
impl SearchClient for OpenSearchClient {
    fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn admin(&self) -> &dyn AdminClient {
        &self.admin
    }

    async fn index(&self, request: IndexRequest) -> Result<ActionResponse, SearchError> {
        self.execute(routes::index(&request)?).await
    }

    async fn bulk(&self, request: BulkRequest) -> Result<ActionResponse, SearchError> {
        self.execute(routes::bulk(&request)?).await
    }

    async fn update(&self, request: UpdateRequest) -> Result<ActionResponse, SearchError> {
        self.execute(routes::update(&request)?).await
    }

    async fn delete(&self, request: DeleteRequest) -> Result<ActionResponse, SearchError> {
        self.execute(routes::delete(&request)?).await
    }

    async fn delete_by_query(
        &self,
        request: DeleteByQueryRequest,
    ) -> Result<ActionResponse, SearchError> {
        self.execute(routes::delete_by_query(&request)?).await
    }

    async fn get(&self, request: GetRequest) -> Result<ActionResponse, SearchError> {
        self.execute(routes::get(&request)?).await
    }

    async fn multi_get(&self, request: MultiGetRequest) -> Result<ActionResponse, SearchError> {
        self.execute(routes::multi_get(&request)?).await
    }

    async fn suggest(&self, request: SuggestRequest) -> Result<ActionResponse, SearchError> {
        self.execute(routes::suggest(&request)?).await
    }

    async fn search(&self, request: SearchRequest) -> Result<ActionResponse, SearchError> {
        self.execute(routes::search(&request)?).await
    }

    async fn multi_search(
        &self,
        request: MultiSearchRequest,
    ) -> Result<ActionResponse, SearchError> {
        self.execute(routes::multi_search(&request)?).await
    }

    async fn count(&self, request: CountRequest) -> Result<ActionResponse, SearchError> {
        self.execute(routes::count(&request)?).await
    }

    async fn search_scroll(
        &self,
        request: SearchScrollRequest,
    ) -> Result<ActionResponse, SearchError> {
        self.execute(routes::search_scroll(&request)?).await
    }

    async fn clear_scroll(
        &self,
        request: ClearScrollRequest,
    ) -> Result<ActionResponse, SearchError> {
        self.execute(routes::clear_scroll(&request)?).await
    }

    async fn term_vector(&self, request: TermVectorRequest) -> Result<ActionResponse, SearchError> {
        self.execute(routes::term_vector(&request)?).await
    }

    async fn multi_term_vector(
        &self,
        request: MultiTermVectorRequest,
    ) -> Result<ActionResponse, SearchError> {
        self.execute(routes::multi_term_vector(&request)?).await
    }

    async fn percolate(&self, request: PercolateRequest) -> Result<ActionResponse, SearchError> {
        self.execute(routes::percolate(&request)?).await
    }

    async fn multi_percolate(
        &self,
        request: MultiPercolateRequest,
    ) -> Result<ActionResponse, SearchError> {
        self.execute(routes::multi_percolate(&request)?).await
    }

    async fn explain(&self, request: ExplainRequest) -> Result<ActionResponse, SearchError> {
        self.execute(routes::explain(&request)?).await
    }

    async fn put_indexed_script(
        &self,
        request: PutIndexedScriptRequest,
    ) -> Result<ActionResponse, SearchError> {
        self.execute(routes::put_indexed_script(&request)?).await
    }

    async fn get_indexed_script(
        &self,
        request: GetIndexedScriptRequest,
    ) -> Result<ActionResponse, SearchError> {
        self.execute(routes::get_indexed_script(&request)?).await
    }

    async fn delete_indexed_script(
        &self,
        request: DeleteIndexedScriptRequest,
    ) -> Result<ActionResponse, SearchError> {
        self.execute(routes::delete_indexed_script(&request)?).await
    }

    async fn more_like_this(
        &self,
        request: MoreLikeThisRequest,
    ) -> Result<ActionResponse, SearchError> {
        self.execute(routes::more_like_this(&request)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_url() {
        let result = OpenSearchClient::new(ClientSettings::new("not a url"));
        assert!(matches!(result, Err(SearchError::ConnectionError(_))));
    }

    #[test]
    fn test_settings_passthrough() {
        let settings = ClientSettings::new("http://localhost:9200");
        let client = OpenSearchClient::new(settings.clone()).unwrap();

        assert_eq!(client.settings(), &settings);
    }

    #[tokio::test]
    async fn test_invalid_request_fails_before_sending() {
        // Nothing listens on this port; a request that reached the transport
        // would fail with RequestError instead.
        let client = OpenSearchClient::new(ClientSettings::new("http://127.0.0.1:1")).unwrap();

        let result = client.index(IndexRequest::default()).await;

        assert!(matches!(result, Err(SearchError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_request_error() {
        let client = OpenSearchClient::new(ClientSettings::new("http://127.0.0.1:1")).unwrap();

        let mut request = GetRequest::default();
        request.index("idx").id("1");
        let result = client.get(request).await;

        assert!(matches!(result, Err(SearchError::RequestError(_))));
    }
}
