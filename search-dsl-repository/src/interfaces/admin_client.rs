//! Administrative sub-client trait definition.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;
use search_dsl_shared::ActionResponse;

/// Index and cluster management operations.
///
/// Reached through `SearchClient::admin`; the DSL exposes it unchanged.
#[async_trait]
pub trait AdminClient: Send + Sync {
    /// Check whether an index exists.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the index exists
    /// * `Ok(false)` - If it does not
    /// * `Err(SearchError)` - If the check could not be executed
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError>;

    /// Create an index with the given settings and mappings body.
    async fn create_index(&self, index: &str, body: Value) -> Result<ActionResponse, SearchError>;

    /// Delete an index.
    async fn delete_index(&self, index: &str) -> Result<ActionResponse, SearchError>;

    /// Refresh indices so recent writes become searchable. An empty slice
    /// refreshes every index.
    async fn refresh(&self, indices: &[&str]) -> Result<ActionResponse, SearchError>;

    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the cluster status is green or yellow
    /// * `Ok(false)` - If the cluster status is red or unknown
    /// * `Err(SearchError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchError>;
}
