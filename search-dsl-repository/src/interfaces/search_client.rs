//! Search client trait definition.
//!
//! This module defines the abstract interface the search DSL delegates to,
//! allowing for different backend implementations (OpenSearch, mocks, etc.).

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::config::ClientSettings;
use crate::errors::SearchError;
use crate::interfaces::AdminClient;
use search_dsl_shared::{
    ActionResponse, BulkRequest, ClearScrollRequest, CountRequest, DeleteByQueryRequest,
    DeleteIndexedScriptRequest, DeleteRequest, ExplainRequest, GetIndexedScriptRequest,
    GetRequest, IndexRequest, MoreLikeThisRequest, MultiGetRequest, MultiPercolateRequest,
    MultiSearchRequest, MultiTermVectorRequest, PercolateRequest, PutIndexedScriptRequest,
    SearchRequest, SearchScrollRequest, SuggestRequest, TermVectorRequest, UpdateRequest,
};

/// Handle to the eventual response of one client operation.
///
/// Nothing is sent until the future is polled. Dropping it cancels the
/// operation.
pub type ActionFuture<'a, T> = BoxFuture<'a, Result<T, SearchError>>;

/// Abstract interface for search engine operations.
///
/// One asynchronous method per operation. Each takes its request by value
/// and resolves to the engine's response. Implementations decide which
/// request fields are mandatory and report missing ones as
/// `SearchError::InvalidRequest`.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All operations return `Result<ActionResponse, SearchError>`. Callers of
/// the DSL see these errors unchanged.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// The settings this client was built with.
    fn settings(&self) -> &ClientSettings;

    /// The administrative sub-client (index and cluster management).
    fn admin(&self) -> &dyn AdminClient;

    /// Store a document.
    async fn index(&self, request: IndexRequest) -> Result<ActionResponse, SearchError>;

    /// Execute several index/update/delete operations in one round trip.
    async fn bulk(&self, request: BulkRequest) -> Result<ActionResponse, SearchError>;

    /// Partially update a document.
    async fn update(&self, request: UpdateRequest) -> Result<ActionResponse, SearchError>;

    /// Delete a document.
    async fn delete(&self, request: DeleteRequest) -> Result<ActionResponse, SearchError>;

    /// Delete every document matching a query.
    async fn delete_by_query(
        &self,
        request: DeleteByQueryRequest,
    ) -> Result<ActionResponse, SearchError>;

    /// Fetch a document by id.
    async fn get(&self, request: GetRequest) -> Result<ActionResponse, SearchError>;

    /// Fetch several documents by id.
    async fn multi_get(&self, request: MultiGetRequest) -> Result<ActionResponse, SearchError>;

    /// Compute suggestions.
    async fn suggest(&self, request: SuggestRequest) -> Result<ActionResponse, SearchError>;

    /// Run a search.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut request = SearchRequest::default();
    /// request.indices(["twitter"]).source(json!({"query": {"match_all": {}}}));
    /// let response = client.search(request).await?;
    /// println!("Found {:?} hits", response.get("/hits/total/value"));
    /// ```
    async fn search(&self, request: SearchRequest) -> Result<ActionResponse, SearchError>;

    /// Run several searches in one round trip.
    async fn multi_search(
        &self,
        request: MultiSearchRequest,
    ) -> Result<ActionResponse, SearchError>;

    /// Count matching documents.
    async fn count(&self, request: CountRequest) -> Result<ActionResponse, SearchError>;

    /// Fetch the next page of a scroll.
    async fn search_scroll(
        &self,
        request: SearchScrollRequest,
    ) -> Result<ActionResponse, SearchError>;

    /// Release scroll contexts.
    async fn clear_scroll(&self, request: ClearScrollRequest)
        -> Result<ActionResponse, SearchError>;

    /// Term vectors of one document.
    async fn term_vector(&self, request: TermVectorRequest) -> Result<ActionResponse, SearchError>;

    /// Term vectors of several documents.
    async fn multi_term_vector(
        &self,
        request: MultiTermVectorRequest,
    ) -> Result<ActionResponse, SearchError>;

    /// Match a document against stored queries.
    async fn percolate(&self, request: PercolateRequest) -> Result<ActionResponse, SearchError>;

    /// Several percolations in one round trip.
    async fn multi_percolate(
        &self,
        request: MultiPercolateRequest,
    ) -> Result<ActionResponse, SearchError>;

    /// Explain the score of one document for a query.
    async fn explain(&self, request: ExplainRequest) -> Result<ActionResponse, SearchError>;

    /// Store a script.
    async fn put_indexed_script(
        &self,
        request: PutIndexedScriptRequest,
    ) -> Result<ActionResponse, SearchError>;

    /// Fetch a stored script.
    async fn get_indexed_script(
        &self,
        request: GetIndexedScriptRequest,
    ) -> Result<ActionResponse, SearchError>;

    /// Remove a stored script.
    async fn delete_indexed_script(
        &self,
        request: DeleteIndexedScriptRequest,
    ) -> Result<ActionResponse, SearchError>;

    /// Find documents similar to an existing one.
    async fn more_like_this(
        &self,
        request: MoreLikeThisRequest,
    ) -> Result<ActionResponse, SearchError>;
}
