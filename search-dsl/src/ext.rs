//! Typed configuration closures.

use tracing::debug;

use search_dsl_repository::{ActionFuture, SearchClient};
use search_dsl_shared::{
    ActionRequest, ActionResponse, BulkRequest, ClearScrollRequest, CountRequest,
    DeleteByQueryRequest, DeleteIndexedScriptRequest, DeleteRequest, ExplainRequest,
    GetIndexedScriptRequest, GetRequest, IndexRequest, MoreLikeThisRequest, MultiGetRequest,
    MultiPercolateRequest, MultiSearchRequest, MultiTermVectorRequest, PercolateRequest,
    PutIndexedScriptRequest, SearchRequest, SearchScrollRequest, SuggestRequest,
    TermVectorRequest, UpdateRequest,
};

fn configured<R: ActionRequest>(mut request: R, configure: impl FnOnce(&mut R)) -> R {
    configure(&mut request);
    debug!(operation = R::NAME, "Dispatching configured request");
    request
}

/// Closure-configured operations for every [`SearchClient`].
///
/// Each method builds a fresh request, runs `configure` on it, calls the
/// matching client method once and returns the client's future unchanged.
/// Settings and the admin sub-client are reached through the client itself
/// (`settings()` / `admin()`).
///
/// ```ignore
/// let response = client
///     .get_with(|r| {
///         r.index("twitter").id("1");
///     })
///     .await?;
/// ```
pub trait SearchClientExt: SearchClient {
    fn index_with(
        &self,
        configure: impl FnOnce(&mut IndexRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.index(configured(IndexRequest::default(), configure))
    }

    fn bulk_with(
        &self,
        configure: impl FnOnce(&mut BulkRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.bulk(configured(BulkRequest::default(), configure))
    }

    fn update_with(
        &self,
        configure: impl FnOnce(&mut UpdateRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.update(configured(UpdateRequest::default(), configure))
    }

    fn delete_with(
        &self,
        configure: impl FnOnce(&mut DeleteRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.delete(configured(DeleteRequest::default(), configure))
    }

    fn delete_by_query_with(
        &self,
        configure: impl FnOnce(&mut DeleteByQueryRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.delete_by_query(configured(DeleteByQueryRequest::default(), configure))
    }

    fn get_with(
        &self,
        configure: impl FnOnce(&mut GetRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.get(configured(GetRequest::default(), configure))
    }

    fn multi_get_with(
        &self,
        configure: impl FnOnce(&mut MultiGetRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.multi_get(configured(MultiGetRequest::default(), configure))
    }

    fn suggest_with(
        &self,
        configure: impl FnOnce(&mut SuggestRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.suggest(configured(SuggestRequest::default(), configure))
    }

    fn search_with(
        &self,
        configure: impl FnOnce(&mut SearchRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.search(configured(SearchRequest::default(), configure))
    }

    fn multi_search_with(
        &self,
        configure: impl FnOnce(&mut MultiSearchRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.multi_search(configured(MultiSearchRequest::default(), configure))
    }

    fn count_with(
        &self,
        configure: impl FnOnce(&mut CountRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.count(configured(CountRequest::default(), configure))
    }

    fn search_scroll_with(
        &self,
        configure: impl FnOnce(&mut SearchScrollRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.search_scroll(configured(SearchScrollRequest::default(), configure))
    }

    fn clear_scroll_with(
        &self,
        configure: impl FnOnce(&mut ClearScrollRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.clear_scroll(configured(ClearScrollRequest::default(), configure))
    }

    fn term_vector_with(
        &self,
        configure: impl FnOnce(&mut TermVectorRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.term_vector(configured(TermVectorRequest::default(), configure))
    }

    fn multi_term_vector_with(
        &self,
        configure: impl FnOnce(&mut MultiTermVectorRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.multi_term_vector(configured(MultiTermVectorRequest::default(), configure))
    }

    fn percolate_with(
        &self,
        configure: impl FnOnce(&mut PercolateRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.percolate(configured(PercolateRequest::default(), configure))
    }

    fn multi_percolate_with(
        &self,
        configure: impl FnOnce(&mut MultiPercolateRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.multi_percolate(configured(MultiPercolateRequest::default(), configure))
    }

    fn explain_with(
        &self,
        configure: impl FnOnce(&mut ExplainRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.explain(configured(ExplainRequest::default(), configure))
    }

    fn put_indexed_script_with(
        &self,
        configure: impl FnOnce(&mut PutIndexedScriptRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.put_indexed_script(configured(PutIndexedScriptRequest::default(), configure))
    }

    fn get_indexed_script_with(
        &self,
        configure: impl FnOnce(&mut GetIndexedScriptRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.get_indexed_script(configured(GetIndexedScriptRequest::default(), configure))
    }

    fn delete_indexed_script_with(
        &self,
        configure: impl FnOnce(&mut DeleteIndexedScriptRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.delete_indexed_script(configured(DeleteIndexedScriptRequest::default(), configure))
    }

    /// Find documents similar to one stored in `index`.
    ///
    /// `index` is bound before `configure` runs; the closure may still
    /// override it.
    fn more_like_this_with(
        &self,
        index: impl Into<String>,
        configure: impl FnOnce(&mut MoreLikeThisRequest),
    ) -> ActionFuture<'_, ActionResponse> {
        self.more_like_this(configured(MoreLikeThisRequest::new(index), configure))
    }
}

impl<C: SearchClient + ?Sized> SearchClientExt for C {}
