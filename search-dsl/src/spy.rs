//! Recording client used by the DSL tests.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use search_dsl_repository::{AdminClient, ClientSettings, SearchClient, SearchError};
use search_dsl_shared::{
    ActionRequest, ActionResponse, BulkRequest, ClearScrollRequest, CountRequest,
    DeleteByQueryRequest, DeleteIndexedScriptRequest, DeleteRequest, ExplainRequest,
    GetIndexedScriptRequest, GetRequest, IndexRequest, MoreLikeThisRequest, MultiGetRequest,
    MultiPercolateRequest, MultiSearchRequest, MultiTermVectorRequest, PercolateRequest,
    PutIndexedScriptRequest, SearchRequest, SearchScrollRequest, SuggestRequest,
    TermVectorRequest, UpdateRequest,
};

#[derive(Debug, Clone)]
pub struct SpyCall {
    pub operation: &'static str,
    pub request: Value,
}

/// Records every request it receives and answers with a canned response.
pub struct SpyClient {
    calls: Arc<Mutex<Vec<SpyCall>>>,
    should_fail: bool,
    settings: ClientSettings,
    admin: SpyAdmin,
}

impl SpyClient {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            should_fail: false,
            settings: ClientSettings::new("http://spy:9200"),
            admin: SpyAdmin::default(),
        }
    }

    /// A client whose every operation fails with `SearchError::RequestError`.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    pub async fn calls(&self) -> Vec<SpyCall> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    /// The only recorded request, which must belong to `operation`.
    pub async fn single_request<R: ActionRequest>(&self, operation: &str) -> R {
        let calls = self.calls().await;
        assert_eq!(calls.len(), 1, "expected exactly one call, got {:?}", calls);
        assert_eq!(calls[0].operation, operation);
        serde_json::from_value(calls[0].request.clone()).unwrap()
    }

    async fn record<R: ActionRequest>(&self, request: R) -> Result<ActionResponse, SearchError> {
        let request = serde_json::to_value(&request).unwrap();
        self.calls.lock().await.push(SpyCall {
            operation: R::NAME,
            request,
        });

        if self.should_fail {
            return Err(SearchError::request("spy failure"));
        }
        Ok(ActionResponse::new(200, json!({"acknowledged": true, "operation": R::NAME})))
    }
}

#[async_trait]
impl SearchClient for SpyClient {
    fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn admin(&self) -> &dyn AdminClient {
        &self.admin
    }

    async fn index(&self, request: IndexRequest) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }

    async fn bulk(&self, request: BulkRequest) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }

    async fn update(&self, request: UpdateRequest) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }

    async fn delete(&self, request: DeleteRequest) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }

    async fn delete_by_query(
        &self,
        request: DeleteByQueryRequest,
    ) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }

    async fn get(&self, request: GetRequest) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }

    async fn multi_get(&self, request: MultiGetRequest) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }

    async fn suggest(&self, request: SuggestRequest) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }

    async fn search(&self, request: SearchRequest) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }

    async fn multi_search(
        &self,
        request: MultiSearchRequest,
    ) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }

    async fn count(&self, request: CountRequest) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }

    async fn search_scroll(
        &self,
        request: SearchScrollRequest,
    ) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }

    async fn clear_scroll(
        &self,
        request: ClearScrollRequest,
    ) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }

    async fn term_vector(&self, request: TermVectorRequest) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }

    async fn multi_term_vector(
        &self,
        request: MultiTermVectorRequest,
    ) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }

    async fn percolate(&self, request: PercolateRequest) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }

    async fn multi_percolate(
        &self,
        request: MultiPercolateRequest,
    ) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }

    async fn explain(&self, request: ExplainRequest) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }

    async fn put_indexed_script(
        &self,
        request: PutIndexedScriptRequest,
    ) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }

    async fn get_indexed_script(
        &self,
        request: GetIndexedScriptRequest,
    ) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }

    async fn delete_indexed_script(
        &self,
        request: DeleteIndexedScriptRequest,
    ) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }

    async fn more_like_this(
        &self,
        request: MoreLikeThisRequest,
    ) -> Result<ActionResponse, SearchError> {
        self.record(request).await
    }
}

/// Admin sub-client that knows a fixed set of indices.
#[derive(Default)]
pub struct SpyAdmin {
    indices: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl AdminClient for SpyAdmin {
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        Ok(self.indices.lock().await.iter().any(|i| i == index))
    }

    async fn create_index(&self, index: &str, body: Value) -> Result<ActionResponse, SearchError> {
        self.indices.lock().await.push(index.to_string());
        Ok(ActionResponse::new(200, json!({"acknowledged": true, "index": index, "body": body})))
    }

    async fn delete_index(&self, index: &str) -> Result<ActionResponse, SearchError> {
        let mut indices = self.indices.lock().await;
        let before = indices.len();
        indices.retain(|i| i != index);
        let status = if indices.len() < before { 200 } else { 404 };
        Ok(ActionResponse::new(status, json!({"acknowledged": status == 200})))
    }

    async fn refresh(&self, indices: &[&str]) -> Result<ActionResponse, SearchError> {
        Ok(ActionResponse::new(200, json!({"refreshed": indices})))
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        Ok(true)
    }
}
