//! Dynamic operation dispatch.
//!
//! `execute` runs any operation from a JSON configuration block. It checks
//! its arguments before building anything, applies the block to a fresh
//! request, and only then calls the client.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use tracing::debug;

use crate::block::{apply_block, JsonBlock};
use crate::errors::DslError;
use search_dsl_repository::{ActionFuture, SearchClient};
use search_dsl_shared::{
    ActionRequest, ActionResponse, BulkRequest, ClearScrollRequest, CountRequest,
    DeleteByQueryRequest, DeleteIndexedScriptRequest, DeleteRequest, ExplainRequest,
    GetIndexedScriptRequest, GetRequest, IndexRequest, MoreLikeThisRequest, MultiGetRequest,
    MultiPercolateRequest, MultiSearchRequest, MultiTermVectorRequest, PercolateRequest,
    PutIndexedScriptRequest, SearchRequest, SearchScrollRequest, SuggestRequest,
    TermVectorRequest, UpdateRequest,
};

/// A client operation the DSL can dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Index,
    Bulk,
    Update,
    Delete,
    DeleteByQuery,
    Get,
    MultiGet,
    Suggest,
    Search,
    MultiSearch,
    Count,
    SearchScroll,
    ClearScroll,
    TermVector,
    MultiTermVector,
    Percolate,
    MultiPercolate,
    Explain,
    PutIndexedScript,
    GetIndexedScript,
    DeleteIndexedScript,
    /// Find documents similar to one in `index`.
    MoreLikeThis { index: String },
}

impl Operation {
    /// Operation name, matching the request type's `ActionRequest::NAME`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Index => IndexRequest::NAME,
            Self::Bulk => BulkRequest::NAME,
            Self::Update => UpdateRequest::NAME,
            Self::Delete => DeleteRequest::NAME,
            Self::DeleteByQuery => DeleteByQueryRequest::NAME,
            Self::Get => GetRequest::NAME,
            Self::MultiGet => MultiGetRequest::NAME,
            Self::Suggest => SuggestRequest::NAME,
            Self::Search => SearchRequest::NAME,
            Self::MultiSearch => MultiSearchRequest::NAME,
            Self::Count => CountRequest::NAME,
            Self::SearchScroll => SearchScrollRequest::NAME,
            Self::ClearScroll => ClearScrollRequest::NAME,
            Self::TermVector => TermVectorRequest::NAME,
            Self::MultiTermVector => MultiTermVectorRequest::NAME,
            Self::Percolate => PercolateRequest::NAME,
            Self::MultiPercolate => MultiPercolateRequest::NAME,
            Self::Explain => ExplainRequest::NAME,
            Self::PutIndexedScript => PutIndexedScriptRequest::NAME,
            Self::GetIndexedScript => GetIndexedScriptRequest::NAME,
            Self::DeleteIndexedScript => DeleteIndexedScriptRequest::NAME,
            Self::MoreLikeThis { .. } => MoreLikeThisRequest::NAME,
        }
    }

    /// Resolve an operation by name. Dashes and underscores are
    /// interchangeable; `more_like_this` (alias `find_similar`) needs `index`.
    pub fn parse(name: &str, index: Option<&str>) -> Result<Self, DslError> {
        let operation = match name.trim().replace('-', "_").as_str() {
            "index" => Self::Index,
            "bulk" => Self::Bulk,
            "update" => Self::Update,
            "delete" => Self::Delete,
            "delete_by_query" => Self::DeleteByQuery,
            "get" => Self::Get,
            "multi_get" | "mget" => Self::MultiGet,
            "suggest" => Self::Suggest,
            "search" => Self::Search,
            "multi_search" | "msearch" => Self::MultiSearch,
            "count" => Self::Count,
            "search_scroll" | "scroll" => Self::SearchScroll,
            "clear_scroll" => Self::ClearScroll,
            "term_vector" | "termvectors" => Self::TermVector,
            "multi_term_vector" | "mtermvectors" => Self::MultiTermVector,
            "percolate" => Self::Percolate,
            "multi_percolate" => Self::MultiPercolate,
            "explain" => Self::Explain,
            "put_indexed_script" => Self::PutIndexedScript,
            "get_indexed_script" => Self::GetIndexedScript,
            "delete_indexed_script" => Self::DeleteIndexedScript,
            "more_like_this" | "find_similar" => {
                let index = index.filter(|i| !i.is_empty()).ok_or_else(|| {
                    DslError::invalid_argument("more_like_this requires an index")
                })?;
                Self::MoreLikeThis {
                    index: index.to_string(),
                }
            }
            other => {
                return Err(DslError::invalid_argument(format!(
                    "unknown operation `{}`",
                    other
                )))
            }
        };
        Ok(operation)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoreLikeThis { index } => write!(f, "{}[{}]", self.name(), index),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for Operation {
    type Err = DslError;

    /// Parse an operation that needs no literal parameter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, None)
    }
}

/// Configure a request from `block` and hand it to `call`.
///
/// The block is applied completely before `call` runs, so a block that does
/// not fit the request never reaches the client.
fn dispatch<'a, R: ActionRequest>(
    mut request: R,
    block: &Map<String, Value>,
    call: impl FnOnce(R) -> ActionFuture<'a, ActionResponse>,
) -> Result<ActionFuture<'a, ActionResponse>, DslError> {
    apply_block(&mut request, block)?;
    debug!(operation = R::NAME, fields = block.len(), "Dispatching configured request");
    Ok(call(request))
}

/// Run `operation` against `client`, configured by a JSON block.
///
/// # Arguments
///
/// * `client` - The client handle to delegate to
/// * `operation` - Which client operation to call
/// * `block` - JSON object whose keys name fields of the operation's request
///
/// # Returns
///
/// * `Ok(ActionFuture)` - The client's future, returned unchanged
/// * `Err(DslError::InvalidArgument)` - If the client or block is absent
///   (checked in that order, before any request is built)
/// * `Err(DslError::Configuration)` - If the block does not fit the request;
///   the client is not called
///
/// # Example
///
/// ```ignore
/// let block = json!({"index": "idx", "id": "1", "source": {"name": "kimchy"}});
/// let response = execute(Some(&client), Operation::Index, JsonBlock::new(&block))?.await?;
/// ```
pub fn execute<'a>(
    client: Option<&'a dyn SearchClient>,
    operation: Operation,
    block: JsonBlock<'_>,
) -> Result<ActionFuture<'a, ActionResponse>, DslError> {
    let client =
        client.ok_or_else(|| DslError::invalid_argument("client handle must not be absent"))?;
    let block = block.fields()?;

    match operation {
        Operation::Index => dispatch(IndexRequest::default(), block, |r| client.index(r)),
        Operation::Bulk => dispatch(BulkRequest::default(), block, |r| client.bulk(r)),
        Operation::Update => dispatch(UpdateRequest::default(), block, |r| client.update(r)),
        Operation::Delete => dispatch(DeleteRequest::default(), block, |r| client.delete(r)),
        Operation::DeleteByQuery => {
            dispatch(DeleteByQueryRequest::default(), block, |r| client.delete_by_query(r))
        }
        Operation::Get => dispatch(GetRequest::default(), block, |r| client.get(r)),
        Operation::MultiGet => dispatch(MultiGetRequest::default(), block, |r| client.multi_get(r)),
        Operation::Suggest => dispatch(SuggestRequest::default(), block, |r| client.suggest(r)),
        Operation::Search => dispatch(SearchRequest::default(), block, |r| client.search(r)),
        Operation::MultiSearch => {
            dispatch(MultiSearchRequest::default(), block, |r| client.multi_search(r))
        }
        Operation::Count => dispatch(CountRequest::default(), block, |r| client.count(r)),
        Operation::SearchScroll => {
            dispatch(SearchScrollRequest::default(), block, |r| client.search_scroll(r))
        }
        Operation::ClearScroll => {
            dispatch(ClearScrollRequest::default(), block, |r| client.clear_scroll(r))
        }
        Operation::TermVector => {
            dispatch(TermVectorRequest::default(), block, |r| client.term_vector(r))
        }
        Operation::MultiTermVector => {
            dispatch(MultiTermVectorRequest::default(), block, |r| client.multi_term_vector(r))
        }
        Operation::Percolate => {
            dispatch(PercolateRequest::default(), block, |r| client.percolate(r))
        }
        Operation::MultiPercolate => {
            dispatch(MultiPercolateRequest::default(), block, |r| client.multi_percolate(r))
        }
        Operation::Explain => dispatch(ExplainRequest::default(), block, |r| client.explain(r)),
        Operation::PutIndexedScript => {
            dispatch(PutIndexedScriptRequest::default(), block, |r| client.put_indexed_script(r))
        }
        Operation::GetIndexedScript => {
            dispatch(GetIndexedScriptRequest::default(), block, |r| client.get_indexed_script(r))
        }
        Operation::DeleteIndexedScript => {
            dispatch(DeleteIndexedScriptRequest::default(), block, |r| {
                client.delete_indexed_script(r)
            })
        }
        Operation::MoreLikeThis { index } => {
            dispatch(MoreLikeThisRequest::new(index), block, |r| client.more_like_this(r))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigError;
    use crate::spy::SpyClient;
    use search_dsl_repository::SearchError;
    use serde_json::json;

    fn all_operations() -> Vec<Operation> {
        vec![
            Operation::Index,
            Operation::Bulk,
            Operation::Update,
            Operation::Delete,
            Operation::DeleteByQuery,
            Operation::Get,
            Operation::MultiGet,
            Operation::Suggest,
            Operation::Search,
            Operation::MultiSearch,
            Operation::Count,
            Operation::SearchScroll,
            Operation::ClearScroll,
            Operation::TermVector,
            Operation::MultiTermVector,
            Operation::Percolate,
            Operation::MultiPercolate,
            Operation::Explain,
            Operation::PutIndexedScript,
            Operation::GetIndexedScript,
            Operation::DeleteIndexedScript,
            Operation::MoreLikeThis {
                index: "articles".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn test_absent_client_rejected_for_every_operation() {
        let block = json!({});

        for operation in all_operations() {
            let name = operation.name();
            let result = execute(None, operation, JsonBlock::new(&block));

            assert!(
                matches!(result, Err(DslError::InvalidArgument(_))),
                "{} accepted an absent client",
                name
            );
        }
    }

    #[tokio::test]
    async fn test_absent_client_checked_before_block() {
        let result = execute(None, Operation::Index, JsonBlock::absent());

        match result {
            Err(DslError::InvalidArgument(msg)) => assert!(msg.contains("client")),
            _ => panic!("expected invalid argument"),
        }
    }

    #[tokio::test]
    async fn test_absent_block_rejected_for_every_operation() {
        let spy = SpyClient::new();

        for operation in all_operations() {
            let name = operation.name();
            let absent = execute(Some(&spy), operation.clone(), JsonBlock::absent());
            let null = execute(Some(&spy), operation, JsonBlock::new(&Value::Null));

            assert!(matches!(absent, Err(DslError::InvalidArgument(_))), "{}", name);
            assert!(matches!(null, Err(DslError::InvalidArgument(_))), "{}", name);
        }

        assert_eq!(spy.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_each_operation_calls_matching_method_once() {
        for operation in all_operations() {
            let spy = SpyClient::new();
            let name = operation.name();

            let response = execute(Some(&spy), operation, JsonBlock::new(&json!({})))
                .unwrap()
                .await
                .unwrap();

            assert!(response.is_success());
            let calls = spy.calls().await;
            assert_eq!(calls.len(), 1, "{}", name);
            assert_eq!(calls[0].operation, name);
        }
    }

    #[tokio::test]
    async fn test_index_block_fields_reach_client() {
        let spy = SpyClient::new();
        let block = json!({
            "index": "idx",
            "type": "t",
            "id": "1",
            "source": {"name": "kimchy", "nested": {"other": 1.23}}
        });

        execute(Some(&spy), Operation::Index, JsonBlock::new(&block))
            .unwrap()
            .await
            .unwrap();

        let request: IndexRequest = spy.single_request("index").await;
        assert_eq!(request.index.as_deref(), Some("idx"));
        assert_eq!(request.doc_type.as_deref(), Some("t"));
        assert_eq!(request.id.as_deref(), Some("1"));
        assert_eq!(
            request.source,
            Some(json!({"name": "kimchy", "nested": {"other": 1.23}}))
        );
    }

    /// Assert every value in `expected` appears at the same place in
    /// `actual`. Unset request fields serialize as `null` and are ignored.
    fn assert_subset(actual: &Value, expected: &Value, path: &str) {
        match (actual, expected) {
            (Value::Object(actual), Value::Object(expected)) => {
                for (key, value) in expected {
                    let field = actual
                        .get(key)
                        .unwrap_or_else(|| panic!("{}.{} missing", path, key));
                    assert_subset(field, value, &format!("{}.{}", path, key));
                }
            }
            (Value::Array(actual), Value::Array(expected)) => {
                assert_eq!(actual.len(), expected.len(), "{} length", path);
                for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
                    assert_subset(a, e, &format!("{}[{}]", path, i));
                }
            }
            _ => assert_eq!(actual, expected, "{}", path),
        }
    }

    fn populated_blocks() -> Vec<(Operation, Value)> {
        vec![
            (
                Operation::Index,
                json!({"index": "idx", "id": "1", "version": 3, "source": {"a": [1, 2]}}),
            ),
            (
                Operation::Bulk,
                json!({
                    "requests": [
                        {"index": {"index": "idx", "id": "1", "source": {"a": 1}}},
                        {"update": {"index": "idx", "id": "2", "doc": {"b": 2}}},
                        {"delete": {"index": "idx", "id": "3"}}
                    ],
                    "refresh": true
                }),
            ),
            (
                Operation::Update,
                json!({"index": "idx", "id": "1", "doc": {"b": 2}, "retry_on_conflict": 2}),
            ),
            (Operation::Delete, json!({"index": "idx", "type": "t", "id": "1", "version": 4})),
            (
                Operation::DeleteByQuery,
                json!({"indices": ["idx"], "source": {"query": {"term": {"a": 1}}}}),
            ),
            (Operation::Get, json!({"index": "idx", "id": "1", "fields": ["name"]})),
            (
                Operation::MultiGet,
                json!({
                    "items": [
                        {"index": "idx", "id": "1"},
                        {"index": "other", "type": "t", "id": "2", "fields": ["name"]}
                    ],
                    "preference": "_local"
                }),
            ),
            (
                Operation::Suggest,
                json!({"indices": ["idx"], "source": {"s": {"text": "kimchy"}}}),
            ),
            (
                Operation::Search,
                json!({
                    "indices": ["a", "b"],
                    "types": ["t"],
                    "scroll": "1m",
                    "source": {"query": {"match_all": {}}}
                }),
            ),
            (
                Operation::MultiSearch,
                json!({
                    "requests": [
                        {"indices": ["a"], "source": {"size": 1}},
                        {"preference": "_local"}
                    ]
                }),
            ),
            (Operation::Count, json!({"indices": ["idx"], "min_score": 0.5})),
            (Operation::SearchScroll, json!({"scroll_id": "abc", "scroll": "1m"})),
            (Operation::ClearScroll, json!({"scroll_ids": ["abc", "def"]})),
            (
                Operation::TermVector,
                json!({"index": "idx", "id": "1", "fields": ["text"], "term_statistics": true}),
            ),
            (
                Operation::MultiTermVector,
                json!({"requests": [{"index": "idx", "id": "1"}, {"index": "idx", "id": "2"}]}),
            ),
            (
                Operation::Percolate,
                json!({"indices": ["q"], "type": "tweet", "source": {"doc": {"m": "hi"}}}),
            ),
            (
                Operation::MultiPercolate,
                json!({
                    "requests": [
                        {"indices": ["q"], "source": {"doc": {"m": "hi"}}},
                        {"indices": ["q"], "only_count": true, "source": {"doc": {"m": "yo"}}}
                    ]
                }),
            ),
            (
                Operation::Explain,
                json!({"index": "idx", "id": "1", "source": {"query": {"match_all": {}}}}),
            ),
            (
                Operation::PutIndexedScript,
                json!({"lang": "painless", "id": "s1", "source": {"script": "1 + 1"}}),
            ),
            (Operation::GetIndexedScript, json!({"lang": "painless", "id": "s1"})),
            (Operation::DeleteIndexedScript, json!({"lang": "painless", "id": "s1"})),
            (
                Operation::MoreLikeThis {
                    index: "articles".to_string(),
                },
                json!({"id": "7", "fields": ["title"], "min_term_freq": 1}),
            ),
        ]
    }

    #[tokio::test]
    async fn test_populated_block_reaches_client_for_every_operation() {
        let blocks = populated_blocks();
        assert_eq!(blocks.len(), all_operations().len());

        for (operation, block) in blocks {
            let spy = SpyClient::new();
            let name = operation.name();

            execute(Some(&spy), operation, JsonBlock::new(&block))
                .unwrap()
                .await
                .unwrap();

            let calls = spy.calls().await;
            assert_eq!(calls.len(), 1, "{}", name);
            assert_eq!(calls[0].operation, name);
            assert_subset(&calls[0].request, &block, name);
        }
    }

    #[tokio::test]
    async fn test_unknown_field_never_reaches_client() {
        let spy = SpyClient::new();
        let block = json!({"index": "idx", "undefined_field": true});

        let result = execute(Some(&spy), Operation::Index, JsonBlock::new(&block));

        match result {
            Err(DslError::Configuration(err)) => {
                assert_eq!(err, ConfigError::unknown_field("index", "undefined_field"))
            }
            _ => panic!("expected configuration error"),
        }
        assert_eq!(spy.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_more_like_this_binds_literal_index() {
        let spy = SpyClient::new();
        let block = json!({"id": "7", "fields": ["title"]});
        let operation = Operation::MoreLikeThis {
            index: "articles".to_string(),
        };

        execute(Some(&spy), operation, JsonBlock::new(&block))
            .unwrap()
            .await
            .unwrap();

        let request: MoreLikeThisRequest = spy.single_request("more_like_this").await;
        assert_eq!(request.index, "articles");
        assert_eq!(request.id.as_deref(), Some("7"));
        assert_eq!(request.fields, vec!["title".to_string()]);
    }

    #[tokio::test]
    async fn test_client_errors_pass_through() {
        let spy = SpyClient::failing();
        let block = json!({"index": "idx", "id": "1"});

        let future = execute(Some(&spy), Operation::Get, JsonBlock::new(&block)).unwrap();
        let result = future.await;

        assert!(matches!(result, Err(SearchError::RequestError(_))));
        assert_eq!(spy.call_count().await, 1);
    }

    #[tokio::test]
    async fn test_future_is_lazy() {
        let spy = SpyClient::new();
        let block = json!({"indices": ["idx"]});

        let future = execute(Some(&spy), Operation::Search, JsonBlock::new(&block)).unwrap();
        assert_eq!(spy.call_count().await, 0);

        future.await.unwrap();
        assert_eq!(spy.call_count().await, 1);
    }

    #[test]
    fn test_parse_operations() {
        assert_eq!("index".parse::<Operation>().unwrap(), Operation::Index);
        assert_eq!("delete-by-query".parse::<Operation>().unwrap(), Operation::DeleteByQuery);
        assert_eq!("msearch".parse::<Operation>().unwrap(), Operation::MultiSearch);
        assert_eq!(
            Operation::parse("find-similar", Some("articles")).unwrap(),
            Operation::MoreLikeThis {
                index: "articles".to_string()
            }
        );

        assert!("more_like_this".parse::<Operation>().is_err());
        assert!("reindex".parse::<Operation>().is_err());
    }

    #[test]
    fn test_operation_names_round_trip() {
        for operation in all_operations() {
            let parsed = Operation::parse(operation.name(), Some("articles")).unwrap();
            assert_eq!(parsed, operation);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Operation::MultiGet.to_string(), "multi_get");
        assert_eq!(
            Operation::MoreLikeThis {
                index: "a".to_string()
            }
            .to_string(),
            "more_like_this[a]"
        );
    }
}
