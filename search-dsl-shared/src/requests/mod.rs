//! Request objects, one per client operation.
//!
//! Requests default-construct with every field unset. Index/type/id triples
//! in particular are left empty on purpose: the configuration block fills
//! them in, and the client rejects a request that is still missing one when
//! it executes.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A request object that can be configured from a dynamic block.
///
/// The serde field names form the request's configuration schema: a dynamic
/// block may only use keys that appear in the serialized request.
pub trait ActionRequest: Serialize + DeserializeOwned + Send + 'static {
    /// Name used in log lines and configuration errors.
    const NAME: &'static str;
}

macro_rules! text_setters {
    ($($field:ident),* $(,)?) => {
        $(
            #[doc = concat!("Set `", stringify!($field), "`.")]
            pub fn $field(&mut self, value: impl Into<String>) -> &mut Self {
                self.$field = Some(value.into());
                self
            }
        )*
    };
}

macro_rules! value_setters {
    ($($field:ident: $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("Set `", stringify!($field), "`.")]
            pub fn $field(&mut self, value: $ty) -> &mut Self {
                self.$field = Some(value);
                self
            }
        )*
    };
}

macro_rules! list_setters {
    ($($field:ident),* $(,)?) => {
        $(
            #[doc = concat!("Replace `", stringify!($field), "`.")]
            pub fn $field<I, S>(&mut self, values: I) -> &mut Self
            where
                I: IntoIterator<Item = S>,
                S: Into<String>,
            {
                self.$field = values.into_iter().map(Into::into).collect();
                self
            }
        )*
    };
}

// Structured fields get two setters: one taking finished JSON, one taking a
// nested `DocumentBuilder` block.
macro_rules! document_setters {
    ($($field:ident / $with:ident),* $(,)?) => {
        $(
            #[doc = concat!("Set `", stringify!($field), "` from a JSON value.")]
            pub fn $field(&mut self, value: impl Into<serde_json::Value>) -> &mut Self {
                self.$field = Some(value.into());
                self
            }

            #[doc = concat!("Build `", stringify!($field), "` with a nested document block.")]
            pub fn $with(
                &mut self,
                build: impl FnOnce(&mut crate::document::DocumentBuilder),
            ) -> &mut Self {
                self.$field = Some(crate::document::DocumentBuilder::document(build));
                self
            }
        )*
    };
}

macro_rules! action_request {
    ($($ty:ident => $name:literal),* $(,)?) => {
        $(
            impl ActionRequest for $ty {
                const NAME: &'static str = $name;
            }
        )*
    };
}

mod document;
mod percolate;
mod script;
mod search;

pub use document::{
    BulkItem, BulkRequest, DeleteRequest, GetRequest, IndexRequest, MultiGetItem,
    MultiGetRequest, MultiTermVectorRequest, OpType, TermVectorRequest, UpdateRequest,
};
pub use percolate::{MultiPercolateRequest, PercolateRequest};
pub use script::{DeleteIndexedScriptRequest, GetIndexedScriptRequest, PutIndexedScriptRequest};
pub use search::{
    ClearScrollRequest, CountRequest, DeleteByQueryRequest, ExplainRequest, MoreLikeThisRequest,
    MultiSearchRequest, SearchRequest, SearchScrollRequest, SuggestRequest,
};

action_request! {
    IndexRequest => "index",
    BulkRequest => "bulk",
    UpdateRequest => "update",
    DeleteRequest => "delete",
    DeleteByQueryRequest => "delete_by_query",
    GetRequest => "get",
    MultiGetRequest => "multi_get",
    SuggestRequest => "suggest",
    SearchRequest => "search",
    MultiSearchRequest => "multi_search",
    CountRequest => "count",
    SearchScrollRequest => "search_scroll",
    ClearScrollRequest => "clear_scroll",
    TermVectorRequest => "term_vector",
    MultiTermVectorRequest => "multi_term_vector",
    PercolateRequest => "percolate",
    MultiPercolateRequest => "multi_percolate",
    ExplainRequest => "explain",
    PutIndexedScriptRequest => "put_indexed_script",
    GetIndexedScriptRequest => "get_indexed_script",
    DeleteIndexedScriptRequest => "delete_indexed_script",
    MoreLikeThisRequest => "more_like_this",
}
