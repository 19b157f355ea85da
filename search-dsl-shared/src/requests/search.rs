//! Query-driven requests: search, count, suggest, explain, delete-by-query,
//! scrolling and find-similar-documents.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Run a query across indices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchRequest {
    pub indices: Vec<String>,
    pub types: Vec<String>,
    /// Search body (query, size, sort, aggregations...).
    pub source: Option<Value>,
    pub routing: Option<String>,
    pub preference: Option<String>,
    pub search_type: Option<String>,
    /// Scroll keep-alive, e.g. `"1m"`. Setting it opens a scroll context.
    pub scroll: Option<String>,
}

impl SearchRequest {
    text_setters!(routing, preference, search_type, scroll);
    list_setters!(indices, types);
    document_setters!(source / source_with);
}

/// Several searches executed in one round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MultiSearchRequest {
    pub requests: Vec<SearchRequest>,
}

impl MultiSearchRequest {
    /// Append a search configured by its own block.
    pub fn add(&mut self, configure: impl FnOnce(&mut SearchRequest)) -> &mut Self {
        let mut request = SearchRequest::default();
        configure(&mut request);
        self.requests.push(request);
        self
    }
}

/// Count the documents matching a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CountRequest {
    pub indices: Vec<String>,
    pub types: Vec<String>,
    pub source: Option<Value>,
    pub min_score: Option<f64>,
    pub routing: Option<String>,
    pub preference: Option<String>,
}

impl CountRequest {
    text_setters!(routing, preference);
    value_setters!(min_score: f64);
    list_setters!(indices, types);
    document_setters!(source / source_with);
}

/// Term or phrase suggestions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuggestRequest {
    pub indices: Vec<String>,
    /// Suggester definitions keyed by suggestion name.
    pub source: Option<Value>,
    pub routing: Option<String>,
    pub preference: Option<String>,
}

impl SuggestRequest {
    text_setters!(routing, preference);
    list_setters!(indices);
    document_setters!(source / source_with);
}

/// Explain how a document scores against a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplainRequest {
    pub index: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub id: Option<String>,
    pub source: Option<Value>,
    pub routing: Option<String>,
    pub preference: Option<String>,
    pub fields: Vec<String>,
}

impl ExplainRequest {
    text_setters!(index, doc_type, id, routing, preference);
    list_setters!(fields);
    document_setters!(source / source_with);
}

/// Delete every document matching a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeleteByQueryRequest {
    pub indices: Vec<String>,
    pub types: Vec<String>,
    pub source: Option<Value>,
    pub routing: Option<String>,
    pub timeout: Option<String>,
}

impl DeleteByQueryRequest {
    text_setters!(routing, timeout);
    list_setters!(indices, types);
    document_setters!(source / source_with);
}

/// Fetch the next page of an open scroll.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchScrollRequest {
    pub scroll_id: Option<String>,
    pub scroll: Option<String>,
}

impl SearchScrollRequest {
    text_setters!(scroll_id, scroll);
}

/// Release scroll contexts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClearScrollRequest {
    pub scroll_ids: Vec<String>,
}

impl ClearScrollRequest {
    list_setters!(scroll_ids);

    /// Append one scroll id.
    pub fn add_scroll_id(&mut self, scroll_id: impl Into<String>) -> &mut Self {
        self.scroll_ids.push(scroll_id.into());
        self
    }
}

/// Find documents similar to an existing one.
///
/// The source index is mandatory and therefore a constructor argument; every
/// other field comes from the configuration block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MoreLikeThisRequest {
    pub index: String,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub id: Option<String>,
    pub routing: Option<String>,
    /// Fields used to extract interesting terms.
    pub fields: Vec<String>,
    pub min_term_freq: Option<u32>,
    pub min_doc_freq: Option<u32>,
    pub max_query_terms: Option<u32>,
    pub stop_words: Vec<String>,
    /// Indices searched for similar documents; defaults to `index`.
    pub search_indices: Vec<String>,
    pub search_types: Vec<String>,
    pub search_size: Option<u32>,
    pub search_from: Option<u32>,
    /// Extra search body merged around the generated query.
    pub search_source: Option<Value>,
}

impl MoreLikeThisRequest {
    /// Create a request against `index`.
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            ..Default::default()
        }
    }

    /// Replace the source index.
    pub fn index(&mut self, index: impl Into<String>) -> &mut Self {
        self.index = index.into();
        self
    }

    text_setters!(doc_type, id, routing);
    value_setters!(
        min_term_freq: u32,
        min_doc_freq: u32,
        max_query_terms: u32,
        search_size: u32,
        search_from: u32,
    );
    list_setters!(fields, stop_words, search_indices, search_types);
    document_setters!(search_source / search_source_with);
}
