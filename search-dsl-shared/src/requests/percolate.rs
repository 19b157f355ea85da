//! Percolation: match a document against stored queries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Find the stored queries that match a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PercolateRequest {
    pub indices: Vec<String>,
    /// Mapping type of the document being percolated.
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    /// Percolate body; `doc` holds the document to match.
    pub source: Option<Value>,
    /// Field holding the stored queries. Defaults to `query`.
    pub field: Option<String>,
    pub routing: Option<String>,
    pub preference: Option<String>,
    /// Return only the number of matches.
    pub only_count: Option<bool>,
}

impl PercolateRequest {
    text_setters!(doc_type, field, routing, preference);
    value_setters!(only_count: bool);
    list_setters!(indices);
    document_setters!(source / source_with);
}

/// Several percolations in one round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MultiPercolateRequest {
    pub requests: Vec<PercolateRequest>,
}

impl MultiPercolateRequest {
    /// Append a percolation configured by its own block.
    pub fn add(&mut self, configure: impl FnOnce(&mut PercolateRequest)) -> &mut Self {
        let mut request = PercolateRequest::default();
        configure(&mut request);
        self.requests.push(request);
        self
    }
}
