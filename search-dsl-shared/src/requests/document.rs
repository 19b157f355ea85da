//! Single- and multi-document requests: index, update, delete, get, bulk,
//! multi-get and term vectors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How an index request treats an existing document with the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpType {
    /// Create or replace.
    Index,
    /// Fail if the document already exists.
    Create,
}

impl OpType {
    /// Query-string value for this op type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Create => "create",
        }
    }
}

/// Store a document under an index (and optionally a type and id).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexRequest {
    pub index: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub id: Option<String>,
    pub routing: Option<String>,
    pub parent: Option<String>,
    /// The document body.
    pub source: Option<Value>,
    pub op_type: Option<OpType>,
    pub version: Option<u64>,
    pub refresh: Option<bool>,
    pub timeout: Option<String>,
}

impl IndexRequest {
    text_setters!(index, doc_type, id, routing, parent, timeout);
    value_setters!(op_type: OpType, version: u64, refresh: bool);
    document_setters!(source / source_with);
}

/// Partially update a document, by merge (`doc`) or by script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdateRequest {
    pub index: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub id: Option<String>,
    pub routing: Option<String>,
    pub parent: Option<String>,
    /// Inline script source.
    pub script: Option<String>,
    pub script_lang: Option<String>,
    pub script_params: Option<Value>,
    /// Partial document merged into the stored one.
    pub doc: Option<Value>,
    /// Document stored when the target does not exist yet.
    pub upsert: Option<Value>,
    pub doc_as_upsert: Option<bool>,
    pub retry_on_conflict: Option<u32>,
    pub refresh: Option<bool>,
    pub timeout: Option<String>,
}

impl UpdateRequest {
    text_setters!(index, doc_type, id, routing, parent, script, script_lang, timeout);
    value_setters!(doc_as_upsert: bool, retry_on_conflict: u32, refresh: bool);
    document_setters!(doc / doc_with, upsert / upsert_with, script_params / script_params_with);
}

/// Remove a single document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeleteRequest {
    pub index: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub id: Option<String>,
    pub routing: Option<String>,
    pub parent: Option<String>,
    pub version: Option<u64>,
    pub refresh: Option<bool>,
    pub timeout: Option<String>,
}

impl DeleteRequest {
    text_setters!(index, doc_type, id, routing, parent, timeout);
    value_setters!(version: u64, refresh: bool);
}

/// Fetch a single document by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GetRequest {
    pub index: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub id: Option<String>,
    pub routing: Option<String>,
    pub preference: Option<String>,
    /// Source fields to return; empty means the whole source.
    pub fields: Vec<String>,
    pub realtime: Option<bool>,
    pub refresh: Option<bool>,
}

impl GetRequest {
    text_setters!(index, doc_type, id, routing, preference);
    value_setters!(realtime: bool, refresh: bool);
    list_setters!(fields);
}

/// One entry of a bulk request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkItem {
    Index(IndexRequest),
    Update(UpdateRequest),
    Delete(DeleteRequest),
}

/// Several index/update/delete operations sent in one round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BulkRequest {
    pub requests: Vec<BulkItem>,
    pub refresh: Option<bool>,
    pub timeout: Option<String>,
}

impl BulkRequest {
    text_setters!(timeout);
    value_setters!(refresh: bool);

    /// Append a prepared item.
    pub fn add(&mut self, item: BulkItem) -> &mut Self {
        self.requests.push(item);
        self
    }

    /// Append an index operation configured by its own block.
    pub fn add_index(&mut self, configure: impl FnOnce(&mut IndexRequest)) -> &mut Self {
        let mut request = IndexRequest::default();
        configure(&mut request);
        self.add(BulkItem::Index(request))
    }

    /// Append an update operation configured by its own block.
    pub fn add_update(&mut self, configure: impl FnOnce(&mut UpdateRequest)) -> &mut Self {
        let mut request = UpdateRequest::default();
        configure(&mut request);
        self.add(BulkItem::Update(request))
    }

    /// Append a delete operation configured by its own block.
    pub fn add_delete(&mut self, configure: impl FnOnce(&mut DeleteRequest)) -> &mut Self {
        let mut request = DeleteRequest::default();
        configure(&mut request);
        self.add(BulkItem::Delete(request))
    }

    /// Number of queued operations.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// One document reference in a multi-get request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MultiGetItem {
    pub index: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub id: Option<String>,
    pub routing: Option<String>,
    pub fields: Vec<String>,
}

impl MultiGetItem {
    text_setters!(index, doc_type, id, routing);
    list_setters!(fields);
}

/// Fetch several documents by id in one round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MultiGetRequest {
    pub items: Vec<MultiGetItem>,
    pub preference: Option<String>,
    pub realtime: Option<bool>,
    pub refresh: Option<bool>,
}

impl MultiGetRequest {
    text_setters!(preference);
    value_setters!(realtime: bool, refresh: bool);

    /// Reference a document by index and id.
    pub fn add(&mut self, index: impl Into<String>, id: impl Into<String>) -> &mut Self {
        self.items.push(MultiGetItem {
            index: Some(index.into()),
            id: Some(id.into()),
            ..Default::default()
        });
        self
    }

    /// Reference a document configured by its own block.
    pub fn item(&mut self, configure: impl FnOnce(&mut MultiGetItem)) -> &mut Self {
        let mut item = MultiGetItem::default();
        configure(&mut item);
        self.items.push(item);
        self
    }
}

/// Term statistics for the fields of one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TermVectorRequest {
    pub index: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub id: Option<String>,
    pub routing: Option<String>,
    pub preference: Option<String>,
    pub fields: Vec<String>,
    pub offsets: Option<bool>,
    pub positions: Option<bool>,
    pub payloads: Option<bool>,
    pub term_statistics: Option<bool>,
    pub field_statistics: Option<bool>,
}

impl TermVectorRequest {
    text_setters!(index, doc_type, id, routing, preference);
    value_setters!(
        offsets: bool,
        positions: bool,
        payloads: bool,
        term_statistics: bool,
        field_statistics: bool,
    );
    list_setters!(fields);
}

/// Term vectors for several documents in one round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MultiTermVectorRequest {
    pub requests: Vec<TermVectorRequest>,
}

impl MultiTermVectorRequest {
    /// Append a term vector request configured by its own block.
    pub fn add(&mut self, configure: impl FnOnce(&mut TermVectorRequest)) -> &mut Self {
        let mut request = TermVectorRequest::default();
        configure(&mut request);
        self.requests.push(request);
        self
    }
}
