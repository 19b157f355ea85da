//! Stored (indexed) scripts.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Store a script under an id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PutIndexedScriptRequest {
    pub lang: Option<String>,
    pub id: Option<String>,
    /// Script body: either the script text or a full `{"script": ...}` object.
    pub source: Option<Value>,
}

impl PutIndexedScriptRequest {
    text_setters!(lang, id);
    document_setters!(source / source_with);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GetIndexedScriptRequest {
    pub lang: Option<String>,
    pub id: Option<String>,
}

impl GetIndexedScriptRequest {
    text_setters!(lang, id);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeleteIndexedScriptRequest {
    pub lang: Option<String>,
    pub id: Option<String>,
}

impl DeleteIndexedScriptRequest {
    text_setters!(lang, id);
}
