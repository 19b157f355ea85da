//! Nested document construction.
//!
//! `DocumentBuilder` turns a closure into a JSON object, so that structured
//! request fields (document sources, partial updates, query bodies) can be
//! written as nested blocks instead of hand-assembled maps.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

/// Builds a JSON object field by field.
///
/// Keys keep insertion order. Setting a key twice replaces the earlier value
/// in place.
///
/// # Example
///
/// ```ignore
/// let source = DocumentBuilder::document(|doc| {
///     doc.field("name", "kimchy").object("nested", |nested| {
///         nested.field("other", 1.23);
///     });
/// });
/// assert_eq!(source, json!({"name": "kimchy", "nested": {"other": 1.23}}));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentBuilder {
    fields: Map<String, Value>,
}

impl DocumentBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `build` against a fresh builder and return the resulting object.
    pub fn document(build: impl FnOnce(&mut DocumentBuilder)) -> Value {
        let mut builder = Self::new();
        build(&mut builder);
        builder.build()
    }

    /// Set a literal value (string, number, bool, list or pre-built JSON).
    pub fn field(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set a timestamp, stored as an RFC 3339 string with millisecond precision.
    pub fn date(&mut self, name: impl Into<String>, value: DateTime<Utc>) -> &mut Self {
        let formatted = value.to_rfc3339_opts(SecondsFormat::Millis, true);
        self.fields.insert(name.into(), Value::String(formatted));
        self
    }

    /// Set a list of literal values.
    pub fn array<I, V>(&mut self, name: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.fields.insert(name.into(), Value::Array(values));
        self
    }

    /// Set a nested object built by its own block.
    pub fn object(
        &mut self,
        name: impl Into<String>,
        build: impl FnOnce(&mut DocumentBuilder),
    ) -> &mut Self {
        self.fields.insert(name.into(), Self::document(build));
        self
    }

    /// Whether no field has been set.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Finish the document.
    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_nested_document() {
        let doc = DocumentBuilder::document(|doc| {
            doc.field("name", "kimchy").object("nested", |nested| {
                nested.field("other", 1.23);
            });
        });

        assert_eq!(doc, json!({"name": "kimchy", "nested": {"other": 1.23}}));
    }

    #[test]
    fn test_key_order_preserved() {
        let doc = DocumentBuilder::document(|doc| {
            doc.field("zeta", 1).field("alpha", 2).field("mid", 3);
        });

        let keys: Vec<&str> = doc
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_literal_types() {
        let date = Utc.with_ymd_and_hms(2011, 1, 1, 12, 30, 0).unwrap();
        let doc = DocumentBuilder::document(|doc| {
            doc.field("count", 42)
                .field("ratio", 0.5)
                .field("active", true)
                .date("created", date)
                .array("tags", ["search", "rust"]);
        });

        assert_eq!(doc["count"], json!(42));
        assert!(doc["count"].is_u64());
        assert_eq!(doc["ratio"], json!(0.5));
        assert_eq!(doc["active"], json!(true));
        assert_eq!(doc["created"], json!("2011-01-01T12:30:00.000Z"));
        assert_eq!(doc["tags"], json!(["search", "rust"]));
    }

    #[test]
    fn test_replacing_field_keeps_position() {
        let doc = DocumentBuilder::document(|doc| {
            doc.field("a", 1).field("b", 2).field("a", 3);
        });

        assert_eq!(doc.to_string(), r#"{"a":3,"b":2}"#);
    }

    #[test]
    fn test_empty_builder() {
        let builder = DocumentBuilder::new();
        assert!(builder.is_empty());
        assert_eq!(builder.build(), json!({}));
    }
}
