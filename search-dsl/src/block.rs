//! Dynamic configuration blocks.
//!
//! A dynamic block is a JSON object whose keys name request fields. Values
//! are assigned as-is: objects and arrays become structured values (document
//! bodies keep their key order), or nested request objects where the field
//! holds requests (bulk items, multi-search entries...).

use serde_json::{Map, Value};
use tracing::trace;

use crate::errors::{ConfigError, DslError};
use search_dsl_shared::ActionRequest;

/// A dynamic configuration block that may be absent.
///
/// Absent and `null` blocks are rejected with `DslError::InvalidArgument`
/// when the block is used, before any request is built.
#[derive(Debug, Clone, Copy)]
pub struct JsonBlock<'a>(Option<&'a Value>);

impl<'a> JsonBlock<'a> {
    /// Wrap a JSON value.
    pub fn new(value: &'a Value) -> Self {
        Self(Some(value))
    }

    /// A missing block.
    pub fn absent() -> Self {
        Self(None)
    }

    /// The block's fields, or an error if it is not a usable block.
    pub fn fields(&self) -> Result<&'a Map<String, Value>, DslError> {
        match self.0 {
            None | Some(Value::Null) => Err(DslError::invalid_argument(
                "configuration block must not be absent",
            )),
            Some(Value::Object(fields)) => Ok(fields),
            Some(other) => Err(DslError::invalid_argument(format!(
                "configuration block must be an object, got {}",
                kind(other)
            ))),
        }
    }
}

impl<'a> From<&'a Value> for JsonBlock<'a> {
    fn from(value: &'a Value) -> Self {
        Self::new(value)
    }
}

impl<'a> From<Option<&'a Value>> for JsonBlock<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        Self(value)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Apply a block to a request object.
///
/// Each key is assigned to the request field of the same name (the field's
/// serialized name, so `type` rather than `doc_type`). Fields the block does
/// not mention keep their current value.
///
/// Application is all-or-nothing: on error the request is left untouched.
///
/// # Errors
///
/// * `ConfigError::UnknownField` - A key names no field of the request
/// * `ConfigError::InvalidValue` - A value does not fit its field, including
///   unknown fields inside nested request objects
pub fn apply_block<R: ActionRequest>(
    request: &mut R,
    block: &Map<String, Value>,
) -> Result<(), ConfigError> {
    let mut fields = match serde_json::to_value(&*request) {
        Ok(Value::Object(fields)) => fields,
        Ok(other) => {
            return Err(ConfigError::invalid_value(
                R::NAME,
                format!("request serialized to {}", kind(&other)),
            ))
        }
        Err(e) => return Err(ConfigError::invalid_value(R::NAME, e.to_string())),
    };

    for (key, value) in block {
        let slot = fields
            .get_mut(key)
            .ok_or_else(|| ConfigError::unknown_field(R::NAME, key))?;
        trace!(request = R::NAME, field = %key, "Applying block field");
        *slot = value.clone();
    }

    *request = serde_json::from_value(Value::Object(fields))
        .map_err(|e| ConfigError::invalid_value(R::NAME, e.to_string()))?;
    Ok(())
}
