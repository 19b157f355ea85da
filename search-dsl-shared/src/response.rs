//! Response type returned by every client operation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The raw outcome of one client operation: HTTP status and JSON body.
///
/// The DSL never inspects responses; callers pick out what they need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    /// HTTP status code returned by the search engine.
    pub status: u16,
    /// Parsed response body (`Value::Null` when the body was empty).
    pub body: Value,
}

impl ActionResponse {
    /// Create a response from a status code and body.
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the engine reported the target as missing.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Look up a value by JSON pointer, e.g. `/hits/total/value`.
    pub fn get(&self, pointer: &str) -> Option<&Value> {
        self.body.pointer(pointer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_helpers() {
        assert!(ActionResponse::new(201, Value::Null).is_success());
        assert!(!ActionResponse::new(404, Value::Null).is_success());
        assert!(ActionResponse::new(404, Value::Null).is_not_found());
    }

    #[test]
    fn test_pointer_lookup() {
        let response = ActionResponse::new(200, json!({"hits": {"total": {"value": 3}}}));

        assert_eq!(response.get("/hits/total/value"), Some(&json!(3)));
        assert!(response.get("/hits/missing").is_none());
    }
}
