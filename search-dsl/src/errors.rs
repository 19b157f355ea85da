//! Error types for the search DSL.
//!
//! Only failures detected before a request is dispatched live here. Errors
//! raised while the client executes a request arrive as `SearchError`
//! through the returned future.

use thiserror::Error;

/// Errors raised synchronously, before the client is called.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DslError {
    /// A required argument (client handle, configuration block) is absent or
    /// has the wrong shape.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The configuration block does not fit the request object.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

impl DslError {
    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Failures applying a configuration block to a request object.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The block names a field the request does not have.
    #[error("{request} request has no field `{field}`")]
    UnknownField { request: &'static str, field: String },

    /// A value does not fit the field it was assigned to.
    #[error("invalid value for {request} request: {reason}")]
    InvalidValue { request: &'static str, reason: String },
}

impl ConfigError {
    /// Create an unknown field error.
    pub fn unknown_field(request: &'static str, field: impl Into<String>) -> Self {
        Self::UnknownField {
            request,
            field: field.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(request: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            request,
            reason: reason.into(),
        }
    }
}
