//! Search error types.
//!
//! This module defines the errors a search client reports through the
//! futures it returns.

use thiserror::Error;

/// Errors that can occur while a search client executes a request.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Failed to set up the connection to the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request is missing something the engine needs (index, id, body...).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The request could not be sent or no response arrived.
    #[error("Request error: {0}")]
    RequestError(String),

    /// The engine answered with a failure status.
    #[error("Response error: status {status}: {body}")]
    ResponseError { status: u16, body: String },

    /// Failed to parse the response body.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl SearchError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create an invalid request error for a missing field.
    pub fn missing_field(request: &str, field: &str) -> Self {
        Self::InvalidRequest(format!("{} request requires `{}`", request, field))
    }

    /// Create a request error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::RequestError(msg.into())
    }

    /// Create a response error.
    pub fn response(status: u16, body: impl Into<String>) -> Self {
        Self::ResponseError {
            status,
            body: body.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}
