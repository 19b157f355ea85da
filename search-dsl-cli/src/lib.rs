//! # Search DSL CLI
//!
//! Runs a single search DSL operation, configured by a JSON block, against an
//! OpenSearch cluster and prints the response body.

pub mod args;
pub mod config;

pub use args::Args;
pub use config::{Dependencies, Settings};

use serde_json::Value;
use thiserror::Error;
use tracing::info;

use search_dsl::{
    execute, ActionResponse, DslError, JsonBlock, Operation, SearchClient, SearchError,
};

/// Errors that can occur while running the CLI.
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The block or client arguments were rejected before dispatch.
    #[error("{0}")]
    DslError(#[from] DslError),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),

    /// The block is not valid JSON.
    #[error("Invalid JSON block: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CliError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

/// Run `operation` configured by `block` and wait for the response.
///
/// A missing block is passed through as absent and rejected by the DSL.
pub async fn run(
    client: &dyn SearchClient,
    operation: Operation,
    block: Option<&Value>,
) -> Result<ActionResponse, CliError> {
    info!(operation = %operation, "Running operation");

    let response = execute(Some(client), operation, JsonBlock::from(block))?.await?;

    info!(status = response.status, "Operation completed");
    Ok(response)
}

/// Render a response body for output.
pub fn render(response: &ActionResponse, pretty: bool) -> Result<String, CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(&response.body)?
    } else {
        serde_json::to_string(&response.body)?
    };
    Ok(rendered)
}
