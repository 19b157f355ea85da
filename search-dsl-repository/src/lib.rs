//! # Search DSL Repository
//!
//! This crate provides the client interface the search DSL delegates to,
//! along with a concrete implementation for OpenSearch. It includes
//! definitions for errors, settings and the administrative sub-client.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;

pub use config::ClientSettings;
pub use errors::SearchError;
pub use interfaces::{ActionFuture, AdminClient, SearchClient};
pub use opensearch::OpenSearchClient;
