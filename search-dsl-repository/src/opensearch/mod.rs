//! OpenSearch implementation of the search client.
//!
//! This module provides a concrete implementation of `SearchClient`
//! using OpenSearch as the backend.

mod admin;
mod client;
mod routes;

pub use admin::OpenSearchAdmin;
pub use client::OpenSearchClient;
