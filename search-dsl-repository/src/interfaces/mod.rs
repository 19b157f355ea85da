//! Interface definitions for search clients.
//!
//! This module defines the abstract `SearchClient` trait that allows for
//! dependency injection and swappable search backend implementations.

mod admin_client;
mod search_client;

pub use admin_client::AdminClient;
pub use search_client::{ActionFuture, SearchClient};
