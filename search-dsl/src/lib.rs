//! # Search DSL
//!
//! Closure-based configuration for search client requests.
//!
//! Each operation builds a fresh request object, applies a configuration
//! block to it and hands it to the matching method of an injected
//! `SearchClient`, returning the client's future untouched:
//!
//! ```ignore
//! use search_dsl::SearchClientExt;
//!
//! let response = client
//!     .index_with(|r| {
//!         r.index("twitter").id("1").source_with(|doc| {
//!             doc.field("user", "kimchy").object("meta", |meta| {
//!                 meta.field("likes", 12);
//!             });
//!         });
//!     })
//!     .await?;
//! ```
//!
//! Blocks come in two forms:
//! - typed closures through [`SearchClientExt`], checked at compile time;
//! - JSON objects through [`execute`], checked when applied. A block that
//!   names an unknown field fails before the client is called.

pub mod block;
pub mod dispatch;
pub mod errors;
pub mod ext;

#[cfg(test)]
mod spy;

pub use block::{apply_block, JsonBlock};
pub use dispatch::{execute, Operation};
pub use errors::{ConfigError, DslError};
pub use ext::SearchClientExt;

pub use search_dsl_repository::{
    ActionFuture, AdminClient, ClientSettings, SearchClient, SearchError,
};
pub use search_dsl_shared as requests;
pub use search_dsl_shared::{ActionResponse, DocumentBuilder};
