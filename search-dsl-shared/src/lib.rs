//! # Search DSL Shared
//!
//! Request and response types shared across the search DSL crates.
//!
//! Every client operation has a request type here. Requests are plain mutable
//! value objects: they default-construct with every field unset, expose
//! chainable setters for closure-based configuration, and round-trip through
//! serde so that dynamic (JSON) configuration blocks can be applied to them.

pub mod document;
pub mod requests;
pub mod response;

pub use document::DocumentBuilder;
pub use requests::*;
pub use response::ActionResponse;
