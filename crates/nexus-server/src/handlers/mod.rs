//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod datasets;
pub mod ollama;
pub mod sessions;

// Re-export all handlers for use in router
pub use datasets::*;
pub use ollama::*;
pub use sessions::*;
