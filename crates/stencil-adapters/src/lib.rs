//! Infrastructure adapters for Stencil.
//!
//! This crate implements the ports defined in `stencil-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod template_store;

// Re-export commonly used adapters
pub use template_store::{InMemoryStore, JsonFileStore};
