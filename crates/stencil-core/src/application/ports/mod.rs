//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stencil-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `TemplateStore`: Template persistence
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (`TemplateService` is called directly by the CLI layer)

pub mod output;

pub use output::TemplateStore;
