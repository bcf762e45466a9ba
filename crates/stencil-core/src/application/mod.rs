//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (TemplateService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Commands**: Payload decoding into typed inputs
//! - **Outcomes**: What a mutating operation touched
//! - **Errors**: Application-specific error types

pub mod command;
pub mod error;
pub mod outcome;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::TemplateService;

// Re-export port traits (for adapter implementation)
pub use ports::TemplateStore;

pub use command::{CommandId, JsonCommand, TemplateCommand};
pub use error::ApplicationError;
pub use outcome::{CommandOutcome, CommandOutcomeBuilder};
