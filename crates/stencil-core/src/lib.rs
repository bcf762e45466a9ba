//! Stencil Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Stencil
//! template catalogue, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stencil-cli (CLI)             │
//! │   (decodes payloads, drives services)   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (TemplateService)            │
//! │   create / update / remove / queries    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │          (Driven: TemplateStore)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   stencil-adapters (Infrastructure)     │
//! │     (InMemoryStore, JsonFileStore)      │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (Template, TemplateMapper, tag tables)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stencil_core::prelude::*;
//!
//! let service = TemplateService::new(store); // Box<dyn TemplateStore>
//!
//! let payload = JsonCommand::parse(r#"{"name": "Loan Reminder", "text": "Dear {client}"}"#)?;
//! let outcome = service.create(TemplateCommand::from_json(&payload)?)?;
//! let template = service.find_by_id(outcome.entity_id().unwrap())?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CommandId, CommandOutcome, JsonCommand, TemplateCommand, TemplateService,
        ports::TemplateStore,
    };
    pub use crate::domain::{Template, TemplateEntity, TemplateId, TemplateMapper, TemplateType};
    pub use crate::error::{StencilError, StencilResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
