//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! the template lifecycle use cases.

pub mod template_service;

pub use template_service::TemplateService;
