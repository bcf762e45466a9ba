//! Application layer errors.
//!
//! These errors represent failures in orchestration and at the port
//! boundaries, not business rules. Tag-table violations are `DomainError`
//! from `crate::domain`.

use thiserror::Error;

use crate::domain::TemplateId;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// No template is stored under the requested identifier.
    #[error("Template not found: {id}")]
    NotFound { id: TemplateId },

    /// A command payload does not have the expected shape.
    #[error("Malformed payload field '{field}': {reason}")]
    PayloadShape { field: String, reason: String },

    /// The store refused a record (blank name, unknown id, ...).
    #[error("Store constraint violated: {reason}")]
    ConstraintViolation { reason: String },

    /// The store backend failed (I/O, corrupt data, ...).
    #[error("Template store failure: {reason}")]
    StoreFailure { reason: String },

    /// Store access failed (lock poisoned).
    #[error("Template store error")]
    StoreLockError,
}

impl ApplicationError {
    pub(crate) fn payload_shape(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PayloadShape {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotFound { id } => vec![
                format!("No template with id {}", id),
                "Try: stencil list to see stored templates".into(),
            ],
            Self::PayloadShape { field, .. } => vec![
                format!("Check the '{}' field of your payload", field),
                "Mappers need integer 'mappersorder' and string 'mapperskey'/'mappersvalue'"
                    .into(),
            ],
            Self::ConstraintViolation { reason } => vec![
                format!("The store rejected the record: {}", reason),
                "Make sure the payload sets a non-empty 'name'".into(),
            ],
            Self::StoreFailure { .. } => vec![
                "Check that the store file is readable and writable".into(),
                "Use --store to point at a different store file".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::PayloadShape { .. } | Self::ConstraintViolation { .. } => {
                ErrorCategory::Validation
            }
            Self::StoreFailure { .. } | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
