// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Code table violations
    // ========================================================================
    #[error("No template entity has code {code}")]
    UnknownEntityCode { code: i64 },

    #[error("No template type has code {code}")]
    UnknownRenderTypeCode { code: i64 },

    #[error("Template type code {code} is reserved")]
    ReservedRenderTypeCode { code: i64 },

    // ========================================================================
    // Parsing
    // ========================================================================
    #[error("Invalid tag: {0}")]
    InvalidTag(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownEntityCode { code } => vec![
                format!("Entity code {} is not defined", code),
                "Valid entity codes: 0 (client), 1 (loan), 2 (group)".into(),
            ],
            Self::UnknownRenderTypeCode { .. } | Self::ReservedRenderTypeCode { .. } => vec![
                "Valid type codes: 0 (document), 2 (sms)".into(),
            ],
            Self::InvalidTag(msg) => vec![
                format!("Details: {}", msg),
                "Entities: client, loan, group. Types: document, sms".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}
