//! Domain value objects: TemplateEntity, TemplateType.
//!
//! # Design
//!
//! Command payloads carry both tags as numeric codes; stored records and
//! JSON output use the lowercase name. The code tables are explicit and
//! total: every code either maps to exactly one tag or is rejected with a
//! [`DomainError`].
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `code`, `from_code`, `as_str` and `FromStr` arms here
//! 3. Add the variant to the CLI value enums in `stencil-cli`

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── TemplateEntity ───────────────────────────────────────────────────────────

/// The kind of business object a template attaches to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateEntity {
    #[default]
    Client,
    Loan,
    Group,
}

impl TemplateEntity {
    /// Every tag, indexed by its code.
    pub const ALL: [TemplateEntity; 3] = [Self::Client, Self::Loan, Self::Group];

    pub const fn code(&self) -> i64 {
        match self {
            Self::Client => 0,
            Self::Loan => 1,
            Self::Group => 2,
        }
    }

    /// Resolve an ordinal code into a tag.
    ///
    /// # Errors
    /// `UnknownEntityCode` when the code is outside the table.
    pub fn from_code(code: i64) -> Result<Self, DomainError> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or(DomainError::UnknownEntityCode { code })
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Loan => "loan",
            Self::Group => "group",
        }
    }
}

impl fmt::Display for TemplateEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateEntity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "loan" => Ok(Self::Loan),
            "group" => Ok(Self::Group),
            other => Err(DomainError::InvalidTag(format!(
                "unknown template entity: {other}"
            ))),
        }
    }
}

// ── TemplateType ─────────────────────────────────────────────────────────────

/// How a template is rendered.
///
/// | Code | Tag        |
/// |------|------------|
/// | 0    | `Document` |
/// | 1    | reserved   |
/// | 2    | `Sms`      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    Document,
    Sms,
}

impl TemplateType {
    /// Code 1 is not assigned to any tag and must not be reused.
    pub const RESERVED_CODE: i64 = 1;

    pub const fn code(&self) -> i64 {
        match self {
            Self::Document => 0,
            Self::Sms => 2,
        }
    }

    /// Resolve a code into a tag.
    ///
    /// # Errors
    /// - `ReservedRenderTypeCode` for code 1
    /// - `UnknownRenderTypeCode` for anything else outside the table
    pub fn from_code(code: i64) -> Result<Self, DomainError> {
        match code {
            0 => Ok(Self::Document),
            2 => Ok(Self::Sms),
            Self::RESERVED_CODE => Err(DomainError::ReservedRenderTypeCode { code }),
            _ => Err(DomainError::UnknownRenderTypeCode { code }),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Sms => "sms",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "document" | "doc" => Ok(Self::Document),
            "sms" => Ok(Self::Sms),
            other => Err(DomainError::InvalidTag(format!(
                "unknown template type: {other}"
            ))),
        }
    }
}
