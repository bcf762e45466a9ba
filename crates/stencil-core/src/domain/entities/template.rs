//! Template aggregate.
//!
//! ## Model
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Template (Aggregate Root)                   │
//! │  ├── TemplateId      - assigned by the store │
//! │  ├── name / text     - free-form             │
//! │  ├── TemplateEntity  - what it attaches to   │
//! │  ├── TemplateType    - how it is rendered    │
//! │  └── Vec<TemplateMapper>                     │
//! │       └── (order, key, value)                │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Templates are plain values. Changing one means building a new value and
//! handing it to the store; nothing is shared or mutated behind the store's
//! back.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{TemplateEntity, TemplateType};

/// Store-assigned template identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(u64);

impl TemplateId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One substitution rule of a template.
///
/// `order` is whatever the caller declared. It is neither checked for
/// uniqueness nor for contiguity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMapper {
    pub order: i32,
    pub key: String,
    pub value: String,
}

impl TemplateMapper {
    pub fn new(order: i32, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            order,
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A stored template record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// `None` until the first save.
    pub id: Option<TemplateId>,
    pub name: String,
    pub text: String,
    pub entity: TemplateEntity,
    pub render_type: Option<TemplateType>,
    pub mappers: Vec<TemplateMapper>,
}

impl Template {
    /// Create an unsaved template with no render type and no mappers.
    pub fn new(name: impl Into<String>, text: impl Into<String>, entity: TemplateEntity) -> Self {
        Self {
            id: None,
            name: name.into(),
            text: text.into(),
            entity,
            render_type: None,
            mappers: Vec::new(),
        }
    }

    pub fn with_render_type(mut self, render_type: Option<TemplateType>) -> Self {
        self.render_type = render_type;
        self
    }

    pub fn with_mappers(mut self, mappers: Vec<TemplateMapper>) -> Self {
        self.mappers = mappers;
        self
    }

    /// Return a copy carrying the given identifier.
    pub fn with_id(mut self, id: TemplateId) -> Self {
        self.id = Some(id);
        self
    }

    /// Whether this template is filed under the given entity and type.
    ///
    /// `None` only matches templates that have no render type.
    pub fn matches(&self, entity: TemplateEntity, render_type: Option<TemplateType>) -> bool {
        self.entity == entity && self.render_type == render_type
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "#{} {} ({})", id, self.name, self.entity),
            None => write!(f, "{} ({}, unsaved)", self.name, self.entity),
        }
    }
}
