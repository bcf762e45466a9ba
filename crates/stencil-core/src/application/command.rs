//! Command payloads.
//!
//! Two layers:
//!
//! - [`JsonCommand`]: a loosely-typed JSON object with named-field
//!   accessors and an optional originating command id.
//! - [`TemplateCommand`]: the typed input [`TemplateService`] consumes,
//!   decoded once from a `JsonCommand` by [`TemplateCommand::from_json`].
//!
//! Decoding only checks shapes (is this an integer, is this sub-field
//! present). Whether `name` or `text` were supplied at all is left to the
//! store.
//!
//! [`TemplateService`]: crate::application::TemplateService

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{application::ApplicationError, domain::TemplateMapper};

/// Field names understood by the template commands.
pub mod fields {
    pub const NAME: &str = "name";
    pub const TEXT: &str = "text";
    pub const ENTITY: &str = "entity";
    pub const TYPE: &str = "type";
    pub const MAPPERS: &str = "mappers";
    pub const MAPPER_ORDER: &str = "mappersorder";
    pub const MAPPER_KEY: &str = "mapperskey";
    pub const MAPPER_VALUE: &str = "mappersvalue";
}

/// Identifier of the command that triggered a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(u64);

impl CommandId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── JsonCommand ──────────────────────────────────────────────────────────────

/// A JSON object payload with named-field accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonCommand {
    command_id: Option<CommandId>,
    fields: Map<String, Value>,
}

impl JsonCommand {
    /// Wrap an already-parsed JSON value. The root must be an object.
    pub fn new(json: Value) -> Result<Self, ApplicationError> {
        match json {
            Value::Object(fields) => Ok(Self {
                command_id: None,
                fields,
            }),
            other => Err(ApplicationError::payload_shape(
                "$",
                format!("expected a JSON object, found {}", kind_of(&other)),
            )),
        }
    }

    /// Parse JSON text into a command.
    pub fn parse(raw: &str) -> Result<Self, ApplicationError> {
        let json: Value = serde_json::from_str(raw)
            .map_err(|e| ApplicationError::payload_shape("$", format!("invalid JSON: {e}")))?;
        Self::new(json)
    }

    pub fn with_command_id(mut self, id: CommandId) -> Self {
        self.command_id = Some(id);
        self
    }

    pub fn command_id(&self) -> Option<CommandId> {
        self.command_id
    }

    /// String value of a field; scalars are coerced to their text form.
    pub fn string_value(&self, name: &str) -> Result<Option<String>, ApplicationError> {
        self.get(name).map(|v| coerce_string(name, v)).transpose()
    }

    /// Integer value of a field, parsed without any locale rules.
    ///
    /// Accepts JSON integers and strings holding a plain decimal integer.
    /// An empty string counts as absent.
    pub fn integer_value_sans_locale(&self, name: &str) -> Result<Option<i64>, ApplicationError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(v) => coerce_integer(name, v).map(Some),
        }
    }

    /// Array field whose elements are handed back untouched.
    pub fn array_of(&self, name: &str) -> Result<Option<&[Value]>, ApplicationError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items.as_slice())),
            Some(other) => Err(ApplicationError::payload_shape(
                name,
                format!("expected an array, found {}", kind_of(other)),
            )),
        }
    }

    fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn coerce_string(field: &str, value: &Value) -> Result<String, ApplicationError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(ApplicationError::payload_shape(
            field,
            format!("expected a string, found {}", kind_of(other)),
        )),
    }
}

fn coerce_integer(field: &str, value: &Value) -> Result<i64, ApplicationError> {
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| {
            ApplicationError::payload_shape(field, format!("{n} is not an integer"))
        }),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| {
            ApplicationError::payload_shape(field, format!("'{s}' is not an integer"))
        }),
        other => Err(ApplicationError::payload_shape(
            field,
            format!("expected an integer, found {}", kind_of(other)),
        )),
    }
}

// ── TemplateCommand ──────────────────────────────────────────────────────────

/// Typed input for the template lifecycle operations.
///
/// Tag fields hold raw codes; turning them into tags is the service's job
/// because create and update treat bad codes differently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateCommand {
    pub command_id: Option<CommandId>,
    pub name: Option<String>,
    pub text: Option<String>,
    pub entity: Option<i64>,
    pub render_type: Option<i64>,
    pub mappers: Option<Vec<TemplateMapper>>,
}

impl TemplateCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a JSON payload.
    ///
    /// # Errors
    /// `PayloadShape` when a field has the wrong type or a mapper element is
    /// missing one of its sub-fields.
    pub fn from_json(command: &JsonCommand) -> Result<Self, ApplicationError> {
        let mappers = command
            .array_of(fields::MAPPERS)?
            .map(|items| {
                items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| decode_mapper(idx, item))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Self {
            command_id: command.command_id(),
            name: command.string_value(fields::NAME)?,
            text: command.string_value(fields::TEXT)?,
            entity: command.integer_value_sans_locale(fields::ENTITY)?,
            render_type: command.integer_value_sans_locale(fields::TYPE)?,
            mappers,
        })
    }

    pub fn with_command_id(mut self, id: CommandId) -> Self {
        self.command_id = Some(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_entity(mut self, code: i64) -> Self {
        self.entity = Some(code);
        self
    }

    pub fn with_render_type(mut self, code: i64) -> Self {
        self.render_type = Some(code);
        self
    }

    pub fn with_mappers(mut self, mappers: Vec<TemplateMapper>) -> Self {
        self.mappers = Some(mappers);
        self
    }
}

fn decode_mapper(idx: usize, item: &Value) -> Result<TemplateMapper, ApplicationError> {
    let path = |sub: &str| format!("{}[{}].{}", fields::MAPPERS, idx, sub);

    let object = item.as_object().ok_or_else(|| {
        ApplicationError::payload_shape(
            format!("{}[{}]", fields::MAPPERS, idx),
            format!("expected an object, found {}", kind_of(item)),
        )
    })?;

    let required = |sub: &str| {
        object
            .get(sub)
            .filter(|v| !v.is_null())
            .ok_or_else(|| ApplicationError::payload_shape(path(sub), "missing"))
    };

    let order_path = path(fields::MAPPER_ORDER);
    let order = coerce_integer(&order_path, required(fields::MAPPER_ORDER)?)?;
    let order = i32::try_from(order)
        .map_err(|_| ApplicationError::payload_shape(order_path, format!("{order} is out of range")))?;
    let key = coerce_string(&path(fields::MAPPER_KEY), required(fields::MAPPER_KEY)?)?;
    let value = coerce_string(&path(fields::MAPPER_VALUE), required(fields::MAPPER_VALUE)?)?;

    Ok(TemplateMapper { order, key, value })
}
