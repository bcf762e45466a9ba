//! Outcome of a mutating operation.

use serde::Serialize;

use crate::{application::command::CommandId, domain::TemplateId};

/// What a create/update/remove call touched.
///
/// Immutable once built; construct it through [`CommandOutcomeBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    command_id: Option<CommandId>,
    entity_id: Option<TemplateId>,
}

impl CommandOutcome {
    pub fn builder() -> CommandOutcomeBuilder {
        CommandOutcomeBuilder::default()
    }

    pub fn command_id(&self) -> Option<CommandId> {
        self.command_id
    }

    pub fn entity_id(&self) -> Option<TemplateId> {
        self.entity_id
    }
}

/// Builder for [`CommandOutcome`].
#[derive(Debug, Default)]
pub struct CommandOutcomeBuilder {
    command_id: Option<CommandId>,
    entity_id: Option<TemplateId>,
}

impl CommandOutcomeBuilder {
    pub fn with_command_id(mut self, id: Option<CommandId>) -> Self {
        self.command_id = id;
        self
    }

    pub fn with_entity_id(mut self, id: Option<TemplateId>) -> Self {
        self.entity_id = id;
        self
    }

    pub fn build(self) -> CommandOutcome {
        CommandOutcome {
            command_id: self.command_id,
            entity_id: self.entity_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_builds_empty_outcome() {
        let outcome = CommandOutcome::builder().build();
        assert_eq!(outcome.command_id(), None);
        assert_eq!(outcome.entity_id(), None);
    }

    #[test]
    fn outcome_serializes_both_ids() {
        let outcome = CommandOutcome::builder()
            .with_command_id(Some(CommandId::new(3)))
            .with_entity_id(Some(TemplateId::new(11)))
            .build();

        let json = serde_json::to_value(outcome).unwrap();
        assert_eq!(json, serde_json::json!({ "command_id": 3, "entity_id": 11 }));
    }
}
