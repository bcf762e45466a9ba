//! Template Service - template lifecycle operations.
//!
//! Turns typed commands into stored templates and reports what changed.
//! Every operation is a straight line of store calls; the service holds no
//! state of its own and never retries.
//!
//! Required fields are not checked here. A command without a `name` is
//! handed to the store, which rejects blank names.

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError, CommandOutcome, TemplateCommand, command::fields,
        ports::TemplateStore,
    },
    domain::{Template, TemplateEntity, TemplateId, TemplateType},
    error::StencilResult,
};

/// Service for template operations.
pub struct TemplateService {
    store: Box<dyn TemplateStore>,
}

impl TemplateService {
    /// Create a new template service.
    pub fn new(store: Box<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// List all templates.
    #[instrument(skip_all)]
    pub fn list(&self) -> StencilResult<Vec<Template>> {
        self.store.find_all()
    }

    /// Get a template by id.
    ///
    /// # Errors
    /// `NotFound` when nothing is stored under `id`.
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: TemplateId) -> StencilResult<Template> {
        self.store
            .find_by_id(id)?
            .ok_or_else(|| ApplicationError::NotFound { id }.into())
    }

    /// Templates filed under an entity and render type. May be empty.
    #[instrument(skip(self))]
    pub fn find_by_entity_and_type(
        &self,
        entity: TemplateEntity,
        render_type: Option<TemplateType>,
    ) -> StencilResult<Vec<Template>> {
        self.store.find_by_entity_and_type(entity, render_type)
    }

    /// Create a template from a command.
    ///
    /// Absent fields fall back to empty text, the default entity, no render
    /// type and no mappers. Each call stores a new record.
    ///
    /// # Errors
    /// - `UnknownEntityCode` when `entity` is present but outside the table
    /// - any store failure, unchanged
    #[instrument(skip_all, fields(name = command.name.as_deref().unwrap_or_default()))]
    pub fn create(&self, command: TemplateCommand) -> StencilResult<CommandOutcome> {
        let entity = match command.entity {
            Some(code) => TemplateEntity::from_code(code)?,
            None => TemplateEntity::default(),
        };
        let render_type = command.render_type.and_then(known_render_type);

        let template = Template::new(
            command.name.unwrap_or_default(),
            command.text.unwrap_or_default(),
            entity,
        )
        .with_render_type(render_type)
        .with_mappers(command.mappers.unwrap_or_default());

        let saved = self.store.save(template)?;
        info!(id = ?saved.id, "Template created");

        Ok(CommandOutcome::builder().with_entity_id(saved.id).build())
    }

    /// Overwrite a stored template from a command.
    ///
    /// Every field is replaced. A `type` code outside the table clears the
    /// render type.
    ///
    /// # Errors
    /// - `NotFound` when nothing is stored under `id`
    /// - `UnknownEntityCode` when `entity` is outside the table
    /// - `PayloadShape` when `entity`, `type` or `mappers` is absent
    /// - any store failure, unchanged
    #[instrument(skip(self, command), fields(command_id = ?command.command_id))]
    pub fn update(&self, id: TemplateId, command: TemplateCommand) -> StencilResult<CommandOutcome> {
        let existing = self.find_by_id(id)?;

        let entity_code = command
            .entity
            .ok_or_else(|| ApplicationError::payload_shape(fields::ENTITY, "missing"))?;
        let entity = TemplateEntity::from_code(entity_code)?;

        let render_type = command
            .render_type
            .ok_or_else(|| ApplicationError::payload_shape(fields::TYPE, "missing"))
            .map(known_render_type)?;

        let mappers = command
            .mappers
            .ok_or_else(|| ApplicationError::payload_shape(fields::MAPPERS, "missing"))?;

        let updated = Template {
            name: command.name.unwrap_or_default(),
            text: command.text.unwrap_or_default(),
            entity,
            render_type,
            mappers,
            ..existing
        };

        let saved = self.store.save(updated)?;
        info!(id = %id, mappers = saved.mappers.len(), "Template updated");

        Ok(CommandOutcome::builder()
            .with_command_id(command.command_id)
            .with_entity_id(saved.id)
            .build())
    }

    /// Delete a stored template.
    ///
    /// The outcome carries the requested `id`.
    #[instrument(skip(self))]
    pub fn remove(&self, id: TemplateId) -> StencilResult<CommandOutcome> {
        let template = self.find_by_id(id)?;

        self.store.delete(&template)?;
        info!(id = %id, "Template removed");

        Ok(CommandOutcome::builder().with_entity_id(Some(id)).build())
    }

    /// Persist an already-built template as-is.
    #[instrument(skip_all, fields(id = ?template.id))]
    pub fn save(&self, template: Template) -> StencilResult<Template> {
        let saved = self.store.save(template)?;
        debug!(id = ?saved.id, "Template saved");
        Ok(saved)
    }
}

/// Resolve a render type code, treating unmapped codes as "no value".
fn known_render_type(code: i64) -> Option<TemplateType> {
    match TemplateType::from_code(code) {
        Ok(render_type) => Some(render_type),
        Err(e) => {
            warn!(code, error = %e, "Ignoring render type code");
            None
        }
    }
}
