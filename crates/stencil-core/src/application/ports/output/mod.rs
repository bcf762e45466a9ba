//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stencil-adapters` crate provides implementations.

use crate::domain::{Template, TemplateEntity, TemplateId, TemplateType};
use crate::error::StencilResult;

/// Port for template persistence.
///
/// Implemented by:
/// - `stencil_adapters::template_store::InMemoryStore` (tests, ephemeral use)
/// - `stencil_adapters::template_store::JsonFileStore` (CLI default)
///
/// ## Contract
///
/// - `save` assigns an id to records that have none and returns the stored
///   value. Writes are flushed before `save`/`delete` return.
/// - A single `save` replaces the whole record, mappers included.
/// - Failures are returned as-is; callers do not retry.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// All stored templates, ordered by id.
    fn find_all(&self) -> StencilResult<Vec<Template>>;

    /// The template stored under `id`, if any.
    fn find_by_id(&self, id: TemplateId) -> StencilResult<Option<Template>>;

    /// Templates filed under `entity` whose render type equals `render_type`.
    fn find_by_entity_and_type(
        &self,
        entity: TemplateEntity,
        render_type: Option<TemplateType>,
    ) -> StencilResult<Vec<Template>>;

    /// Insert or replace a template.
    fn save(&self, template: Template) -> StencilResult<Template>;

    /// Delete a stored template.
    fn delete(&self, template: &Template) -> StencilResult<()>;
}
