//! In-memory template store.

use std::sync::{Arc, RwLock};

use stencil_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{Template, TemplateEntity, TemplateId, TemplateType},
    error::StencilResult,
};

use super::Catalogue;

/// Thread-safe in-memory template store.
///
/// Clones share the same underlying table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Catalogue>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TemplateStore for InMemoryStore {
    fn find_all(&self) -> StencilResult<Vec<Template>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner.find_all())
    }

    fn find_by_id(&self, id: TemplateId) -> StencilResult<Option<Template>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner.find_by_id(id))
    }

    fn find_by_entity_and_type(
        &self,
        entity: TemplateEntity,
        render_type: Option<TemplateType>,
    ) -> StencilResult<Vec<Template>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner.find_by_entity_and_type(entity, render_type))
    }

    fn save(&self, template: Template) -> StencilResult<Template> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.save(template)
    }

    fn delete(&self, template: &Template) -> StencilResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.delete(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::error::StencilError;

    #[test]
    fn clones_share_state() {
        let store = InMemoryStore::new();
        let other = store.clone();

        store
            .save(Template::new("a", "b", TemplateEntity::Loan))
            .unwrap();

        assert_eq!(other.find_all().unwrap().len(), 1);
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let store = InMemoryStore::new();
        let first = store
            .save(Template::new("a", "b", TemplateEntity::Loan))
            .unwrap();

        store.delete(&first).unwrap();
        let next = store
            .save(Template::new("c", "d", TemplateEntity::Loan))
            .unwrap();

        assert_eq!(store.find_all().unwrap().len(), 1);
        assert_eq!(next.id, Some(TemplateId::new(2)));
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let store = InMemoryStore::new();
        store
            .save(Template::new("a", "b", TemplateEntity::Loan))
            .unwrap();

        let shared = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.inner.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        let err = store.find_all().unwrap_err();
        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::StoreLockError)
        ));
        assert!(store.find_by_id(TemplateId::new(1)).is_err());
        assert!(
            store
                .save(Template::new("c", "d", TemplateEntity::Loan))
                .is_err()
        );
    }

    #[test]
    fn query_by_entity_and_type() {
        let store = InMemoryStore::new();
        store
            .save(
                Template::new("sms", "x", TemplateEntity::Loan)
                    .with_render_type(Some(TemplateType::Sms)),
            )
            .unwrap();
        store
            .save(
                Template::new("doc", "x", TemplateEntity::Loan)
                    .with_render_type(Some(TemplateType::Document)),
            )
            .unwrap();
        store
            .save(Template::new("untyped", "x", TemplateEntity::Loan))
            .unwrap();

        let sms = store
            .find_by_entity_and_type(TemplateEntity::Loan, Some(TemplateType::Sms))
            .unwrap();
        let untyped = store
            .find_by_entity_and_type(TemplateEntity::Loan, None)
            .unwrap();
        let none = store
            .find_by_entity_and_type(TemplateEntity::Client, Some(TemplateType::Sms))
            .unwrap();

        assert_eq!(sms.len(), 1);
        assert_eq!(sms[0].name, "sms");
        assert_eq!(untyped.len(), 1);
        assert_eq!(untyped[0].name, "untyped");
        assert!(none.is_empty());
    }
}
