//! Template store adapters.
//!
//! Both stores share [`Catalogue`], the in-memory table that enforces the
//! store-level constraints:
//!
//! - ids are assigned from a sequence starting at 1 and never reused
//! - `name` must not be blank
//! - a record carrying an id must already be stored

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use stencil_core::{
    application::ApplicationError,
    domain::{Template, TemplateEntity, TemplateId, TemplateType},
    error::StencilResult,
};

/// Templates keyed by id, plus the id sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Catalogue {
    last_id: u64,
    templates: BTreeMap<TemplateId, Template>,
}

impl Catalogue {
    pub(crate) fn len(&self) -> usize {
        self.templates.len()
    }

    pub(crate) fn find_all(&self) -> Vec<Template> {
        self.templates.values().cloned().collect()
    }

    pub(crate) fn find_by_id(&self, id: TemplateId) -> Option<Template> {
        self.templates.get(&id).cloned()
    }

    pub(crate) fn find_by_entity_and_type(
        &self,
        entity: TemplateEntity,
        render_type: Option<TemplateType>,
    ) -> Vec<Template> {
        self.templates
            .values()
            .filter(|t| t.matches(entity, render_type))
            .cloned()
            .collect()
    }

    pub(crate) fn save(&mut self, mut template: Template) -> StencilResult<Template> {
        if template.name.trim().is_empty() {
            return Err(ApplicationError::ConstraintViolation {
                reason: "template name must not be blank".into(),
            }
            .into());
        }

        let id = match template.id {
            Some(id) if self.templates.contains_key(&id) => id,
            Some(id) => {
                return Err(ApplicationError::ConstraintViolation {
                    reason: format!("no stored template has id {id}"),
                }
                .into());
            }
            None => {
                self.last_id += 1;
                TemplateId::new(self.last_id)
            }
        };

        template.id = Some(id);
        self.templates.insert(id, template.clone());
        Ok(template)
    }

    pub(crate) fn delete(&mut self, template: &Template) -> StencilResult<()> {
        let id = template.id.ok_or_else(|| ApplicationError::ConstraintViolation {
            reason: "cannot delete a template that was never saved".into(),
        })?;

        if self.templates.remove(&id).is_none() {
            debug!(%id, "Delete of absent template ignored");
        }
        Ok(())
    }
}

/// On-disk form of a [`Catalogue`].
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct Snapshot {
    pub(crate) last_id: u64,
    pub(crate) templates: Vec<Template>,
}

impl From<&Catalogue> for Snapshot {
    fn from(catalogue: &Catalogue) -> Self {
        Self {
            last_id: catalogue.last_id,
            templates: catalogue.find_all(),
        }
    }
}

impl TryFrom<Snapshot> for Catalogue {
    type Error = ApplicationError;

    fn try_from(snapshot: Snapshot) -> Result<Self, Self::Error> {
        let mut templates = BTreeMap::new();
        for template in snapshot.templates {
            let id = template.id.ok_or_else(|| ApplicationError::StoreFailure {
                reason: format!("stored template '{}' has no id", template.name),
            })?;
            if id.get() > snapshot.last_id {
                return Err(ApplicationError::StoreFailure {
                    reason: format!("stored id {id} is ahead of the id sequence"),
                });
            }
            if templates.insert(id, template).is_some() {
                return Err(ApplicationError::StoreFailure {
                    reason: format!("id {id} is stored twice"),
                });
            }
        }

        Ok(Self {
            last_id: snapshot.last_id,
            templates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::{domain::TemplateMapper, error::StencilError};

    fn template(name: &str) -> Template {
        Template::new(name, "body", TemplateEntity::Client)
    }

    #[test]
    fn ids_are_sequential_and_not_reused() {
        let mut catalogue = Catalogue::default();

        let first = catalogue.save(template("a")).unwrap();
        let second = catalogue.save(template("b")).unwrap();
        catalogue.delete(&second).unwrap();
        let third = catalogue.save(template("c")).unwrap();

        assert_eq!(first.id, Some(TemplateId::new(1)));
        assert_eq!(second.id, Some(TemplateId::new(2)));
        assert_eq!(third.id, Some(TemplateId::new(3)));
    }

    #[test]
    fn blank_name_violates_constraint() {
        let mut catalogue = Catalogue::default();

        let err = catalogue.save(template("   ")).unwrap_err();

        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::ConstraintViolation { .. })
        ));
        assert_eq!(catalogue.len(), 0);
    }

    #[test]
    fn save_with_unknown_id_is_rejected() {
        let mut catalogue = Catalogue::default();
        let stray = template("a").with_id(TemplateId::new(40));

        assert!(catalogue.save(stray).is_err());
    }

    #[test]
    fn save_replaces_mappers_wholesale() {
        let mut catalogue = Catalogue::default();
        let saved = catalogue
            .save(template("a").with_mappers(vec![
                TemplateMapper::new(1, "x", "1"),
                TemplateMapper::new(2, "y", "2"),
            ]))
            .unwrap();

        catalogue
            .save(saved.with_mappers(vec![TemplateMapper::new(9, "z", "9")]))
            .unwrap();

        let stored = catalogue.find_by_id(TemplateId::new(1)).unwrap();
        assert_eq!(stored.mappers, vec![TemplateMapper::new(9, "z", "9")]);
    }

    #[test]
    fn delete_requires_an_id() {
        let mut catalogue = Catalogue::default();
        assert!(catalogue.delete(&template("a")).is_err());
    }

    #[test]
    fn snapshot_round_trip_keeps_sequence() {
        let mut catalogue = Catalogue::default();
        catalogue.save(template("a")).unwrap();
        let b = catalogue.save(template("b")).unwrap();
        catalogue.delete(&b).unwrap();

        let restored = Catalogue::try_from(Snapshot::from(&catalogue)).unwrap();

        assert_eq!(restored, catalogue);
        assert_eq!(restored.last_id, 2);
    }

    #[test]
    fn snapshot_with_duplicate_ids_is_corrupt() {
        let dup = template("a").with_id(TemplateId::new(1));
        let snapshot = Snapshot {
            last_id: 1,
            templates: vec![dup.clone(), dup],
        };

        assert!(matches!(
            Catalogue::try_from(snapshot),
            Err(ApplicationError::StoreFailure { .. })
        ));
    }
}
