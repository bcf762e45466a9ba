//! JSON file template store.
//!
//! The whole catalogue lives in one JSON document:
//!
//! ```json
//! { "last_id": 2, "templates": [ { "id": 1, "name": "...", ... } ] }
//! ```
//!
//! Every `save`/`delete` rewrites the document before returning. The write
//! goes to a sibling temp file which is then renamed over the original, so
//! a crash leaves either the old or the new catalogue on disk.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::RwLock,
};

use tracing::{debug, instrument};

use stencil_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{Template, TemplateEntity, TemplateId, TemplateType},
    error::{Context, StencilResult},
};

use super::{Catalogue, Snapshot};

/// Template store persisted to a JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: RwLock<Catalogue>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store; nothing
    /// is written until the first mutation.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> StencilResult<Self> {
        let path = path.as_ref().to_path_buf();

        let catalogue = match fs::read_to_string(&path) {
            Ok(raw) => {
                let snapshot: Snapshot = serde_json::from_str(&raw).map_err(|e| {
                    ApplicationError::StoreFailure {
                        reason: format!("{} is not a valid store: {e}", path.display()),
                    }
                })?;
                Catalogue::try_from(snapshot)?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Catalogue::default(),
            Err(e) => return Err(io_failure(&path, "read", e)),
        };

        debug!(templates = catalogue.len(), "Store opened");

        Ok(Self {
            path,
            inner: RwLock::new(catalogue),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the catalogue, flush it, then publish it.
    fn mutate<T>(&self, change: impl FnOnce(&mut Catalogue) -> StencilResult<T>) -> StencilResult<T> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let mut next = inner.clone();
        let result = change(&mut next)?;
        self.flush(&next)?;
        *inner = next;

        Ok(result)
    }

    fn flush(&self, catalogue: &Catalogue) -> StencilResult<()> {
        let json = serde_json::to_string_pretty(&Snapshot::from(catalogue))
            .context("serialising template catalogue")?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| io_failure(parent, "create directory", e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| io_failure(&tmp, "write", e))?;
        fs::rename(&tmp, &self.path).map_err(|e| io_failure(&self.path, "replace", e))?;

        debug!(path = %self.path.display(), templates = catalogue.len(), "Store flushed");
        Ok(())
    }
}

impl TemplateStore for JsonFileStore {
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
        self.mutate(|catalogue| catalogue.save(template))
    }

    fn delete(&self, template: &Template) -> StencilResult<()> {
        self.mutate(|catalogue| catalogue.delete(template))
    }
}

fn io_failure(path: &Path, operation: &str, e: io::Error) -> stencil_core::error::StencilError {
    ApplicationError::StoreFailure {
        reason: format!("failed to {} {}: {}", operation, path.display(), e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::domain::TemplateMapper;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonFileStore {
        JsonFileStore::open(dir.path().join("templates.json")).unwrap()
    }

    #[test]
    fn missing_file_opens_empty_and_is_not_created() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.find_all().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn saves_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let saved = store_in(&dir)
            .save(
                Template::new("Loan Reminder", "Dear {client}", TemplateEntity::Loan)
                    .with_render_type(Some(TemplateType::Sms))
                    .with_mappers(vec![TemplateMapper::new(1, "client", "John")]),
            )
            .unwrap();

        let reopened = store_in(&dir);
        let found = reopened.find_by_id(saved.id.unwrap()).unwrap();

        assert_eq!(found, Some(saved));
    }

    #[test]
    fn sequence_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let a = store
            .save(Template::new("a", "", TemplateEntity::Client))
            .unwrap();
        store.delete(&a).unwrap();

        let b = store_in(&dir)
            .save(Template::new("b", "", TemplateEntity::Client))
            .unwrap();

        assert_eq!(b.id, Some(TemplateId::new(2)));
    }

    #[test]
    fn rejected_save_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .save(Template::new("a", "", TemplateEntity::Client))
            .unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        assert!(store.save(Template::new("", "", TemplateEntity::Client)).is_err());

        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
        assert_eq!(store.find_all().unwrap().len(), 1);
    }

    #[test]
    fn corrupt_file_is_store_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("templates.json");
        fs::write(&path, "{ nope").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();

        assert!(matches!(
            err,
            stencil_core::error::StencilError::Application(ApplicationError::StoreFailure { .. })
        ));
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("nested/deeper/store.json")).unwrap();

        store
            .save(Template::new("a", "", TemplateEntity::Group))
            .unwrap();

        assert!(store.path().exists());
    }
}
