//! End-to-end lifecycle tests: TemplateService over the real stores.

use serde_json::json;
use tempfile::TempDir;

use stencil_adapters::{InMemoryStore, JsonFileStore};
use stencil_core::{
    application::ApplicationError,
    domain::DomainError,
    prelude::*,
};

fn service() -> TemplateService {
    TemplateService::new(Box::new(InMemoryStore::new()))
}

fn decode(payload: serde_json::Value) -> TemplateCommand {
    TemplateCommand::from_json(&JsonCommand::new(payload).unwrap()).unwrap()
}

fn create(service: &TemplateService, name: &str, text: &str) -> TemplateId {
    service
        .create(decode(json!({ "name": name, "text": text })))
        .unwrap()
        .entity_id()
        .unwrap()
}

fn update_payload(entity: i64, render_type: i64) -> serde_json::Value {
    json!({
        "name": "Loan Reminder",
        "text": "Dear {client}",
        "entity": entity,
        "type": render_type,
        "mappers": [{ "mappersorder": 1, "mapperskey": "client", "mappersvalue": "John" }]
    })
}

#[test]
fn unknown_id_is_not_found() {
    let service = service();
    create(&service, "a", "b");

    for raw in [0, 2, 99, u64::MAX] {
        let err = service.find_by_id(TemplateId::new(raw)).unwrap_err();
        assert!(err.is_not_found(), "id {raw} should be missing");
    }
}

#[test]
fn create_then_find_returns_command_values() {
    let service = service();

    let id = create(&service, "Loan Reminder", "Dear {client}");
    let found = service.find_by_id(id).unwrap();

    assert_eq!(found.id, Some(id));
    assert_eq!(found.name, "Loan Reminder");
    assert_eq!(found.text, "Dear {client}");
    assert!(found.mappers.is_empty());
}

#[test]
fn identical_creates_yield_distinct_ids() {
    let service = service();

    let first = create(&service, "Same", "Same");
    let second = create(&service, "Same", "Same");

    assert_ne!(first, second);
    assert_eq!(service.list().unwrap().len(), 2);
}

#[test]
fn create_without_name_fails_at_the_store() {
    let service = service();

    let err = service.create(decode(json!({ "text": "orphan" }))).unwrap_err();

    assert!(matches!(
        err,
        StencilError::Application(ApplicationError::ConstraintViolation { .. })
    ));
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn update_sets_entity_type_and_mappers() {
    let service = service();
    let id = create(&service, "Loan Reminder", "Dear {client}");

    let command = TemplateCommand::from_json(
        &JsonCommand::new(update_payload(1, 2))
            .unwrap()
            .with_command_id(CommandId::new(77)),
    )
    .unwrap();
    let outcome = service.update(id, command).unwrap();

    assert_eq!(outcome.command_id(), Some(CommandId::new(77)));
    assert_eq!(outcome.entity_id(), Some(id));

    let found = service.find_by_id(id).unwrap();
    assert_eq!(found.entity, TemplateEntity::Loan);
    assert_eq!(found.render_type, Some(TemplateType::Sms));
    assert_eq!(found.mappers, vec![TemplateMapper::new(1, "client", "John")]);
}

#[test]
fn update_type_code_zero_is_document() {
    let service = service();
    let id = create(&service, "a", "b");

    service.update(id, decode(update_payload(0, 0))).unwrap();

    assert_eq!(
        service.find_by_id(id).unwrap().render_type,
        Some(TemplateType::Document)
    );
}

#[test]
fn update_with_unmapped_type_leaves_type_unset() {
    let service = service();
    let id = create(&service, "a", "b");

    service.update(id, decode(update_payload(0, 5))).unwrap();

    assert_eq!(service.find_by_id(id).unwrap().render_type, None);
}

#[test]
fn update_with_unmapped_type_clears_prior_type() {
    let service = service();
    let id = create(&service, "a", "b");

    for code in [1, 5] {
        service.update(id, decode(update_payload(0, 0))).unwrap();
        assert_eq!(
            service.find_by_id(id).unwrap().render_type,
            Some(TemplateType::Document)
        );

        service.update(id, decode(update_payload(0, code))).unwrap();
        assert_eq!(
            service.find_by_id(id).unwrap().render_type,
            None,
            "type code {code}"
        );
    }
}

#[test]
fn update_without_type_changes_nothing() {
    let service = service();
    let id = create(&service, "a", "b");
    service.update(id, decode(update_payload(0, 2))).unwrap();
    let before = service.find_by_id(id).unwrap();

    let err = service
        .update(id, decode(json!({ "name": "c", "entity": 1, "mappers": [] })))
        .unwrap_err();

    assert!(matches!(
        err,
        StencilError::Application(ApplicationError::PayloadShape { ref field, .. }) if field == "type"
    ));
    assert_eq!(service.find_by_id(id).unwrap(), before);
}

#[test]
fn update_replaces_mappers_instead_of_merging() {
    let service = service();
    let created = service
        .create(decode(json!({
            "name": "a",
            "text": "b",
            "mappers": [
                { "mappersorder": 1, "mapperskey": "old1", "mappersvalue": "x" },
                { "mappersorder": 2, "mapperskey": "old2", "mappersvalue": "y" },
                { "mappersorder": 3, "mapperskey": "old3", "mappersvalue": "z" }
            ]
        })))
        .unwrap();
    let id = created.entity_id().unwrap();
    assert_eq!(service.find_by_id(id).unwrap().mappers.len(), 3);

    service
        .update(
            id,
            decode(json!({
                "name": "a",
                "text": "b",
                "entity": 0,
                "type": 0,
                "mappers": [
                    { "mappersorder": 5, "mapperskey": "new", "mappersvalue": "v" },
                    { "mappersorder": 1, "mapperskey": "first", "mappersvalue": "w" }
                ]
            })),
        )
        .unwrap();

    assert_eq!(
        service.find_by_id(id).unwrap().mappers,
        vec![
            TemplateMapper::new(5, "new", "v"),
            TemplateMapper::new(1, "first", "w"),
        ]
    );
}

#[test]
fn update_with_entity_out_of_range_changes_nothing() {
    let service = service();
    let id = create(&service, "a", "b");
    let before = service.find_by_id(id).unwrap();

    let err = service.update(id, decode(update_payload(9, 2))).unwrap_err();

    assert_eq!(err, StencilError::Domain(DomainError::UnknownEntityCode { code: 9 }));
    assert_eq!(service.find_by_id(id).unwrap(), before);
}

#[test]
fn update_of_missing_id_is_not_found() {
    let service = service();
    let err = service
        .update(TemplateId::new(12), decode(update_payload(0, 0)))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn remove_then_find_is_not_found() {
    let service = service();
    let id = create(&service, "a", "b");

    let outcome = service.remove(id).unwrap();

    assert_eq!(outcome.entity_id(), Some(id));
    assert!(service.find_by_id(id).unwrap_err().is_not_found());
    assert!(service.remove(id).unwrap_err().is_not_found());
}

#[test]
fn query_by_entity_and_type_filters() {
    let service = service();
    let sms = create(&service, "sms", "x");
    let doc = create(&service, "doc", "x");
    service.update(sms, decode(update_payload(1, 2))).unwrap();
    service.update(doc, decode(update_payload(1, 0))).unwrap();

    let found = service
        .find_by_entity_and_type(TemplateEntity::Loan, Some(TemplateType::Sms))
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, Some(sms));

    assert!(
        service
            .find_by_entity_and_type(TemplateEntity::Group, Some(TemplateType::Sms))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn save_passthrough_assigns_id() {
    let service = service();

    let saved = service
        .save(Template::new("built", "outside", TemplateEntity::Group))
        .unwrap();

    assert!(saved.id.is_some());
    assert_eq!(service.find_by_id(saved.id.unwrap()).unwrap(), saved);
}

#[test]
fn file_store_lifecycle_persists_between_services() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("templates.json");

    let id = {
        let service = TemplateService::new(Box::new(JsonFileStore::open(&path).unwrap()));
        let id = create(&service, "Loan Reminder", "Dear {client}");
        service.update(id, decode(update_payload(1, 2))).unwrap();
        id
    };

    let service = TemplateService::new(Box::new(JsonFileStore::open(&path).unwrap()));
    let found = service.find_by_id(id).unwrap();
    assert_eq!(found.entity, TemplateEntity::Loan);
    assert_eq!(found.render_type, Some(TemplateType::Sms));
    assert_eq!(found.mappers.len(), 1);

    service.remove(id).unwrap();
    let reopened = TemplateService::new(Box::new(JsonFileStore::open(&path).unwrap()));
    assert!(reopened.find_by_id(id).unwrap_err().is_not_found());
}
