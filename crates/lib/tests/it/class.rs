use std::sync::Arc;

use wikimodel::{
    ClassReference,
    class::{
        ClassCreator, ClassDefinition, ClassError, ClassRegistry, FIELD_TITLE, document_class,
    },
    config::PropertiesConfig,
    constants::CONFIG_CLASS_BLACKLIST,
    field::{FieldDef, FieldKind},
    store::{DocumentStore, InMemoryStore},
};

use crate::helpers::*;

#[test]
fn test_fields_keep_definition_order() {
    let class = menu_class();
    let names: Vec<&str> = class.fields().map(|f| f.name()).collect();
    assert_eq!(names, ["label", "position", "visible", "tags", "kind", "target", "created"]);
    assert_eq!(class.field_count(), 7);
    assert!(class.has_field("tags"));
    assert!(!class.has_field("name"));
}

#[test]
fn test_duplicate_and_foreign_fields_are_dropped() {
    let class = ClassDefinition::new(ClassReference::new("Test", "DupClass"), |class_ref| {
        let other = ClassReference::new("Test", "OtherClass");
        vec![
            FieldDef::new(class_ref, "name", FieldKind::text()),
            FieldDef::new(class_ref, "name", FieldKind::Number),
            FieldDef::new(&other, "stray", FieldKind::text()),
        ]
    });
    assert_eq!(class.field_count(), 1);
    assert_eq!(class.field("name").unwrap().kind().type_token(), "text");
}

#[test]
fn test_registry_lookup() {
    let registry = registry();
    assert_eq!(registry.len(), 2);
    assert!(registry.contains(&menu_class_ref()));
    assert_eq!(
        registry.get_by_name("Blog.TagClass").map(|c| c.class_ref().clone()),
        Some(tag_class_ref())
    );
    let err = registry.require(&ClassReference::new("No", "Class")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_registry_rejects_duplicates() {
    let mut registry = ClassRegistry::new();
    registry.register(menu_class()).unwrap();
    let err = registry.register(menu_class()).unwrap_err();
    assert_eq!(
        err,
        ClassError::DuplicateClass {
            class: menu_class_ref()
        }
    );
    let err: wikimodel::Error = err.into();
    assert!(err.is_conflict());
}

#[test]
fn test_document_class_is_pseudo() {
    let class = document_class();
    assert!(class.is_pseudo());
    assert!(!class.is_valid_storage());
    assert!(class.has_field(FIELD_TITLE));

    let config = PropertiesConfig::new().with(CONFIG_CLASS_BLACKLIST, class.class_ref().to_string());
    assert!(!class.is_blacklisted(&config));
}

#[test]
fn test_blacklist_membership() {
    let class = menu_class();
    let config = PropertiesConfig::new().with(CONFIG_CLASS_BLACKLIST, "Blog.TagClass, Menu.MenuItemClass");
    assert!(class.is_blacklisted(&config));
    assert!(!class.is_blacklisted(&PropertiesConfig::new()));
    let partial = PropertiesConfig::new().with(CONFIG_CLASS_BLACKLIST, "Menu.MenuItem");
    assert!(!class.is_blacklisted(&partial));
}

#[test]
fn test_create_all_writes_schema_once() {
    let registry = registry();
    let store = InMemoryStore::new();
    let config = PropertiesConfig::new();
    let creator = ClassCreator::new(&store, &config, WIKI);

    let report = creator.create_all(&registry);
    assert!(report.is_success());
    assert_eq!(report.created, vec![menu_class_ref(), tag_class_ref()]);

    let doc = store
        .get_or_create_document(&menu_class_ref().doc_ref(WIKI))
        .unwrap();
    let schema = doc.class_schema().unwrap();
    assert_eq!(schema.get("position").map(String::as_str), Some("number"));
    assert_eq!(schema.get("tags").map(String::as_str), Some("list"));

    let report = creator.create_all(&registry);
    assert!(report.created.is_empty());
    assert_eq!(report.unchanged.len(), 2);
    assert_eq!(
        store.history(&menu_class_ref().doc_ref(WIKI)).unwrap(),
        vec!["created class".to_string()]
    );
}

#[test]
fn test_create_class_updates_changed_schema() {
    let store = InMemoryStore::new();
    let config = PropertiesConfig::new();
    let creator = ClassCreator::new(&store, &config, WIKI);
    assert!(creator.create_class(&tag_class()).unwrap());

    let extended = ClassDefinition::new(tag_class_ref(), |class_ref| {
        vec![
            FieldDef::new(class_ref, "name", FieldKind::text()),
            FieldDef::new(class_ref, "weight", FieldKind::Number),
        ]
    });
    assert!(creator.create_class(&extended).unwrap());
    assert_eq!(
        store.history(&tag_class_ref().doc_ref(WIKI)).unwrap(),
        vec!["created class".to_string(), "updated class".to_string()]
    );
}

#[test]
fn test_create_all_skips_blacklisted_and_pseudo() {
    let mut registry = ClassRegistry::new();
    registry.register(menu_class()).unwrap();
    registry.register(tag_class()).unwrap();
    registry
        .register(ClassDefinition::pseudo(ClassReference::new("Test", "PseudoClass"), |_| Vec::new()))
        .unwrap();
    let registry = Arc::new(registry);

    let store = InMemoryStore::new();
    let config = PropertiesConfig::new().with(CONFIG_CLASS_BLACKLIST, "Blog.TagClass");
    let report = ClassCreator::new(&store, &config, WIKI).create_all(&registry);

    assert_eq!(report.created, vec![menu_class_ref()]);
    assert_eq!(
        report.skipped,
        vec![tag_class_ref(), ClassReference::new("Test", "PseudoClass")]
    );
    assert_eq!(store.len().unwrap(), 1);
}

#[test]
fn test_create_pseudo_class_fails() {
    let store = InMemoryStore::new();
    let config = PropertiesConfig::new();
    let err = ClassCreator::new(&store, &config, WIKI)
        .create_class(document_class())
        .unwrap_err();
    assert_eq!(err.module(), "class");
}
