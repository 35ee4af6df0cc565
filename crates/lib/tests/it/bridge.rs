use wikimodel::{
    ClassReference, DocumentReference, Value,
    accessor::FieldAccessor,
    bridge::{BridgeError, DocumentBridge, EmptyBridge, ObjectBridge},
    class::{ClassDefinition, FIELD_TITLE, document_field},
    config::{ModelConfig, PropertiesConfig},
    constants::CONFIG_REFERENCE_MODE,
    field::{FieldDef, FieldKind, ReferenceConfig},
    object::Document,
    reference::SerializationMode,
};

use crate::helpers::*;

#[test]
fn test_doc_classes_in_first_use_order() {
    let registry = registry();
    let bridge = DocumentBridge::new(registry.clone());
    let doc = populated_document(&registry, 2, 1);
    assert_eq!(bridge.get_doc_classes(&doc), vec![menu_class_ref(), tag_class_ref()]);
}

#[test]
fn test_get_objects_ordered_by_number() {
    let registry = registry();
    let bridge = DocumentBridge::new(registry.clone());
    let doc = populated_document(&registry, 3, 0);

    let numbers: Vec<u32> = bridge
        .get_objects(&doc, &menu_class_ref())
        .unwrap()
        .into_iter()
        .map(|object| bridge.get_object_number(object))
        .collect();
    assert_eq!(numbers, [0, 1, 2]);
    assert!(bridge.get_objects(&doc, &tag_class_ref()).unwrap().is_empty());
}

#[test]
fn test_create_and_delete_object() {
    let registry = registry();
    let bridge = DocumentBridge::new(registry.clone());
    let mut doc = populated_document(&registry, 2, 0);

    let created = bridge.create_object(&mut doc, &menu_class_ref()).unwrap();
    assert_eq!(created.number(), 2);
    assert_eq!(bridge.get_object_class(created), &menu_class_ref());

    let removed = bridge.delete_object(&mut doc, &menu_class_ref(), 0).unwrap();
    assert_eq!(removed.map(|o| o.number()), Some(0));
    assert!(bridge.delete_object(&mut doc, &menu_class_ref(), 0).unwrap().is_none());
    assert_eq!(doc.object_count(), 2);
}

#[test]
fn test_create_unknown_class() {
    let bridge = DocumentBridge::new(registry());
    let mut doc = Document::new(page_ref());
    let err = bridge
        .create_object(&mut doc, &ClassReference::new("Nope", "MissingClass"))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_translation_is_rejected() {
    let bridge = DocumentBridge::new(registry());
    let mut translation = Document::new_translation(page_ref(), "de");

    let err = bridge.get_objects(&translation, &menu_class_ref()).unwrap_err();
    assert!(err.is_precondition());
    assert_eq!(
        err,
        BridgeError::NotPrimaryDocument {
            doc: page_ref(),
            language: "de".to_string(),
        }
    );
    assert!(bridge.create_object(&mut translation, &menu_class_ref()).is_err());
    assert!(bridge.delete_object(&mut translation, &menu_class_ref(), 0).is_err());
}

#[test]
fn test_clone_object_is_independent() {
    let registry = registry();
    let bridge = DocumentBridge::new(registry.clone());
    let doc = populated_document(&registry, 1, 0);
    let original = doc.object(&menu_class_ref(), 0).unwrap();

    let mut copy = bridge.clone_object(original);
    copy.set_property("label", Some(Value::from("changed")));
    assert_eq!(original.property("label"), Some(Some(&Value::from("item-0"))));
}

#[test]
fn test_bridge_accessors() {
    let registry = registry();
    let bridge = DocumentBridge::new(registry.clone());
    let mut doc = populated_document(&registry, 1, 0);
    let class = registry.get(&menu_class_ref()).unwrap();

    let object = doc.object(&menu_class_ref(), 0).unwrap();
    assert_eq!(
        bridge.object_field_accessor().get(object, field(class, "label")).unwrap(),
        Some(Value::from("item-0"))
    );

    let title = document_field(FIELD_TITLE).unwrap();
    assert!(bridge.document_field_accessor().set(&mut doc, title, Some("Menu".into())).unwrap());
}

#[test]
fn test_empty_bridge_sees_nothing() {
    let registry = registry();
    let bridge = EmptyBridge::new();
    let mut doc = populated_document(&registry, 2, 2);

    assert!(bridge.get_doc_classes(&doc).is_empty());
    assert!(bridge.get_objects(&doc, &menu_class_ref()).unwrap().is_empty());
    assert!(bridge.get_objects_mut(&mut doc, &menu_class_ref()).unwrap().is_empty());
    assert!(bridge.delete_object(&mut doc, &menu_class_ref(), 0).unwrap().is_none());
    assert_eq!(doc.object_count(), 4);

    let err = bridge.create_object(&mut doc, &menu_class_ref()).unwrap_err();
    assert_eq!(
        err,
        BridgeError::UnsupportedOperation {
            operation: "create_object"
        }
    );
}

fn link_class() -> ClassDefinition {
    ClassDefinition::new(ClassReference::new("Menu", "LinkClass"), |class_ref| {
        vec![FieldDef::new(
            class_ref,
            "target",
            FieldKind::Reference(ReferenceConfig::configured()),
        )]
    })
}

/// Raw form a configured reference field takes when written through `bridge`.
fn stored_target(bridge: &DocumentBridge) -> Option<Value> {
    let class = link_class();
    let mut doc = Document::new(page_ref());
    let object = doc.add_object(&class);
    let target = field(&class, "target");
    let contact = DocumentReference::new(WIKI, "Main", "Contact");

    bridge
        .object_field_accessor()
        .set(object, target, Some(Value::Reference(contact.clone())))
        .unwrap();
    assert_eq!(
        bridge.object_field_accessor().get(object, target).unwrap(),
        Some(Value::Reference(contact))
    );
    object.property("target").flatten().cloned()
}

#[test]
fn test_reference_mode_from_config() {
    let config = ModelConfig {
        reference_mode: SerializationMode::Global,
        ..Default::default()
    };
    let bridge = DocumentBridge::from_config(registry(), &config).unwrap();
    assert_eq!(stored_target(&bridge), Some(Value::from("xwiki:Main.Contact")));

    let bridge = DocumentBridge::from_config(registry(), &PropertiesConfig::new()).unwrap();
    assert_eq!(stored_target(&bridge), Some(Value::from("Contact")));

    let local = PropertiesConfig::new().with(CONFIG_REFERENCE_MODE, "Local");
    let bridge = DocumentBridge::from_config(registry(), &local).unwrap();
    assert_eq!(stored_target(&bridge), Some(Value::from("Main.Contact")));
}

#[test]
fn test_explicit_field_mode_wins_over_config() {
    let class = menu_class();
    let bridge = DocumentBridge::new(registry()).with_reference_mode(SerializationMode::Global);
    let mut doc = Document::new(page_ref());
    let object = doc.add_object(&class);

    bridge
        .object_field_accessor()
        .set(
            object,
            field(&class, "target"),
            Some(Value::Reference(DocumentReference::new(WIKI, "Main", "Contact"))),
        )
        .unwrap();
    assert_eq!(object.property("target"), Some(Some(&Value::from("Contact"))));
}

#[test]
fn test_unknown_reference_mode_in_config() {
    let config = PropertiesConfig::new().with(CONFIG_REFERENCE_MODE, "sideways");
    let err = DocumentBridge::from_config(registry(), &config).unwrap_err();
    assert_eq!(err.module(), "reference");
}
