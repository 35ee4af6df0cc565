use wikimodel::{
    DocumentReference, Value,
    accessor::{DocumentFieldAccessor, FieldAccessor},
    class::{FIELD_DEFAULT_LANGUAGE, FIELD_HIDDEN, FIELD_TITLE, document_field},
    object::Document,
};

use crate::helpers::*;

fn doc_field(name: &str) -> &'static wikimodel::field::FieldDef {
    document_field(name).unwrap_or_else(|| panic!("document class has no field {name}"))
}

#[test]
fn test_object_field_is_missing_on_document() {
    let class = menu_class();
    let doc = Document::new(page_ref());
    let err = DocumentFieldAccessor::new()
        .get(&doc, field(&class, "label"))
        .unwrap_err();
    assert!(err.is_missing());
}

#[test]
fn test_title_round_trip() {
    let mut doc = Document::new(page_ref());
    let accessor = DocumentFieldAccessor::new();
    let title = doc_field(FIELD_TITLE);

    assert_eq!(accessor.get(&doc, title).unwrap(), None);
    assert!(accessor.set(&mut doc, title, Some(Value::from("Welcome"))).unwrap());
    assert!(!accessor.set(&mut doc, title, Some(Value::from("Welcome"))).unwrap());
    assert_eq!(accessor.get(&doc, title).unwrap(), Some(Value::from("Welcome")));
    assert_eq!(doc.field(FIELD_TITLE), Some(&Value::from("Welcome")));
}

#[test]
fn test_clear_title() {
    let mut doc = Document::new(page_ref());
    let accessor = DocumentFieldAccessor::new();
    let title = doc_field(FIELD_TITLE);

    accessor.set(&mut doc, title, Some(Value::from("Welcome"))).unwrap();
    assert!(accessor.set(&mut doc, title, None).unwrap());
    assert_eq!(doc.field(FIELD_TITLE), None);
    assert!(!accessor.set(&mut doc, title, Some(Value::from("  "))).unwrap());
}

#[test]
fn test_default_language_maps_to_document_property() {
    let mut doc = Document::new(page_ref());
    let accessor = DocumentFieldAccessor::new();
    let lang = doc_field(FIELD_DEFAULT_LANGUAGE);

    assert_eq!(accessor.get(&doc, lang).unwrap(), None);
    assert!(accessor.set(&mut doc, lang, Some(Value::from("de"))).unwrap());
    assert_eq!(doc.default_language(), "de");
    assert_eq!(doc.field(FIELD_DEFAULT_LANGUAGE), None);

    doc.set_default_language("fr");
    assert_eq!(accessor.get(&doc, lang).unwrap(), Some(Value::from("fr")));
}

#[test]
fn test_hidden_rejects_text() {
    let mut doc = Document::new(page_ref());
    let err = DocumentFieldAccessor::new()
        .set(&mut doc, doc_field(FIELD_HIDDEN), Some(Value::from("yes")))
        .unwrap_err();
    assert!(err.is_type_error());
}

#[test]
fn test_parent_holds_reference() {
    let mut doc = Document::new(page_ref());
    let accessor = DocumentFieldAccessor::new();
    let parent = doc_field("parent");
    let home = DocumentReference::new(WIKI, "Main", "Home");

    accessor
        .set(&mut doc, parent, Some(Value::Reference(home.clone())))
        .unwrap();
    assert_eq!(accessor.get(&doc, parent).unwrap(), Some(Value::Reference(home)));
}
