use std::sync::Arc;

use chrono::{TimeZone, Utc};
use wikimodel::{
    DocumentReference, Value,
    accessor::BeanAccessor,
    class::ClassDefinition,
    convert::{BeanObjectConverter, ConvertError},
    object::{Document, PropertyObject},
};

use crate::helpers::*;

fn converter() -> BeanObjectConverter<MenuItem> {
    let converter = BeanObjectConverter::new(menu_item_accessor());
    converter.init_supplier(MenuItem::default).unwrap();
    converter.init_class_def(Arc::new(menu_class())).unwrap();
    converter
}

fn menu_object(class: &ClassDefinition) -> PropertyObject {
    PropertyObject::new(page_ref(), class, 0)
}

#[test]
fn test_uninitialized_converter() {
    let converter = BeanObjectConverter::new(menu_item_accessor());
    let class = menu_class();
    let err = converter.to_bean(&menu_object(&class)).unwrap_err();
    assert!(err.is_illegal_state());
    assert_eq!(
        err,
        ConvertError::NotInitialized {
            what: "class definition"
        }
    );

    converter.init_class_def(Arc::new(menu_class())).unwrap();
    let err = converter.to_bean(&menu_object(&class)).unwrap_err();
    assert_eq!(
        err,
        ConvertError::NotInitialized {
            what: "instance supplier"
        }
    );
}

#[test]
fn test_double_initialization() {
    let converter = converter();
    let err = converter.init_supplier(MenuItem::default).unwrap_err();
    assert!(err.is_illegal_state());
    let err = converter.init_class_def(Arc::new(menu_class())).unwrap_err();
    assert_eq!(
        err,
        ConvertError::AlreadyInitialized {
            what: "class definition"
        }
    );
}

#[test]
fn test_object_to_bean() {
    let converter = converter();
    let class = menu_class();
    let mut object = menu_object(&class);
    object.set_property("label", Some(Value::from("Home")));
    object.set_property("position", Some(Value::Int(1)));
    object.set_property("tags", Some(Value::from(vec!["nav", "top"])));
    object.set_property("kind", Some(Value::from("link")));
    object.set_property("target", Some(Value::from("Contact")));

    let item = converter.to_bean(&object).unwrap();
    assert_eq!(
        item,
        MenuItem {
            label: Some("Home".to_string()),
            position: Some(1),
            tags: Some(vec!["nav".to_string(), "top".to_string()]),
            kind: Some("link".to_string()),
            target: Some(DocumentReference::new(WIKI, "Main", "Contact")),
            ..Default::default()
        }
    );
}

#[test]
fn test_bean_to_object_and_back() {
    let converter = converter();
    let class = menu_class();
    let item = MenuItem {
        label: Some("Blog".to_string()),
        position: Some(5),
        visible: Some(false),
        tags: Some(vec!["news".to_string()]),
        kind: Some("heading".to_string()),
        target: Some(DocumentReference::new("other", "Blog", "WebHome")),
        created: Some(Utc.with_ymd_and_hms(2022, 6, 1, 8, 0, 0).unwrap()),
    };

    let mut object = menu_object(&class);
    assert!(converter.apply_to_object(&item, &mut object).unwrap());
    assert!(!converter.apply_to_object(&item, &mut object).unwrap());
    assert_eq!(converter.to_bean(&object).unwrap(), item);
}

#[test]
fn test_missing_property_keeps_target_value() {
    let accessor = BeanAccessor::<MenuItem>::new().property(
        "label",
        |i: &MenuItem| i.label.clone(),
        |i, v| i.label = v,
    );
    let converter = BeanObjectConverter::new(accessor);
    converter
        .init_supplier(|| MenuItem {
            position: Some(42),
            ..Default::default()
        })
        .unwrap();
    converter.init_class_def(Arc::new(menu_class())).unwrap();

    let class = menu_class();
    let mut object = menu_object(&class);
    object.set_property("label", Some(Value::from("Home")));
    object.set_property("position", Some(Value::Int(7)));

    let item = converter.to_bean(&object).unwrap();
    assert_eq!(item.label.as_deref(), Some("Home"));
    assert_eq!(item.position, Some(42));

    let update = MenuItem {
        label: Some("Start".to_string()),
        position: Some(1),
        ..Default::default()
    };
    assert!(converter.apply_to_object(&update, &mut object).unwrap());
    assert_eq!(object.property("label"), Some(Some(&Value::from("Start"))));
    assert_eq!(object.property("position"), Some(Some(&Value::Int(7))));

    assert!(!converter.apply_to_object(&update, &mut object).unwrap());
}

#[test]
fn test_unset_property_clears_target() {
    let converter = converter();
    let class = menu_class();
    let mut object = menu_object(&class);
    object.set_property("position", Some(Value::Int(7)));

    assert!(converter.apply_to_object(&MenuItem::default(), &mut object).unwrap());
    assert_eq!(object.property("position"), Some(None));
}

#[test]
fn test_class_mismatch() {
    let converter = converter();
    let mut doc = Document::new(page_ref());
    let tag = tag_class();
    let object = doc.add_object(&tag);

    let err = converter.to_bean(object).unwrap_err();
    assert_eq!(
        err,
        ConvertError::ClassMismatch {
            expected: menu_class_ref(),
            actual: tag_class_ref(),
        }
    );
    assert!(converter.apply_to_object(&MenuItem::default(), object).is_err());
}

#[test]
fn test_type_error_aborts_conversion() {
    let converter = converter();
    let class = menu_class();
    let mut object = menu_object(&class);
    object.set_property("visible", Some(Value::Int(3)));

    let err = converter.to_bean(&object).unwrap_err();
    assert_eq!(err.field_error().map(|e| e.field()), Some("visible"));
    let err: wikimodel::Error = err.into();
    assert!(err.is_type_error());
    assert_eq!(err.module(), "convert");
}
