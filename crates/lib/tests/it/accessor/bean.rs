use chrono::{TimeZone, Utc};
use wikimodel::{
    DocumentReference, Value,
    accessor::{BeanAccessor, FieldAccessor},
    field::FieldAccessError,
};

use crate::helpers::*;

#[test]
fn test_unregistered_property_is_missing() {
    let class = menu_class();
    let accessor = BeanAccessor::<MenuItem>::new();
    let err = accessor
        .get(&MenuItem::default(), field(&class, "label"))
        .unwrap_err();
    assert!(err.is_missing());
    match err {
        FieldAccessError::Missing { target, .. } => assert!(target.ends_with("MenuItem")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_property_lookup_uses_accessor_name() {
    let accessor = BeanAccessor::<MenuItem>::new().property(
        "menu_label",
        |i: &MenuItem| i.label.clone(),
        |i, v| i.label = v,
    );
    assert!(accessor.has_property("menu_label"));
    assert!(accessor.has_property("menuLabel"));
    assert!(!accessor.has_property("label"));
}

#[test]
fn test_get_and_set_every_kind() {
    let class = menu_class();
    let accessor = menu_item_accessor();
    let mut item = MenuItem::default();
    let when = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let target = DocumentReference::new(WIKI, "Main", "Contact");

    let values = [
        ("label", Value::from("Home")),
        ("position", Value::Int(2)),
        ("visible", Value::Bool(true)),
        ("tags", Value::from(vec!["a", "b"])),
        ("kind", Value::from("link")),
        ("target", Value::Reference(target.clone())),
        ("created", Value::Date(when)),
    ];
    for (name, value) in &values {
        assert!(accessor.set(&mut item, field(&class, name), Some(value.clone())).unwrap());
    }

    assert_eq!(
        item,
        MenuItem {
            label: Some("Home".to_string()),
            position: Some(2),
            visible: Some(true),
            tags: Some(vec!["a".to_string(), "b".to_string()]),
            kind: Some("link".to_string()),
            target: Some(target),
            created: Some(when),
        }
    );
    for (name, value) in values {
        assert_eq!(accessor.get(&item, field(&class, name)).unwrap(), Some(value));
    }
}

#[test]
fn test_set_same_value_is_unchanged() {
    let class = menu_class();
    let accessor = menu_item_accessor();
    let mut item = MenuItem {
        position: Some(4),
        ..Default::default()
    };
    assert!(!accessor.set(&mut item, field(&class, "position"), Some(Value::Int(4))).unwrap());
    assert!(accessor.set(&mut item, field(&class, "position"), None).unwrap());
    assert_eq!(item.position, None);
    assert!(!accessor.set(&mut item, field(&class, "position"), None).unwrap());
}

#[test]
fn test_single_select_list_collapses_to_text() {
    let class = menu_class();
    let accessor = menu_item_accessor();
    let mut item = MenuItem::default();

    accessor
        .set(&mut item, field(&class, "kind"), Some(Value::from(vec!["heading"])))
        .unwrap();
    assert_eq!(item.kind.as_deref(), Some("heading"));

    assert!(accessor.set(&mut item, field(&class, "kind"), Some(Value::List(vec![]))).unwrap());
    assert_eq!(item.kind, None);
}

#[test]
fn test_multi_select_accepts_single_text() {
    let class = menu_class();
    let accessor = menu_item_accessor();
    let mut item = MenuItem::default();

    accessor
        .set(&mut item, field(&class, "tags"), Some(Value::from("solo")))
        .unwrap();
    assert_eq!(item.tags, Some(vec!["solo".to_string()]));
}

#[test]
fn test_wrong_type_is_type_mismatch() {
    let class = menu_class();
    let accessor = menu_item_accessor();
    let mut item = MenuItem::default();

    let err = accessor
        .set(&mut item, field(&class, "visible"), Some(Value::Int(1)))
        .unwrap_err();
    assert_eq!(
        err,
        FieldAccessError::TypeMismatch {
            field: "visible".to_string(),
            expected: "bool".to_string(),
            actual: "int".to_string(),
        }
    );
    assert_eq!(item.visible, None);
}

#[test]
fn test_debug_lists_properties() {
    let debug = format!("{:?}", menu_item_accessor());
    assert!(debug.contains("BeanAccessor"));
    assert!(debug.contains("position"));
}
