use wikimodel::{
    config::{ConfigSource, ModelConfig, PropertiesConfig},
    constants::{CONFIG_CLASS_BLACKLIST, CONFIG_DEFAULT_LANGUAGE, CONFIG_REFERENCE_MODE},
    id::IdLayout,
    reference::SerializationMode,
};

#[test]
fn test_properties_config_defaults() {
    let mut config = PropertiesConfig::new().with("a", "1");
    config.set("b", "2");
    assert_eq!(config.get_property("a", "x"), "1");
    assert_eq!(config.get_property("b", "x"), "2");
    assert_eq!(config.get_property("c", "x"), "x");
}

#[test]
fn test_model_config_defaults() {
    let config = ModelConfig::default();
    assert_eq!(config.default_language, "en");
    assert_eq!(config.reference_mode, SerializationMode::Compact);
    assert_eq!(config.id_layout, IdLayout::default());
}

#[test]
fn test_model_config_from_json() {
    let config = ModelConfig::from_json(
        r#"{
            "blacklisted_classes": ["Blog.TagClass", "Menu.MenuItemClass"],
            "reference_mode": "global",
            "id_layout": { "collision_bits": 4, "ordinal_bits": 8 }
        }"#,
    )
    .unwrap();

    assert_eq!(config.default_language, "en");
    assert_eq!(config.id_layout, IdLayout::new(4, 8).unwrap());
    assert_eq!(
        config.get_property(CONFIG_CLASS_BLACKLIST, ""),
        "Blog.TagClass,Menu.MenuItemClass"
    );
    assert_eq!(config.get_property(CONFIG_REFERENCE_MODE, ""), "global");
    assert_eq!(config.get_property(CONFIG_DEFAULT_LANGUAGE, ""), "en");
    assert_eq!(config.get_property("unknown", "fallback"), "fallback");
}

#[test]
fn test_model_config_rejects_oversized_layout() {
    let err = ModelConfig::from_json(r#"{ "id_layout": { "collision_bits": 40, "ordinal_bits": 30 } }"#)
        .unwrap_err();
    assert!(err.to_string().contains("leave no hash bits"));
    let err: wikimodel::Error = err.into();
    assert!(err.is_config_error());
}

#[test]
fn test_model_config_rejects_bad_json() {
    assert!(ModelConfig::from_json("{ not json").is_err());
    assert!(ModelConfig::from_json(r#"{ "reference_mode": "sideways" }"#).is_err());
}
