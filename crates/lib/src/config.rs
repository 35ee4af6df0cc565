//! Read-only configuration.
//!
//! The model only ever reads configuration: the class blacklist, the default
//! language and the reference serialization mode. Hosts expose their own
//! settings through [`ConfigSource`]; [`ModelConfig`] is a typed, serde-backed
//! configuration for embedding and tests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    constants::{CONFIG_CLASS_BLACKLIST, CONFIG_DEFAULT_LANGUAGE, CONFIG_REFERENCE_MODE},
    id::IdLayout,
    reference::SerializationMode,
};

/// Errors raised while loading configuration.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::Config(err)
    }
}

/// Source of configuration properties.
pub trait ConfigSource: Send + Sync {
    /// Returns the property `key`, or `default` when it is not set.
    fn get_property(&self, key: &str, default: &str) -> String;
}

/// Map-backed [`ConfigSource`].
#[derive(Debug, Clone, Default)]
pub struct PropertiesConfig {
    properties: HashMap<String, String>,
}

impl PropertiesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl ConfigSource for PropertiesConfig {
    fn get_property(&self, key: &str, default: &str) -> String {
        self.properties
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}

/// Typed model configuration.
///
/// ```
/// # use wikimodel::config::ModelConfig;
/// let config = ModelConfig::from_json(r#"{ "blacklisted_classes": ["Old.LegacyClass"] }"#).unwrap();
/// assert_eq!(config.default_language, "en");
/// assert_eq!(config.id_layout.collision_bits(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Classes (`Space.Name`) that must never be created
    pub blacklisted_classes: Vec<String>,
    /// Language of primary document views
    pub default_language: String,
    /// Serialization mode for reference fields
    pub reference_mode: SerializationMode,
    /// Bit layout of object identifiers
    pub id_layout: IdLayout,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            blacklisted_classes: Vec::new(),
            default_language: "en".to_string(),
            reference_mode: SerializationMode::default(),
            id_layout: IdLayout::default(),
        }
    }
}

impl ModelConfig {
    /// Parses a JSON configuration; an unusable id layout is a parse error.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl ConfigSource for ModelConfig {
    fn get_property(&self, key: &str, default: &str) -> String {
        match key {
            CONFIG_CLASS_BLACKLIST => self.blacklisted_classes.join(","),
            CONFIG_DEFAULT_LANGUAGE => self.default_language.clone(),
            CONFIG_REFERENCE_MODE => match self.reference_mode {
                SerializationMode::Global => "global",
                SerializationMode::Local => "local",
                SerializationMode::Compact => "compact",
            }
            .to_string(),
            _ => default.to_string(),
        }
    }
}
