//! Field definitions.
//!
//! A [`FieldDef`] describes one named, typed attribute of a class. It is built
//! once when the class is defined and shared immutably afterwards. Two field
//! definitions are equal when their class and name are equal; kind, label
//! and validation do not take part in identity.

use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use regex::Regex;

use crate::{marshal::Marshaller, reference::ClassReference, value::Value};

mod errors;
mod kind;
mod naming;

pub use errors::{FieldAccessError, FieldDefError, FieldResult};
pub use kind::{CustomConfig, FieldKind, ListConfig, ReferenceConfig};
pub use naming::{accessor_name, pretty_name};

/// Immutable description of a field of a class.
#[derive(Debug, Clone)]
pub struct FieldDef {
    class_ref: ClassReference,
    name: String,
    kind: FieldKind,
    pretty_name: String,
    validation_pattern: Option<(String, Regex)>,
    validation_message: Option<String>,
}

impl FieldDef {
    /// Creates a builder for a field named `name` in `class_ref`.
    pub fn builder(class_ref: &ClassReference, name: impl Into<String>) -> FieldDefBuilder {
        FieldDefBuilder::new(class_ref, name)
    }

    /// Creates a field with a derived label and no validation.
    pub fn new(class_ref: &ClassReference, name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            class_ref: class_ref.clone(),
            pretty_name: pretty_name(&name),
            name,
            kind,
            validation_pattern: None,
            validation_message: None,
        }
    }

    pub fn class_ref(&self) -> &ClassReference {
        &self.class_ref
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn pretty_name(&self) -> &str {
        &self.pretty_name
    }

    pub fn validation_pattern(&self) -> Option<&str> {
        self.validation_pattern.as_ref().map(|(source, _)| source.as_str())
    }

    pub fn validation_message(&self) -> Option<&str> {
        self.validation_message.as_deref()
    }

    /// Checks `value` against the validation pattern and enumerated list values.
    pub fn validate(&self, value: &Value) -> bool {
        if let Some(config) = self.kind.list_config() {
            let allowed = match value {
                Value::List(items) => items.iter().all(|item| config.allows(item)),
                Value::Text(item) => config.allows(item),
                _ => false,
            };
            if !allowed {
                return false;
            }
        }
        match &self.validation_pattern {
            Some((_, pattern)) => pattern.is_match(&value.to_raw_string()),
            None => true,
        }
    }
}

impl PartialEq for FieldDef {
    fn eq(&self, other: &Self) -> bool {
        self.class_ref == other.class_ref && self.name == other.name
    }
}

impl Eq for FieldDef {}

impl Hash for FieldDef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class_ref.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.class_ref, self.name)
    }
}

/// Builder for [`FieldDef`].
///
/// ```
/// # use wikimodel::{ClassReference, field::{FieldDef, FieldKind}};
/// let class_ref = ClassReference::new("Menu", "MenuItemClass");
/// let field = FieldDef::builder(&class_ref, "menuPosition")
///     .set_kind(FieldKind::Number)
///     .set_validation_pattern("[0-9]+")
///     .build()
///     .unwrap();
/// assert_eq!(field.pretty_name(), "Menu Position");
/// ```
#[derive(Debug, Clone)]
pub struct FieldDefBuilder {
    class_ref: ClassReference,
    name: String,
    kind: FieldKind,
    pretty_name: Option<String>,
    validation_pattern: Option<String>,
    validation_message: Option<String>,
}

impl FieldDefBuilder {
    fn new(class_ref: &ClassReference, name: impl Into<String>) -> Self {
        Self {
            class_ref: class_ref.clone(),
            name: name.into(),
            kind: FieldKind::text(),
            pretty_name: None,
            validation_pattern: None,
            validation_message: None,
        }
    }

    pub fn set_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    /// Shorthand for a custom kind stored through `marshaller`.
    pub fn set_marshaller(
        self,
        marshaller: Arc<dyn Marshaller<Value = Value>>,
        type_name: &'static str,
    ) -> Self {
        self.set_kind(FieldKind::Custom(CustomConfig::new(marshaller, type_name)))
    }

    pub fn set_pretty_name(mut self, pretty_name: impl Into<String>) -> Self {
        self.pretty_name = Some(pretty_name.into());
        self
    }

    /// Sets a regular expression the whole raw value must match.
    pub fn set_validation_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.validation_pattern = Some(pattern.into());
        self
    }

    pub fn set_validation_message(mut self, message: impl Into<String>) -> Self {
        self.validation_message = Some(message.into());
        self
    }

    pub fn build(self) -> Result<FieldDef, FieldDefError> {
        if self.name.trim().is_empty() {
            return Err(FieldDefError::EmptyName {
                class: self.class_ref.to_string(),
            });
        }
        let validation_pattern = match self.validation_pattern {
            Some(pattern) => {
                let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
                    FieldDefError::InvalidPattern {
                        field: self.name.clone(),
                        reason: e.to_string(),
                    }
                })?;
                Some((pattern, regex))
            }
            None => None,
        };
        let label = self
            .pretty_name
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| pretty_name(&self.name));
        Ok(FieldDef {
            class_ref: self.class_ref,
            name: self.name,
            kind: self.kind,
            pretty_name: label,
            validation_pattern,
            validation_message: self.validation_message,
        })
    }
}
