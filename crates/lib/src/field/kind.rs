//! Field kinds.
//!
//! Each kind is one variant carrying its own configuration; the behaviour
//! shared by all kinds lives in free methods on [`FieldKind`].

use std::{fmt, sync::Arc};

use crate::{
    constants::LIST_DELIMITER,
    marshal::{DEFAULT_DATE_FORMAT, Marshaller},
    reference::SerializationMode,
    value::Value,
};

/// The semantic type of a field.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Single line text, optionally limited in display size
    Text { size: Option<usize> },
    /// Multi-line text
    LargeText,
    /// Integer number
    Number,
    /// Boolean flag
    Boolean,
    /// Timestamp, stored with the given display format
    Date { format: String },
    /// Selection from a list of values
    List(ListConfig),
    /// Reference to another document
    Reference(ReferenceConfig),
    /// Any value stored through a custom marshaller
    Custom(CustomConfig),
}

impl FieldKind {
    /// Text field without a size limit.
    pub fn text() -> Self {
        FieldKind::Text { size: None }
    }

    /// Date field using the default format.
    pub fn date() -> Self {
        FieldKind::Date {
            format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    /// Type token naming this kind.
    pub fn type_token(&self) -> &'static str {
        match self {
            FieldKind::Text { .. } => "text",
            FieldKind::LargeText => "largetext",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Date { .. } => "date",
            FieldKind::List(_) => "list",
            FieldKind::Reference(_) => "reference",
            FieldKind::Custom(_) => "custom",
        }
    }

    /// Name of the value variant this kind holds.
    pub fn value_type(&self) -> &'static str {
        match self {
            FieldKind::Text { .. } | FieldKind::LargeText => "text",
            FieldKind::Number => "int",
            FieldKind::Boolean => "bool",
            FieldKind::Date { .. } => "date",
            FieldKind::List(config) if config.multi_select => "list",
            FieldKind::List(_) => "text",
            FieldKind::Reference(_) => "reference",
            FieldKind::Custom(config) => config.type_name,
        }
    }

    /// Whether a value of this variant may be written to a field of this kind.
    ///
    /// Lists are accepted by text kinds since they are joined on write.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::Text { .. } | FieldKind::LargeText | FieldKind::List(_) => {
                matches!(value, Value::Text(_) | Value::List(_))
            }
            FieldKind::Number => matches!(value, Value::Int(_)),
            FieldKind::Boolean => matches!(value, Value::Bool(_)),
            FieldKind::Date { .. } => matches!(value, Value::Date(_)),
            FieldKind::Reference(_) => matches!(value, Value::Reference(_)),
            FieldKind::Custom(_) => true,
        }
    }

    pub fn list_config(&self) -> Option<&ListConfig> {
        match self {
            FieldKind::List(config) => Some(config),
            _ => None,
        }
    }

    /// True for list fields that hold at most one selected value.
    pub fn is_single_select(&self) -> bool {
        self.list_config().is_some_and(|c| !c.multi_select)
    }

    pub fn is_multi_select(&self) -> bool {
        self.list_config().is_some_and(|c| c.multi_select)
    }
}

/// Configuration of a list field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConfig {
    multi_select: bool,
    separator: String,
    values: Vec<String>,
}

impl ListConfig {
    /// A list accepting one selected value.
    pub fn single() -> Self {
        Self {
            multi_select: false,
            separator: LIST_DELIMITER.to_string(),
            values: Vec::new(),
        }
    }

    /// A list accepting any number of selected values.
    pub fn multi() -> Self {
        Self {
            multi_select: true,
            ..Self::single()
        }
    }

    /// Restricts the selectable values; an empty list allows anything.
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the display separator between selected values.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn is_multi_select(&self) -> bool {
        self.multi_select
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Whether `item` is one of the enumerated values.
    pub fn allows(&self, item: &str) -> bool {
        self.values.is_empty() || self.values.iter().any(|v| v == item)
    }
}

/// Configuration of a reference field.
///
/// Without an explicit mode the field is stored in the mode configured on
/// the accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReferenceConfig {
    mode: Option<SerializationMode>,
    size: Option<usize>,
}

impl ReferenceConfig {
    pub fn new(mode: SerializationMode) -> Self {
        Self {
            mode: Some(mode),
            size: None,
        }
    }

    /// Reference field following the configured serialization mode.
    pub fn configured() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn mode(&self) -> Option<SerializationMode> {
        self.mode
    }

    pub fn size(&self) -> Option<usize> {
        self.size
    }
}

/// Configuration of a custom field stored through a marshaller.
#[derive(Clone)]
pub struct CustomConfig {
    marshaller: Arc<dyn Marshaller<Value = Value>>,
    type_name: &'static str,
}

impl CustomConfig {
    /// `type_name` is the value type the marshaller resolves to.
    pub fn new(marshaller: Arc<dyn Marshaller<Value = Value>>, type_name: &'static str) -> Self {
        Self {
            marshaller,
            type_name,
        }
    }

    pub fn marshaller(&self) -> &dyn Marshaller<Value = Value> {
        self.marshaller.as_ref()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for CustomConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomConfig")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
