//! Field values.
//!
//! [`Value`] is the dynamically typed value exchanged between field accessors.
//! Leaf values are ordered and hashable so they can be collected into the
//! candidate sets of a field restriction.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{constants::LIST_DELIMITER, reference::DocumentReference};

/// A value held by a field.
///
/// Absence is not a value: accessors use `Option<Value>` and `None` means the
/// field is unset.
///
/// ```
/// # use wikimodel::Value;
/// let text = Value::from("hello");
/// assert_eq!(text.as_text(), Some("hello"));
/// assert_eq!(text.type_name(), "text");
/// assert!(Value::from("  ").is_blank());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Value {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Text value
    Text(String),
    /// Point in time
    Date(DateTime<Utc>),
    /// Ordered collection of text items
    List(Vec<String>),
    /// Reference to another document
    Reference(DocumentReference),
}

impl Value {
    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Text(_) => "text",
            Value::Date(_) => "date",
            Value::List(_) => "list",
            Value::Reference(_) => "reference",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&DocumentReference> {
        match self {
            Value::Reference(r) => Some(r),
            _ => None,
        }
    }

    /// True for whitespace-only text and for lists without any non-blank item.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Text(s) => s.trim().is_empty(),
            Value::List(items) => items.iter().all(|item| item.trim().is_empty()),
            _ => false,
        }
    }

    /// Flat textual form, as used for validation and for scalar storage of lists.
    pub fn to_raw_string(&self) -> String {
        match self {
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Text(s) => s.clone(),
            Value::Date(d) => d.to_rfc3339(),
            Value::List(items) => join_list(items),
            Value::Reference(r) => r.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_raw_string())
    }
}

/// Joins list items with the scalar list delimiter.
pub(crate) fn join_list(items: &[String]) -> String {
    let mut buf = [0u8; 4];
    items.join(LIST_DELIMITER.encode_utf8(&mut buf))
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::List(items.into_iter().map(str::to_string).collect())
    }
}

impl From<DocumentReference> for Value {
    fn from(r: DocumentReference) -> Self {
        Value::Reference(r)
    }
}

/// Rust types that map onto a [`Value`] variant.
///
/// Used by the structured-value accessor to type its getters and setters.
pub trait FieldValue: Sized {
    /// Name reported in type mismatch errors, matching [`Value::type_name`].
    const TYPE_NAME: &'static str;

    fn into_value(self) -> Value;

    /// Returns `None` when `value` has an incompatible variant.
    fn from_value(value: Value) -> Option<Self>;
}

impl FieldValue for String {
    const TYPE_NAME: &'static str = "text";

    fn into_value(self) -> Value {
        Value::Text(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl FieldValue for i64 {
    const TYPE_NAME: &'static str = "int";

    fn into_value(self) -> Value {
        Value::Int(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_int()
    }
}

impl FieldValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FieldValue for DateTime<Utc> {
    const TYPE_NAME: &'static str = "date";

    fn into_value(self) -> Value {
        Value::Date(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_date().copied()
    }
}

impl FieldValue for Vec<String> {
    const TYPE_NAME: &'static str = "list";

    fn into_value(self) -> Value {
        Value::List(self)
    }

    // A single-select list reads back as text; accept it as a one-item list.
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::List(items) => Some(items),
            Value::Text(s) => Some(vec![s]),
            _ => None,
        }
    }
}

impl FieldValue for DocumentReference {
    const TYPE_NAME: &'static str = "reference";

    fn into_value(self) -> Value {
        Value::Reference(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Reference(r) => Some(r),
            _ => None,
        }
    }
}
