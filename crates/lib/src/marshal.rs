//! Bidirectional string conversion for single value types.
//!
//! A [`Marshaller`] turns a value into its stored string form and back.
//! Resolution never fails loudly: unparseable input resolves to `None`, so
//! callers treat garbage the same way as an absent value.

use std::{fmt, marker::PhantomData, str::FromStr, sync::Arc};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    reference::{DefaultReferenceResolver, DocumentReference, ReferenceResolver, SerializationMode},
    value::{FieldValue, Value},
};

/// Default pattern used by [`DateMarshaller`].
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Converts values of one type to and from strings.
///
/// Implementations must satisfy `resolve(&serialize(v)) == Some(v)` for every
/// value in their domain.
pub trait Marshaller: Send + Sync {
    type Value;

    fn serialize(&self, value: &Self::Value) -> String;

    /// Parses `raw`; returns `None` instead of failing on bad input.
    fn resolve(&self, raw: &str) -> Option<Self::Value>;
}

/// Marshaller for any type with matching `FromStr` and `Display` forms.
pub struct DefaultMarshaller<T> {
    phantom: PhantomData<fn() -> T>,
}

impl<T> DefaultMarshaller<T> {
    pub fn new() -> Self {
        Self {
            phantom: PhantomData,
        }
    }
}

impl<T> Default for DefaultMarshaller<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for DefaultMarshaller<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultMarshaller").finish()
    }
}

impl<T> Marshaller for DefaultMarshaller<T>
where
    T: FromStr + fmt::Display,
{
    type Value = T;

    fn serialize(&self, value: &T) -> String {
        value.to_string()
    }

    fn resolve(&self, raw: &str) -> Option<T> {
        raw.trim().parse().ok()
    }
}

/// Marshaller for UTC timestamps using a `chrono` format string.
///
/// Formats without a time component resolve to midnight.
#[derive(Debug, Clone)]
pub struct DateMarshaller {
    format: String,
}

impl DateMarshaller {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    pub fn format(&self) -> &str {
        &self.format
    }
}

impl Default for DateMarshaller {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

impl Marshaller for DateMarshaller {
    type Value = DateTime<Utc>;

    fn serialize(&self, value: &DateTime<Utc>) -> String {
        value.format(&self.format).to_string()
    }

    fn resolve(&self, raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, &self.format) {
            return Some(dt.and_utc());
        }
        NaiveDate::parse_from_str(raw, &self.format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }
}

/// Marshaller for document references, serialized relative to a base.
#[derive(Debug, Clone)]
pub struct ReferenceMarshaller {
    resolver: Arc<dyn ReferenceResolver>,
    mode: SerializationMode,
    base: Option<DocumentReference>,
}

impl ReferenceMarshaller {
    pub fn new(mode: SerializationMode) -> Self {
        Self {
            resolver: Arc::new(DefaultReferenceResolver),
            mode,
            base: None,
        }
    }

    /// Uses a host-provided resolver instead of the default syntax.
    pub fn with_resolver(mut self, resolver: Arc<dyn ReferenceResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Resolves and serializes relative to `base`.
    pub fn with_base(mut self, base: DocumentReference) -> Self {
        self.base = Some(base);
        self
    }
}

impl Marshaller for ReferenceMarshaller {
    type Value = DocumentReference;

    fn serialize(&self, value: &DocumentReference) -> String {
        self.resolver.serialize(value, self.mode, self.base.as_ref())
    }

    fn resolve(&self, raw: &str) -> Option<DocumentReference> {
        match self.resolver.resolve(raw, self.base.as_ref()) {
            Ok(r) => Some(r),
            Err(e) => {
                tracing::debug!(raw, error = %e, "Unresolvable reference");
                None
            }
        }
    }
}

/// Marshaller storing any serde type as JSON.
pub struct JsonMarshaller<T> {
    phantom: PhantomData<fn() -> T>,
}

impl<T> JsonMarshaller<T> {
    pub fn new() -> Self {
        Self {
            phantom: PhantomData,
        }
    }
}

impl<T> Default for JsonMarshaller<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Marshaller for JsonMarshaller<T>
where
    T: Serialize + DeserializeOwned,
{
    type Value = T;

    fn serialize(&self, value: &T) -> String {
        // Serializing plain data types into a String does not fail
        serde_json::to_string(value).unwrap_or_default()
    }

    fn resolve(&self, raw: &str) -> Option<T> {
        serde_json::from_str(raw).ok()
    }
}

/// Adapts a typed marshaller to the dynamically typed [`Value`] used by
/// custom field kinds.
pub struct ValueMarshaller<M> {
    inner: M,
}

impl<M> ValueMarshaller<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M> Marshaller for ValueMarshaller<M>
where
    M: Marshaller,
    M::Value: FieldValue,
{
    type Value = Value;

    fn serialize(&self, value: &Value) -> String {
        match M::Value::from_value(value.clone()) {
            Some(typed) => self.inner.serialize(&typed),
            None => value.to_raw_string(),
        }
    }

    fn resolve(&self, raw: &str) -> Option<Value> {
        self.inner.resolve(raw).map(FieldValue::into_value)
    }
}
