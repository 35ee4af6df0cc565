//! Field accessors.
//!
//! A [`FieldAccessor`] reads and writes the value of a [`FieldDef`] on one
//! kind of representation. Three representations exist:
//!
//! - [`ObjectFieldAccessor`] for generic property containers
//! - [`DocumentFieldAccessor`] for the document-level fields of a document
//! - [`BeanAccessor`] for plain Rust structs, through a table of getters and setters
//!
//! Reads return `Ok(None)` for a field that exists but is unset and
//! `Err(FieldAccessError::Missing)` for a field the representation does not
//! know. Writes report whether the stored value changed; writing the value
//! already held is a no-op.

use crate::{
    field::{FieldDef, FieldResult},
    value::Value,
};

mod bean;
mod document;
mod object;

pub use bean::BeanAccessor;
pub use document::DocumentFieldAccessor;
pub use object::ObjectFieldAccessor;

/// Reads and writes field values on instances of `T`.
pub trait FieldAccessor<T: ?Sized> {
    /// Returns the value of `field`, or `None` when it is unset.
    fn get(&self, instance: &T, field: &FieldDef) -> FieldResult<Option<Value>>;

    /// Writes `value` to `field`; `None` clears it. Returns whether anything changed.
    fn set(&self, instance: &mut T, field: &FieldDef, value: Option<Value>) -> FieldResult<bool>;
}

/// Drops blank text and lists so they are stored as unset.
pub(crate) fn normalize_blank(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_blank())
}

pub(crate) fn check_accepts(field: &FieldDef, value: &Value) -> FieldResult<()> {
    if field.kind().accepts(value) {
        Ok(())
    } else {
        Err(crate::field::FieldAccessError::TypeMismatch {
            field: field.name().to_string(),
            expected: field.kind().value_type().to_string(),
            actual: value.type_name().to_string(),
        })
    }
}
