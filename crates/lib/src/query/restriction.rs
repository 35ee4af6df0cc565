use std::collections::BTreeSet;

use crate::{
    accessor::FieldAccessor,
    field::FieldDef,
    object::PropertyObject,
    reference::ClassReference,
    value::Value,
};

/// A single predicate over a [`PropertyObject`].
///
/// Restrictions compare by their defining attributes, so equal restrictions
/// collapse inside an [`ObjectQuery`](super::ObjectQuery).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Restriction {
    /// The object is of the given class
    Class(ClassReference),
    /// The field holds one of the candidate values
    Field { field: FieldDef, values: BTreeSet<Value> },
    /// The field holds a value
    FieldPresent(FieldDef),
    /// The field is declared but unset
    FieldAbsent(FieldDef),
    /// The object's identity hash is one of the given hashes
    Identity(BTreeSet<u64>),
    /// The object has the given number
    Number(u32),
}

impl Restriction {
    /// Restricts `field` to any of `values`.
    ///
    /// For single-select lists a multi-valued candidate matches each of its
    /// items on its own, since a stored selection never holds more than one.
    /// For multi-select lists a text candidate matches a one-item selection.
    pub fn field<I>(field: &FieldDef, values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let kind = field.kind();
        let values = values
            .into_iter()
            .flat_map(|value| match value {
                Value::List(items) if kind.is_single_select() => {
                    items.into_iter().map(Value::Text).collect()
                }
                Value::Text(item) if kind.is_multi_select() => vec![Value::List(vec![item])],
                value => vec![value],
            })
            .collect();
        Restriction::Field {
            field: field.clone(),
            values,
        }
    }

    /// Restricts to exactly the given objects.
    pub fn identity<'a, I>(objects: I) -> Self
    where
        I: IntoIterator<Item = &'a PropertyObject>,
    {
        Restriction::Identity(objects.into_iter().map(PropertyObject::identity_hash).collect())
    }

    /// The class this restriction applies to; `None` for class-agnostic restrictions.
    pub fn scope(&self) -> Option<&ClassReference> {
        match self {
            Restriction::Class(class_ref) => Some(class_ref),
            Restriction::Field { field, .. }
            | Restriction::FieldPresent(field)
            | Restriction::FieldAbsent(field) => Some(field.class_ref()),
            Restriction::Identity(_) | Restriction::Number(_) => None,
        }
    }

    /// Evaluates the restriction on `object`, reading fields through `accessor`.
    pub fn apply(&self, object: &PropertyObject, accessor: &dyn FieldAccessor<PropertyObject>) -> bool {
        match self {
            Restriction::Class(class_ref) => object.class_ref() == class_ref,
            Restriction::Field { field, values } => {
                matches!(read(accessor, object, field), Some(Some(value)) if values.contains(&value))
            }
            Restriction::FieldPresent(field) => {
                matches!(read(accessor, object, field), Some(Some(_)))
            }
            Restriction::FieldAbsent(field) => matches!(read(accessor, object, field), Some(None)),
            Restriction::Identity(hashes) => hashes.contains(&object.identity_hash()),
            Restriction::Number(number) => object.number() == *number,
        }
    }
}

/// `None` when the field cannot be read on `object`.
fn read(
    accessor: &dyn FieldAccessor<PropertyObject>,
    object: &PropertyObject,
    field: &FieldDef,
) -> Option<Option<Value>> {
    match accessor.get(object, field) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::trace!(field = %field, error = %e, "Restriction field unreadable");
            None
        }
    }
}
