//! Accessor for generic property containers.

use std::sync::Arc;

use crate::{
    accessor::{FieldAccessor, check_accepts, normalize_blank},
    field::{FieldAccessError, FieldDef, FieldKind, FieldResult},
    marshal::{DateMarshaller, DefaultMarshaller, Marshaller, ReferenceMarshaller},
    object::PropertyObject,
    reference::{DefaultReferenceResolver, ReferenceResolver, SerializationMode},
    value::{Value, join_list},
};

/// [`FieldAccessor`] over [`PropertyObject`].
///
/// Values are stored in their raw container form: references and custom
/// values as text, lists as joined text unless the field is a multi-select
/// list. Reads decode raw values back into the field's value type.
#[derive(Debug, Clone)]
pub struct ObjectFieldAccessor {
    resolver: Arc<dyn ReferenceResolver>,
    reference_mode: SerializationMode,
}

impl Default for ObjectFieldAccessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectFieldAccessor {
    pub fn new() -> Self {
        Self {
            resolver: Arc::new(DefaultReferenceResolver),
            reference_mode: SerializationMode::default(),
        }
    }

    /// Uses a host-provided reference resolver.
    pub fn with_resolver(mut self, resolver: Arc<dyn ReferenceResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Mode for reference fields that do not fix their own.
    pub fn with_reference_mode(mut self, mode: SerializationMode) -> Self {
        self.reference_mode = mode;
        self
    }

    pub fn reference_mode(&self) -> SerializationMode {
        self.reference_mode
    }

    fn reference_marshaller(&self, object: &PropertyObject, field: &FieldDef) -> ReferenceMarshaller {
        let mode = match field.kind() {
            FieldKind::Reference(config) => config.mode().unwrap_or(self.reference_mode),
            _ => self.reference_mode,
        };
        ReferenceMarshaller::new(mode)
            .with_resolver(Arc::clone(&self.resolver))
            .with_base(object.doc_ref().clone())
    }

    fn decode(&self, object: &PropertyObject, field: &FieldDef, raw: &Value) -> FieldResult<Option<Value>> {
        let decoded = match (field.kind(), raw) {
            (FieldKind::Reference(_), Value::Text(s)) => self
                .reference_marshaller(object, field)
                .resolve(s)
                .map(Value::Reference),
            (FieldKind::Custom(config), Value::Text(s)) => config.marshaller().resolve(s),
            (FieldKind::Number, Value::Text(s)) => {
                DefaultMarshaller::<i64>::new().resolve(s).map(Value::Int)
            }
            (FieldKind::Boolean, Value::Text(s)) => {
                DefaultMarshaller::<bool>::new().resolve(s).map(Value::Bool)
            }
            (FieldKind::Date { format }, Value::Text(s)) => {
                DateMarshaller::new(format.as_str()).resolve(s).map(Value::Date)
            }
            (kind, value) if kind.accepts(value) => Some(value.clone()),
            (kind, value) => {
                return Err(FieldAccessError::TypeMismatch {
                    field: field.name().to_string(),
                    expected: kind.value_type().to_string(),
                    actual: value.type_name().to_string(),
                });
            }
        };
        Ok(decoded)
    }

    fn encode(&self, object: &PropertyObject, field: &FieldDef, value: Value) -> Option<Value> {
        match (field.kind(), value) {
            (kind, Value::Text(s)) if kind.is_multi_select() => Some(Value::List(vec![s])),
            (kind, Value::List(items)) if kind.is_multi_select() => {
                let items: Vec<String> = items.into_iter().filter(|i| !i.trim().is_empty()).collect();
                (!items.is_empty()).then_some(Value::List(items))
            }
            (_, Value::List(items)) => Some(Value::Text(join_list(&items))),
            (FieldKind::Reference(_), Value::Reference(r)) => {
                Some(Value::Text(self.reference_marshaller(object, field).serialize(&r)))
            }
            (FieldKind::Custom(config), value) => {
                Some(Value::Text(config.marshaller().serialize(&value)))
            }
            (_, value) => Some(value),
        }
    }
}

fn check_declared(object: &PropertyObject, field: &FieldDef) -> FieldResult<()> {
    if field.class_ref() != object.class_ref() || !object.has_field(field.name()) {
        return Err(FieldAccessError::Missing {
            field: field.name().to_string(),
            target: object.class_ref().to_string(),
        });
    }
    Ok(())
}

impl FieldAccessor<PropertyObject> for ObjectFieldAccessor {
    fn get(&self, object: &PropertyObject, field: &FieldDef) -> FieldResult<Option<Value>> {
        check_declared(object, field)?;
        match object.property(field.name()).flatten() {
            Some(raw) => self.decode(object, field, raw),
            None => Ok(None),
        }
    }

    fn set(
        &self,
        object: &mut PropertyObject,
        field: &FieldDef,
        value: Option<Value>,
    ) -> FieldResult<bool> {
        check_declared(object, field)?;
        let raw = match normalize_blank(value) {
            Some(value) => {
                check_accepts(field, &value)?;
                self.encode(object, field, value)
            }
            None => None,
        };
        if object.property(field.name()).flatten() == raw.as_ref() {
            return Ok(false);
        }
        object.set_property(field.name(), raw);
        Ok(true)
    }
}
