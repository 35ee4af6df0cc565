//! Accessor for plain Rust structs.
//!
//! Struct fields are reached through an explicit table of getter and setter
//! functions, keyed by the accessor name derived from the field name
//! (see [`accessor_name`]). A field without a registered entry is missing.

use std::{any::type_name, collections::HashMap, fmt, sync::Arc};

use crate::{
    accessor::FieldAccessor,
    field::{FieldAccessError, FieldDef, FieldResult, accessor_name},
    value::{FieldValue, Value},
};

type Getter<B> = Box<dyn Fn(&B) -> Option<Value> + Send + Sync>;

/// Writes a value; `Ok(false)` if it equals the current one, `Err(type)` if its type is wrong.
type Setter<B> = Box<dyn Fn(&mut B, Option<Value>) -> Result<bool, &'static str> + Send + Sync>;

struct BeanProperty<B> {
    type_name: &'static str,
    get: Getter<B>,
    set: Setter<B>,
}

/// [`FieldAccessor`] over a struct `B`.
///
/// ```
/// # use wikimodel::{ClassReference, accessor::{BeanAccessor, FieldAccessor}, field::{FieldDef, FieldKind}, Value};
/// #[derive(Default)]
/// struct MenuItem {
///     label: Option<String>,
/// }
///
/// let accessor = BeanAccessor::<MenuItem>::new()
///     .property("label", |item| item.label.clone(), |item, label| item.label = label);
/// let field = FieldDef::new(&ClassReference::new("Menu", "ItemClass"), "label", FieldKind::text());
///
/// let mut item = MenuItem::default();
/// assert!(accessor.set(&mut item, &field, Some(Value::from("Home"))).unwrap());
/// assert_eq!(item.label.as_deref(), Some("Home"));
/// ```
pub struct BeanAccessor<B> {
    properties: HashMap<String, BeanProperty<B>>,
}

impl<B> Default for BeanAccessor<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> BeanAccessor<B> {
    pub fn new() -> Self {
        Self {
            properties: HashMap::new(),
        }
    }

    /// Registers the getter and setter backing the field `field_name`.
    pub fn property<T, G, S>(mut self, field_name: &str, get: G, set: S) -> Self
    where
        T: FieldValue + PartialEq + 'static,
        G: Fn(&B) -> Option<T> + Send + Sync + 'static,
        S: Fn(&mut B, Option<T>) + Send + Sync + 'static,
        B: 'static,
    {
        let get = Arc::new(get);
        let read = Arc::clone(&get);
        let property = BeanProperty {
            type_name: T::TYPE_NAME,
            get: Box::new(move |bean| (*read)(bean).map(FieldValue::into_value)),
            set: Box::new(move |bean, value| {
                let typed = match value {
                    Some(value) => {
                        let actual = value.type_name();
                        Some(T::from_value(value).ok_or(actual)?)
                    }
                    None => None,
                };
                if (*get)(bean) == typed {
                    return Ok(false);
                }
                set(bean, typed);
                Ok(true)
            }),
        };
        self.properties.insert(accessor_name(field_name), property);
        self
    }

    /// Whether a property backs the field `field_name`.
    pub fn has_property(&self, field_name: &str) -> bool {
        self.properties.contains_key(&accessor_name(field_name))
    }

    fn lookup(&self, field: &FieldDef) -> FieldResult<&BeanProperty<B>> {
        self.properties
            .get(&accessor_name(field.name()))
            .ok_or_else(|| FieldAccessError::Missing {
                field: field.name().to_string(),
                target: type_name::<B>().to_string(),
            })
    }
}

impl<B> FieldAccessor<B> for BeanAccessor<B> {
    fn get(&self, bean: &B, field: &FieldDef) -> FieldResult<Option<Value>> {
        let property = self.lookup(field)?;
        Ok((property.get)(bean))
    }

    fn set(&self, bean: &mut B, field: &FieldDef, value: Option<Value>) -> FieldResult<bool> {
        let property = self.lookup(field)?;
        let value = match value {
            Some(Value::List(mut items)) if field.kind().is_single_select() && items.len() <= 1 => {
                items.pop().map(Value::Text)
            }
            value => value,
        };
        (property.set)(bean, value).map_err(|actual| FieldAccessError::TypeMismatch {
            field: field.name().to_string(),
            expected: property.type_name.to_string(),
            actual: actual.to_string(),
        })
    }
}

impl<B> fmt::Debug for BeanAccessor<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.properties.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("BeanAccessor")
            .field("bean", &type_name::<B>())
            .field("properties", &names)
            .finish()
    }
}
