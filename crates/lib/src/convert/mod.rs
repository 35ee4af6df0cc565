//! Conversion between structs and property containers.
//!
//! A [`BeanObjectConverter`] copies every field of one class definition from
//! a struct to a [`PropertyObject`] and back. Fields one side does not know
//! are treated as incomplete data: they are logged and skipped, so the other
//! side keeps whatever it already holds for them. Any other field error
//! aborts the conversion.
//!
//! The converter is wired once with an instance supplier and a class
//! definition. Using it before wiring, or wiring it twice, is an error.

use std::sync::{Arc, OnceLock};

use crate::{
    accessor::{BeanAccessor, FieldAccessor, ObjectFieldAccessor},
    class::ClassDefinition,
    field::{FieldAccessError, FieldDef},
    object::PropertyObject,
    value::Value,
};

mod errors;
pub use errors::ConvertError;

type Supplier<B> = Box<dyn Fn() -> B + Send + Sync>;

/// Converts between structs `B` and objects of one class.
pub struct BeanObjectConverter<B> {
    bean_accessor: BeanAccessor<B>,
    object_accessor: ObjectFieldAccessor,
    supplier: OnceLock<Supplier<B>>,
    class_def: OnceLock<Arc<ClassDefinition>>,
}

impl<B> BeanObjectConverter<B> {
    pub fn new(bean_accessor: BeanAccessor<B>) -> Self {
        Self::with_object_accessor(bean_accessor, ObjectFieldAccessor::new())
    }

    pub fn with_object_accessor(
        bean_accessor: BeanAccessor<B>,
        object_accessor: ObjectFieldAccessor,
    ) -> Self {
        Self {
            bean_accessor,
            object_accessor,
            supplier: OnceLock::new(),
            class_def: OnceLock::new(),
        }
    }

    /// Sets the function creating empty structs. Fails if already set.
    pub fn init_supplier<F>(&self, supplier: F) -> Result<(), ConvertError>
    where
        F: Fn() -> B + Send + Sync + 'static,
    {
        self.supplier
            .set(Box::new(supplier))
            .map_err(|_| ConvertError::AlreadyInitialized {
                what: "instance supplier",
            })
    }

    /// Binds the class definition. Fails if already bound.
    pub fn init_class_def(&self, class_def: Arc<ClassDefinition>) -> Result<(), ConvertError> {
        self.class_def
            .set(class_def)
            .map_err(|_| ConvertError::AlreadyInitialized {
                what: "class definition",
            })
    }

    pub fn class_def(&self) -> Result<&Arc<ClassDefinition>, ConvertError> {
        self.class_def.get().ok_or(ConvertError::NotInitialized {
            what: "class definition",
        })
    }

    fn supplier(&self) -> Result<&Supplier<B>, ConvertError> {
        self.supplier.get().ok_or(ConvertError::NotInitialized {
            what: "instance supplier",
        })
    }

    /// Builds a new struct from the fields of `object`.
    pub fn to_bean(&self, object: &PropertyObject) -> Result<B, ConvertError> {
        let class_def = self.bound_class(object)?;
        let mut bean = (self.supplier()?)();
        for field in class_def.fields() {
            if let Some(value) = read(&self.object_accessor, object, field)? {
                write(&self.bean_accessor, &mut bean, field, value)?;
            }
        }
        Ok(bean)
    }

    /// Copies the fields of `bean` onto `object`; returns whether any field changed.
    pub fn apply_to_object(&self, bean: &B, object: &mut PropertyObject) -> Result<bool, ConvertError> {
        let class_def = self.bound_class(object)?;
        let mut changed = false;
        for field in class_def.fields() {
            if let Some(value) = read(&self.bean_accessor, bean, field)? {
                changed |= write(&self.object_accessor, object, field, value)?;
            }
        }
        Ok(changed)
    }

    fn bound_class(&self, object: &PropertyObject) -> Result<&Arc<ClassDefinition>, ConvertError> {
        let class_def = self.class_def()?;
        if class_def.class_ref() != object.class_ref() {
            return Err(ConvertError::ClassMismatch {
                expected: class_def.class_ref().clone(),
                actual: object.class_ref().clone(),
            });
        }
        Ok(class_def)
    }
}

/// `None` when the source does not have `field`.
fn read<T: ?Sized, A: FieldAccessor<T> + ?Sized>(
    accessor: &A,
    instance: &T,
    field: &FieldDef,
) -> Result<Option<Option<Value>>, ConvertError> {
    match accessor.get(instance, field) {
        Ok(value) => Ok(Some(value)),
        Err(FieldAccessError::Missing { target, .. }) => {
            tracing::debug!(field = %field, target = %target, "Field missing on source, skipped");
            Ok(None)
        }
        Err(source) => Err(conversion(field, source)),
    }
}

fn write<T: ?Sized, A: FieldAccessor<T> + ?Sized>(
    accessor: &A,
    instance: &mut T,
    field: &FieldDef,
    value: Option<Value>,
) -> Result<bool, ConvertError> {
    match accessor.set(instance, field, value) {
        Ok(changed) => Ok(changed),
        Err(FieldAccessError::Missing { target, .. }) => {
            tracing::debug!(field = %field, target = %target, "Field missing on target, skipped");
            Ok(false)
        }
        Err(source) => Err(conversion(field, source)),
    }
}

fn conversion(field: &FieldDef, source: FieldAccessError) -> ConvertError {
    ConvertError::Conversion {
        field: field.name().to_string(),
        source,
    }
}

impl<B> std::fmt::Debug for BeanObjectConverter<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeanObjectConverter")
            .field("bean_accessor", &self.bean_accessor)
            .field("class_def", &self.class_def.get().map(|c| c.class_ref()))
            .field("supplier", &self.supplier.get().is_some())
            .finish()
    }
}
