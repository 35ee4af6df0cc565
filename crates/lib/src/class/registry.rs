//! Registry of class definitions.
//!
//! The registry is built once at startup and handed to every consumer that
//! needs to look up a class; there is no ambient global lookup.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{
    class::{ClassDefinition, ClassError},
    reference::ClassReference,
};

/// Class definitions keyed by class reference, in registration order.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: IndexMap<ClassReference, Arc<ClassDefinition>>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition; a second definition for the same class is rejected.
    pub fn register(
        &mut self,
        definition: ClassDefinition,
    ) -> Result<Arc<ClassDefinition>, ClassError> {
        let class_ref = definition.class_ref().clone();
        if self.classes.contains_key(&class_ref) {
            return Err(ClassError::DuplicateClass { class: class_ref });
        }
        let definition = Arc::new(definition);
        self.classes.insert(class_ref, Arc::clone(&definition));
        Ok(definition)
    }

    pub fn get(&self, class_ref: &ClassReference) -> Option<&Arc<ClassDefinition>> {
        self.classes.get(class_ref)
    }

    /// Like [`get`](Self::get) but reports unknown classes as an error.
    pub fn require(&self, class_ref: &ClassReference) -> Result<&Arc<ClassDefinition>, ClassError> {
        self.get(class_ref).ok_or_else(|| ClassError::UnknownClass {
            class: class_ref.clone(),
        })
    }

    /// Looks a class up by its `Space.Name` form.
    pub fn get_by_name(&self, name: &str) -> Option<&Arc<ClassDefinition>> {
        let class_ref = ClassReference::parse(name).ok()?;
        self.get(&class_ref)
    }

    pub fn contains(&self, class_ref: &ClassReference) -> bool {
        self.classes.contains_key(class_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ClassDefinition>> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
