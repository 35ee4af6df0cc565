use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::{
    class::ClassDefinition,
    object::PropertyObject,
    reference::{ClassReference, DocumentReference},
    value::Value,
};

/// A document holding document-level fields and objects grouped by class.
///
/// The primary view of a document stores the objects. Translations are
/// secondary views that share the reference but carry a language; objects
/// must never be read from or written to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    doc_ref: DocumentReference,
    language: String,
    default_language: String,
    translation: bool,
    fields: IndexMap<String, Value>,
    objects: IndexMap<ClassReference, BTreeMap<u32, PropertyObject>>,
    class_schema: Option<IndexMap<String, String>>,
}

impl Document {
    /// Creates an empty primary view.
    pub fn new(doc_ref: DocumentReference) -> Self {
        Self {
            doc_ref,
            language: String::new(),
            default_language: String::new(),
            translation: false,
            fields: IndexMap::new(),
            objects: IndexMap::new(),
            class_schema: None,
        }
    }

    /// Creates an empty translation of `doc_ref` in `language`.
    pub fn new_translation(doc_ref: DocumentReference, language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            translation: true,
            ..Self::new(doc_ref)
        }
    }

    pub fn doc_ref(&self) -> &DocumentReference {
        &self.doc_ref
    }

    /// Language of this view; empty for a primary view without explicit language.
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn set_default_language(&mut self, language: impl Into<String>) {
        self.default_language = language.into();
    }

    /// True unless this is a translation.
    pub fn is_primary(&self) -> bool {
        !self.translation
    }

    /// Document-level field value.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Sets or clears a document-level field, returning the previous value.
    pub fn set_field(&mut self, name: impl Into<String>, value: Option<Value>) -> Option<Value> {
        let name = name.into();
        match value {
            Some(value) => self.fields.insert(name, value),
            None => self.fields.shift_remove(&name),
        }
    }

    /// Classes that currently have at least one object, in first-use order.
    pub fn class_refs(&self) -> impl Iterator<Item = &ClassReference> {
        self.objects
            .iter()
            .filter(|(_, objects)| !objects.is_empty())
            .map(|(class_ref, _)| class_ref)
    }

    /// Objects of `class_ref` ordered by number.
    pub fn objects(&self, class_ref: &ClassReference) -> impl Iterator<Item = &PropertyObject> {
        self.objects
            .get(class_ref)
            .into_iter()
            .flat_map(|objects| objects.values())
    }

    pub fn objects_mut(
        &mut self,
        class_ref: &ClassReference,
    ) -> impl Iterator<Item = &mut PropertyObject> {
        self.objects
            .get_mut(class_ref)
            .into_iter()
            .flat_map(|objects| objects.values_mut())
    }

    /// Every object of every class.
    pub fn all_objects(&self) -> impl Iterator<Item = &PropertyObject> {
        self.objects.values().flat_map(|objects| objects.values())
    }

    pub fn object(&self, class_ref: &ClassReference, number: u32) -> Option<&PropertyObject> {
        self.objects.get(class_ref)?.get(&number)
    }

    pub fn object_mut(
        &mut self,
        class_ref: &ClassReference,
        number: u32,
    ) -> Option<&mut PropertyObject> {
        self.objects.get_mut(class_ref)?.get_mut(&number)
    }

    pub fn object_count(&self) -> usize {
        self.objects.values().map(BTreeMap::len).sum()
    }

    /// Adds a new object of `class`, numbered one past the highest existing number.
    pub fn add_object(&mut self, class: &ClassDefinition) -> &mut PropertyObject {
        let objects = self.objects.entry(class.class_ref().clone()).or_default();
        let number = objects.keys().next_back().map_or(0, |n| n + 1);
        let object = PropertyObject::new(self.doc_ref.clone(), class, number);
        objects.entry(number).or_insert(object)
    }

    /// Inserts an existing object, renumbering it if its number is taken.
    pub fn insert_object(&mut self, mut object: PropertyObject) -> &mut PropertyObject {
        object.set_doc_ref(self.doc_ref.clone());
        let objects = self.objects.entry(object.class_ref().clone()).or_default();
        if objects.contains_key(&object.number()) {
            let number = objects.keys().next_back().map_or(0, |n| n + 1);
            object.set_number(number);
        }
        let number = object.number();
        objects.entry(number).or_insert(object)
    }

    pub fn remove_object(
        &mut self,
        class_ref: &ClassReference,
        number: u32,
    ) -> Option<PropertyObject> {
        self.objects.get_mut(class_ref)?.remove(&number)
    }

    /// Schema stored on a class document: field name to type token.
    pub fn class_schema(&self) -> Option<&IndexMap<String, String>> {
        self.class_schema.as_ref()
    }

    pub fn set_class_schema(&mut self, schema: IndexMap<String, String>) {
        self.class_schema = Some(schema);
    }
}
