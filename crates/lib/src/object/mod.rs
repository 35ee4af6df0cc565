//! Property containers and the documents holding them.
//!
//! A [`PropertyObject`] is a bag of named values tagged with a class. The set
//! of declared fields is fixed when the object is created from its class
//! definition, so reading an undeclared field can be told apart from reading
//! a declared field that is merely unset.
//!
//! A [`Document`] holds objects grouped by class, addressed by
//! `(class, number)`, next to its own document-level fields.

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use indexmap::IndexMap;
use uuid::Uuid;

use crate::{
    class::ClassDefinition,
    id::{IdVersion, ObjectId},
    reference::{ClassReference, DocumentReference},
    value::Value,
};

mod document;
pub use document::Document;

/// A schema-tagged container of named values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyObject {
    doc_ref: DocumentReference,
    class_ref: ClassReference,
    number: u32,
    guid: Uuid,
    properties: IndexMap<String, Option<Value>>,
    id: Option<(ObjectId, IdVersion)>,
}

impl PropertyObject {
    /// Creates an object declaring every field of `class`, all unset.
    pub fn new(doc_ref: DocumentReference, class: &ClassDefinition, number: u32) -> Self {
        Self {
            doc_ref,
            class_ref: class.class_ref().clone(),
            number,
            guid: Uuid::new_v4(),
            properties: class
                .fields()
                .map(|field| (field.name().to_string(), None))
                .collect(),
            id: None,
        }
    }

    /// The document this object belongs to.
    pub fn doc_ref(&self) -> &DocumentReference {
        &self.doc_ref
    }

    pub fn class_ref(&self) -> &ClassReference {
        &self.class_ref
    }

    /// Ordinal number of this object among the objects of its class.
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn guid(&self) -> &Uuid {
        &self.guid
    }

    /// Whether `name` is a declared field of this object.
    pub fn has_field(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Declared field names in class order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Returns `None` for an undeclared field and `Some(None)` for an unset one.
    pub fn property(&self, name: &str) -> Option<Option<&Value>> {
        self.properties.get(name).map(Option::as_ref)
    }

    /// Writes a declared field; returns `false` if `name` is not declared.
    pub fn set_property(&mut self, name: &str, value: Option<Value>) -> bool {
        match self.properties.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Hash identifying this object within a process: document, class and number.
    pub fn identity_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.doc_ref.hash(&mut hasher);
        self.class_ref.hash(&mut hasher);
        self.number.hash(&mut hasher);
        hasher.finish()
    }

    pub fn id(&self) -> Option<ObjectId> {
        self.id.map(|(id, _)| id)
    }

    pub fn id_version(&self) -> Option<IdVersion> {
        self.id.map(|(_, version)| version)
    }

    /// Assigns the identifier computed for this object.
    pub fn set_id(&mut self, id: ObjectId, version: IdVersion) {
        self.id = Some((id, version));
    }

    /// True if the object carries an identifier of the given scheme version.
    pub fn has_valid_id(&self, version: IdVersion) -> bool {
        self.id_version() == Some(version)
    }

    pub(crate) fn set_doc_ref(&mut self, doc_ref: DocumentReference) {
        self.doc_ref = doc_ref;
    }

    pub(crate) fn set_number(&mut self, number: u32) {
        self.number = number;
    }
}
