//! Object bridges.
//!
//! An [`ObjectBridge`] is the capability set fetchers and editors use to
//! reach the objects of a document: enumerate classes, list objects of a
//! class, create, clone and delete objects, and hand out field accessors.
//!
//! [`DocumentBridge`] works on live [`Document`]s. [`EmptyBridge`] reports no
//! classes and no objects at all and backs the always-empty fetcher.

use std::{fmt, sync::Arc};

use crate::{
    accessor::{DocumentFieldAccessor, FieldAccessor, ObjectFieldAccessor},
    class::ClassRegistry,
    config::ConfigSource,
    constants::{CONFIG_REFERENCE_MODE, DEFAULT_REFERENCE_MODE},
    object::{Document, PropertyObject},
    reference::{ClassReference, ReferenceResolver, SerializationMode},
};

mod errors;
pub use errors::BridgeError;

/// Access to the objects held by documents.
pub trait ObjectBridge: Send + Sync + fmt::Debug {
    /// Classes with at least one object on `doc`.
    fn get_doc_classes(&self, doc: &Document) -> Vec<ClassReference>;

    /// Objects of `class_ref` on the primary view `doc`, ordered by number.
    fn get_objects<'d>(
        &self,
        doc: &'d Document,
        class_ref: &ClassReference,
    ) -> Result<Vec<&'d PropertyObject>, BridgeError>;

    fn get_objects_mut<'d>(
        &self,
        doc: &'d mut Document,
        class_ref: &ClassReference,
    ) -> Result<Vec<&'d mut PropertyObject>, BridgeError>;

    fn get_object_class<'o>(&self, object: &'o PropertyObject) -> &'o ClassReference {
        object.class_ref()
    }

    fn get_object_number(&self, object: &PropertyObject) -> u32 {
        object.number()
    }

    /// Independent copy of `object`, including its document reference.
    fn clone_object(&self, object: &PropertyObject) -> PropertyObject {
        object.clone()
    }

    /// Adds a new, unset object of `class_ref` to `doc`. No identifier is assigned.
    fn create_object<'d>(
        &self,
        doc: &'d mut Document,
        class_ref: &ClassReference,
    ) -> Result<&'d mut PropertyObject, BridgeError>;

    /// Removes the object `(class_ref, number)`, returning it if it existed.
    fn delete_object(
        &self,
        doc: &mut Document,
        class_ref: &ClassReference,
        number: u32,
    ) -> Result<Option<PropertyObject>, BridgeError>;

    fn document_field_accessor(&self) -> &dyn FieldAccessor<Document>;

    fn object_field_accessor(&self) -> &dyn FieldAccessor<PropertyObject>;
}

fn require_primary(doc: &Document) -> Result<(), BridgeError> {
    if doc.is_primary() {
        Ok(())
    } else {
        Err(BridgeError::NotPrimaryDocument {
            doc: doc.doc_ref().clone(),
            language: doc.language().to_string(),
        })
    }
}

/// Bridge over live documents, creating objects from a class registry.
#[derive(Debug, Clone)]
pub struct DocumentBridge {
    registry: Arc<ClassRegistry>,
    object_accessor: ObjectFieldAccessor,
    document_accessor: DocumentFieldAccessor,
}

impl DocumentBridge {
    pub fn new(registry: Arc<ClassRegistry>) -> Self {
        Self {
            registry,
            object_accessor: ObjectFieldAccessor::new(),
            document_accessor: DocumentFieldAccessor::new(),
        }
    }

    /// Bridge whose reference fields follow the mode configured under
    /// [`CONFIG_REFERENCE_MODE`].
    pub fn from_config(registry: Arc<ClassRegistry>, config: &dyn ConfigSource) -> crate::Result<Self> {
        let mode: SerializationMode = config
            .get_property(CONFIG_REFERENCE_MODE, DEFAULT_REFERENCE_MODE)
            .parse()?;
        Ok(Self::new(registry).with_reference_mode(mode))
    }

    /// Resolves reference fields with a host-provided resolver.
    pub fn with_resolver(mut self, resolver: Arc<dyn ReferenceResolver>) -> Self {
        self.object_accessor = self.object_accessor.with_resolver(resolver);
        self
    }

    /// Stores reference fields without an explicit mode in `mode`.
    pub fn with_reference_mode(mut self, mode: SerializationMode) -> Self {
        self.object_accessor = self.object_accessor.with_reference_mode(mode);
        self
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }
}

impl ObjectBridge for DocumentBridge {
    fn get_doc_classes(&self, doc: &Document) -> Vec<ClassReference> {
        doc.class_refs().cloned().collect()
    }

    fn get_objects<'d>(
        &self,
        doc: &'d Document,
        class_ref: &ClassReference,
    ) -> Result<Vec<&'d PropertyObject>, BridgeError> {
        require_primary(doc)?;
        Ok(doc.objects(class_ref).collect())
    }

    fn get_objects_mut<'d>(
        &self,
        doc: &'d mut Document,
        class_ref: &ClassReference,
    ) -> Result<Vec<&'d mut PropertyObject>, BridgeError> {
        require_primary(doc)?;
        Ok(doc.objects_mut(class_ref).collect())
    }

    fn create_object<'d>(
        &self,
        doc: &'d mut Document,
        class_ref: &ClassReference,
    ) -> Result<&'d mut PropertyObject, BridgeError> {
        require_primary(doc)?;
        let class = self
            .registry
            .get(class_ref)
            .ok_or_else(|| BridgeError::UnknownClass {
                class: class_ref.clone(),
            })?;
        let object = doc.add_object(class);
        tracing::debug!(doc = %object.doc_ref(), class = %class_ref, number = object.number(), "Created object");
        Ok(object)
    }

    fn delete_object(
        &self,
        doc: &mut Document,
        class_ref: &ClassReference,
        number: u32,
    ) -> Result<Option<PropertyObject>, BridgeError> {
        require_primary(doc)?;
        let removed = doc.remove_object(class_ref, number);
        if removed.is_some() {
            tracing::debug!(doc = %doc.doc_ref(), class = %class_ref, number, "Deleted object");
        }
        Ok(removed)
    }

    fn document_field_accessor(&self) -> &dyn FieldAccessor<Document> {
        &self.document_accessor
    }

    fn object_field_accessor(&self) -> &dyn FieldAccessor<PropertyObject> {
        &self.object_accessor
    }
}

/// Bridge that never reports any class or object.
#[derive(Debug, Clone, Default)]
pub struct EmptyBridge {
    object_accessor: ObjectFieldAccessor,
    document_accessor: DocumentFieldAccessor,
}

impl EmptyBridge {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ObjectBridge for EmptyBridge {
    fn get_doc_classes(&self, _doc: &Document) -> Vec<ClassReference> {
        Vec::new()
    }

    fn get_objects<'d>(
        &self,
        _doc: &'d Document,
        _class_ref: &ClassReference,
    ) -> Result<Vec<&'d PropertyObject>, BridgeError> {
        Ok(Vec::new())
    }

    fn get_objects_mut<'d>(
        &self,
        _doc: &'d mut Document,
        _class_ref: &ClassReference,
    ) -> Result<Vec<&'d mut PropertyObject>, BridgeError> {
        Ok(Vec::new())
    }

    fn create_object<'d>(
        &self,
        _doc: &'d mut Document,
        _class_ref: &ClassReference,
    ) -> Result<&'d mut PropertyObject, BridgeError> {
        Err(BridgeError::UnsupportedOperation {
            operation: "create_object",
        })
    }

    fn delete_object(
        &self,
        _doc: &mut Document,
        _class_ref: &ClassReference,
        _number: u32,
    ) -> Result<Option<PropertyObject>, BridgeError> {
        Ok(None)
    }

    fn document_field_accessor(&self) -> &dyn FieldAccessor<Document> {
        &self.document_accessor
    }

    fn object_field_accessor(&self) -> &dyn FieldAccessor<PropertyObject> {
        &self.object_accessor
    }
}
