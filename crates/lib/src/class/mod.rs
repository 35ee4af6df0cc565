//! Class definitions.
//!
//! A [`ClassDefinition`] is the schema of a kind of object: a class reference
//! and an ordered set of uniquely named fields. Definitions are created once
//! at startup and shared for the lifetime of the process. The field list is
//! produced by an initializer on first access and memoized.

use std::{fmt, sync::OnceLock};

use indexmap::IndexMap;

use crate::{
    config::ConfigSource, constants::CONFIG_CLASS_BLACKLIST, field::FieldDef,
    reference::ClassReference,
};

mod creator;
mod document;
mod errors;
mod registry;

pub use creator::{ClassCreator, CreationReport};
pub use document::{
    FIELD_CONTENT, FIELD_DEFAULT_LANGUAGE, FIELD_HIDDEN, FIELD_PARENT, FIELD_TITLE,
    document_class, document_field,
};
pub use errors::ClassError;
pub use registry::ClassRegistry;

type FieldInit = Box<dyn Fn(&ClassReference) -> Vec<FieldDef> + Send + Sync>;

/// Whether a definition describes a storable class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    /// Stored on a class document
    Standard,
    /// Describes fields that are not backed by a class document
    Pseudo,
}

/// Schema of a class of objects.
///
/// ```
/// # use wikimodel::{ClassReference, class::ClassDefinition, field::{FieldDef, FieldKind}};
/// let class = ClassDefinition::new(ClassReference::new("Blog", "PostClass"), |class_ref| {
///     vec![
///         FieldDef::new(class_ref, "title", FieldKind::text()),
///         FieldDef::new(class_ref, "published", FieldKind::Boolean),
///     ]
/// });
/// let names: Vec<_> = class.fields().map(|f| f.name()).collect();
/// assert_eq!(names, ["title", "published"]);
/// ```
pub struct ClassDefinition {
    class_ref: ClassReference,
    kind: ClassKind,
    internal_mapping: bool,
    init: FieldInit,
    fields: OnceLock<IndexMap<String, FieldDef>>,
}

impl ClassDefinition {
    /// Creates a storable class whose fields are produced by `init`.
    pub fn new<F>(class_ref: ClassReference, init: F) -> Self
    where
        F: Fn(&ClassReference) -> Vec<FieldDef> + Send + Sync + 'static,
    {
        Self {
            class_ref,
            kind: ClassKind::Standard,
            internal_mapping: false,
            init: Box::new(init),
            fields: OnceLock::new(),
        }
    }

    /// Creates a pseudo class. Pseudo classes are never stored nor blacklisted.
    pub fn pseudo<F>(class_ref: ClassReference, init: F) -> Self
    where
        F: Fn(&ClassReference) -> Vec<FieldDef> + Send + Sync + 'static,
    {
        Self {
            kind: ClassKind::Pseudo,
            ..Self::new(class_ref, init)
        }
    }

    /// Marks the class as mapped to its own storage table by the host.
    pub fn with_internal_mapping(mut self, internal_mapping: bool) -> Self {
        self.internal_mapping = internal_mapping;
        self
    }

    pub fn class_ref(&self) -> &ClassReference {
        &self.class_ref
    }

    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    pub fn is_pseudo(&self) -> bool {
        self.kind == ClassKind::Pseudo
    }

    pub fn is_internal_mapping(&self) -> bool {
        self.internal_mapping
    }

    /// Whether the class may be persisted on a class document.
    pub fn is_valid_storage(&self) -> bool {
        !self.is_pseudo()
    }

    /// Whether configuration excludes this class from creation.
    pub fn is_blacklisted(&self, config: &dyn ConfigSource) -> bool {
        if self.is_pseudo() {
            return false;
        }
        let name = self.class_ref.to_string();
        config
            .get_property(CONFIG_CLASS_BLACKLIST, "")
            .split(',')
            .map(str::trim)
            .any(|entry| entry == name)
    }

    /// Fields in definition order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.field_map().values()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.field_map().get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field_map().contains_key(name)
    }

    pub fn field_count(&self) -> usize {
        self.field_map().len()
    }

    fn field_map(&self) -> &IndexMap<String, FieldDef> {
        self.fields.get_or_init(|| {
            let mut map = IndexMap::new();
            for field in (self.init)(&self.class_ref) {
                if field.class_ref() != &self.class_ref {
                    tracing::warn!(
                        class = %self.class_ref,
                        field = %field,
                        "Ignoring field defined for another class"
                    );
                    continue;
                }
                if map.contains_key(field.name()) {
                    tracing::warn!(
                        class = %self.class_ref,
                        field = field.name(),
                        "Ignoring duplicate field name"
                    );
                    continue;
                }
                map.insert(field.name().to_string(), field);
            }
            tracing::debug!(class = %self.class_ref, fields = map.len(), "Computed class fields");
            map
        })
    }
}

impl fmt::Debug for ClassDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDefinition")
            .field("class_ref", &self.class_ref)
            .field("kind", &self.kind)
            .field("internal_mapping", &self.internal_mapping)
            .field("fields", &self.fields.get().map(|m| m.keys().collect::<Vec<_>>()))
            .finish()
    }
}
