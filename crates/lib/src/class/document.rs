//! Pseudo class describing document-level fields.

use std::sync::LazyLock;

use crate::{
    class::ClassDefinition,
    constants::{DOCUMENT_CLASS_NAME, DOCUMENT_CLASS_SPACE},
    field::{FieldDef, FieldKind, ReferenceConfig},
    reference::{ClassReference, SerializationMode},
};

pub const FIELD_TITLE: &str = "title";
pub const FIELD_CONTENT: &str = "content";
pub const FIELD_PARENT: &str = "parent";
pub const FIELD_HIDDEN: &str = "hidden";
pub const FIELD_DEFAULT_LANGUAGE: &str = "default_language";

static DOCUMENT_CLASS: LazyLock<ClassDefinition> = LazyLock::new(|| {
    ClassDefinition::pseudo(
        ClassReference::new(DOCUMENT_CLASS_SPACE, DOCUMENT_CLASS_NAME),
        |class_ref| {
            vec![
                FieldDef::new(class_ref, FIELD_TITLE, FieldKind::text()),
                FieldDef::new(class_ref, FIELD_CONTENT, FieldKind::LargeText),
                FieldDef::new(
                    class_ref,
                    FIELD_PARENT,
                    FieldKind::Reference(ReferenceConfig::new(SerializationMode::Compact)),
                ),
                FieldDef::new(class_ref, FIELD_HIDDEN, FieldKind::Boolean),
                FieldDef::new(class_ref, FIELD_DEFAULT_LANGUAGE, FieldKind::text()),
            ]
        },
    )
});

/// The pseudo class whose fields are the document-level fields.
pub fn document_class() -> &'static ClassDefinition {
    &DOCUMENT_CLASS
}

/// A document-level field by name.
pub fn document_field(name: &str) -> Option<&'static FieldDef> {
    document_class().field(name)
}
