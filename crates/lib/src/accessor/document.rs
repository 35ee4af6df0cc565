//! Accessor for document-level fields.

use crate::{
    accessor::{FieldAccessor, check_accepts, normalize_blank},
    class::{FIELD_DEFAULT_LANGUAGE, document_class},
    field::{FieldAccessError, FieldDef, FieldResult},
    object::Document,
    value::{Value, join_list},
};

/// [`FieldAccessor`] over the fields of [`document_class`] on a [`Document`].
///
/// Any field of another class is reported missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentFieldAccessor;

impl DocumentFieldAccessor {
    pub fn new() -> Self {
        Self
    }
}

fn check_document_field(field: &FieldDef) -> FieldResult<()> {
    let class = document_class();
    if field.class_ref() != class.class_ref() || !class.has_field(field.name()) {
        return Err(FieldAccessError::Missing {
            field: field.name().to_string(),
            target: "document".to_string(),
        });
    }
    Ok(())
}

impl FieldAccessor<Document> for DocumentFieldAccessor {
    fn get(&self, doc: &Document, field: &FieldDef) -> FieldResult<Option<Value>> {
        check_document_field(field)?;
        if field.name() == FIELD_DEFAULT_LANGUAGE {
            let lang = doc.default_language();
            return Ok((!lang.is_empty()).then(|| Value::Text(lang.to_string())));
        }
        Ok(doc.field(field.name()).cloned())
    }

    fn set(&self, doc: &mut Document, field: &FieldDef, value: Option<Value>) -> FieldResult<bool> {
        check_document_field(field)?;
        let value = match normalize_blank(value) {
            Some(value) => {
                check_accepts(field, &value)?;
                match value {
                    Value::List(items) => Some(Value::Text(join_list(&items))),
                    value => Some(value),
                }
            }
            None => None,
        };
        if self.get(doc, field)? == value {
            return Ok(false);
        }
        if field.name() == FIELD_DEFAULT_LANGUAGE {
            let lang = value.map(|v| v.to_raw_string()).unwrap_or_default();
            doc.set_default_language(lang);
        } else {
            doc.set_field(field.name(), value);
        }
        Ok(true)
    }
}
