//! Creation of class documents.
//!
//! For each registered class the creator stores the field schema on the class
//! document when it differs from the definition. A failure on one class is
//! logged and recorded; the remaining classes are still processed.

use indexmap::IndexMap;

use crate::{
    Result,
    class::{ClassDefinition, ClassError, ClassRegistry},
    config::ConfigSource,
    reference::ClassReference,
    store::DocumentStore,
};

/// Outcome of [`ClassCreator::create_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreationReport {
    /// Classes whose schema was written
    pub created: Vec<ClassReference>,
    /// Classes whose stored schema already matched
    pub unchanged: Vec<ClassReference>,
    /// Blacklisted or non-storable classes
    pub skipped: Vec<ClassReference>,
    /// Classes that failed, with the error message
    pub failed: Vec<(ClassReference, String)>,
}

impl CreationReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Writes class schemas to class documents in one wiki.
pub struct ClassCreator<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
    config: &'a dyn ConfigSource,
    wiki: String,
}

impl<'a, S: DocumentStore + ?Sized> ClassCreator<'a, S> {
    pub fn new(store: &'a S, config: &'a dyn ConfigSource, wiki: impl Into<String>) -> Self {
        Self {
            store,
            config,
            wiki: wiki.into(),
        }
    }

    /// Creates or updates every storable, non-blacklisted class of `registry`.
    pub fn create_all(&self, registry: &ClassRegistry) -> CreationReport {
        let mut report = CreationReport::default();
        for class in registry.iter() {
            let class_ref = class.class_ref().clone();
            if !class.is_valid_storage() || class.is_blacklisted(self.config) {
                tracing::info!(class = %class_ref, "Skipping class creation");
                report.skipped.push(class_ref);
                continue;
            }
            match self.create_class(class) {
                Ok(true) => report.created.push(class_ref),
                Ok(false) => report.unchanged.push(class_ref),
                Err(e) => {
                    tracing::warn!(class = %class_ref, error = %e, "Failed to create class");
                    report.failed.push((class_ref, e.to_string()));
                }
            }
        }
        report
    }

    /// Writes the schema of `class` if it changed; returns whether it was saved.
    pub fn create_class(&self, class: &ClassDefinition) -> Result<bool> {
        if !class.is_valid_storage() {
            return Err(ClassError::NotStorable {
                class: class.class_ref().clone(),
                reason: "pseudo classes are never stored".to_string(),
            }
            .into());
        }
        let schema: IndexMap<String, String> = class
            .fields()
            .map(|field| (field.name().to_string(), field.kind().type_token().to_string()))
            .collect();
        let doc_ref = class.class_ref().doc_ref(self.wiki.as_str());
        let mut doc = self.store.get_or_create_document(&doc_ref)?;

        let comment = match doc.class_schema() {
            Some(stored) if stored == &schema => return Ok(false),
            Some(stored) => {
                log_schema_diff(class.class_ref(), stored, &schema);
                "updated class"
            }
            None => {
                tracing::info!(class = %class.class_ref(), fields = schema.len(), "Creating class");
                "created class"
            }
        };
        doc.set_class_schema(schema);
        self.store.save_document(&doc, comment)?;
        Ok(true)
    }
}

fn log_schema_diff(
    class_ref: &ClassReference,
    stored: &IndexMap<String, String>,
    schema: &IndexMap<String, String>,
) {
    for (name, kind) in schema {
        match stored.get(name) {
            None => tracing::info!(class = %class_ref, field = %name, kind = %kind, "Field added"),
            Some(old) if old != kind => {
                tracing::info!(class = %class_ref, field = %name, from = %old, to = %kind, "Field type changed")
            }
            Some(_) => {}
        }
    }
    for name in stored.keys().filter(|name| !schema.contains_key(*name)) {
        tracing::info!(class = %class_ref, field = %name, "Field removed");
    }
}
