//! In-memory document store.

use std::{collections::HashMap, sync::RwLock};

use crate::{
    Result,
    config::ConfigSource,
    constants::CONFIG_DEFAULT_LANGUAGE,
    object::Document,
    reference::DocumentReference,
    store::{DocumentStore, StoreError},
};

/// A [`DocumentStore`] keeping documents in a `HashMap`.
///
/// Each save replaces the stored copy and records its change comment. New
/// documents start with the store's default language.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: RwLock<HashMap<DocumentReference, Document>>,
    history: RwLock<HashMap<DocumentReference, Vec<String>>>,
    default_language: String,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose new documents take the language configured under
    /// [`CONFIG_DEFAULT_LANGUAGE`].
    pub fn from_config(config: &dyn ConfigSource) -> Self {
        Self::new().with_default_language(config.get_property(CONFIG_DEFAULT_LANGUAGE, ""))
    }

    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Change comments recorded for `doc_ref`, oldest first.
    pub fn history(&self, doc_ref: &DocumentReference) -> Result<Vec<String>> {
        let history = self.history.read().map_err(|_| poisoned("history"))?;
        Ok(history.get(doc_ref).cloned().unwrap_or_default())
    }

    /// Number of stored documents.
    pub fn len(&self) -> Result<usize> {
        let documents = self.documents.read().map_err(|_| poisoned("documents"))?;
        Ok(documents.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

fn poisoned(resource: &str) -> StoreError {
    StoreError::Poisoned {
        resource: resource.to_string(),
    }
}

impl DocumentStore for InMemoryStore {
    fn exists(&self, doc_ref: &DocumentReference) -> Result<bool> {
        let documents = self.documents.read().map_err(|_| poisoned("documents"))?;
        Ok(documents.contains_key(doc_ref))
    }

    fn get_or_create_document(&self, doc_ref: &DocumentReference) -> Result<Document> {
        let documents = self.documents.read().map_err(|_| poisoned("documents"))?;
        Ok(documents.get(doc_ref).cloned().unwrap_or_else(|| {
            let mut doc = Document::new(doc_ref.clone());
            doc.set_default_language(self.default_language.as_str());
            doc
        }))
    }

    fn save_document(&self, doc: &Document, comment: &str) -> Result<()> {
        if !doc.is_primary() {
            return Err(StoreError::SaveFailed {
                doc: doc.doc_ref().clone(),
                reason: "translations are not stored by the in-memory store".to_string(),
            }
            .into());
        }
        {
            let mut documents = self.documents.write().map_err(|_| poisoned("documents"))?;
            documents.insert(doc.doc_ref().clone(), doc.clone());
        }
        let mut history = self.history.write().map_err(|_| poisoned("history"))?;
        history
            .entry(doc.doc_ref().clone())
            .or_default()
            .push(comment.to_string());
        tracing::debug!(doc = %doc.doc_ref(), comment, "Saved document");
        Ok(())
    }
}
