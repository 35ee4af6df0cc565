//! Contracts of the external document store and locking service.
//!
//! Persistence is never done by the model itself. A host platform provides
//! a [`DocumentStore`] and a [`LockService`]; the in-memory implementations
//! here serve tests and embedded use.

use crate::{Result, object::Document, reference::DocumentReference};

mod errors;
mod in_memory;
mod locks;

pub use errors::StoreError;
pub use in_memory::InMemoryStore;
pub use locks::InMemoryLocks;

/// Loads and saves documents.
pub trait DocumentStore: Send + Sync {
    fn exists(&self, doc_ref: &DocumentReference) -> Result<bool>;

    /// Loads the primary view of `doc_ref`, or a new empty document.
    fn get_or_create_document(&self, doc_ref: &DocumentReference) -> Result<Document>;

    fn save_document(&self, doc: &Document, comment: &str) -> Result<()>;
}

/// Document-level mutual exclusion.
///
/// Locks expire on their own after a time-to-live owned by the service.
pub trait LockService: Send + Sync {
    /// Acquires `lock_name` on `doc_ref` for the current owner; `false` if held elsewhere.
    fn try_lock(&self, doc_ref: &DocumentReference, lock_name: &str) -> Result<bool>;

    /// Releases the lock if the current owner holds it.
    fn unlock_by_owner(&self, doc_ref: &DocumentReference, lock_name: &str) -> Result<bool>;
}

/// Loads `doc_ref` under a lock, applies `edit` and saves when it reports a change.
///
/// The lock is released whether or not the edit succeeds. Returns whether the
/// document was saved.
pub fn edit_document<S, L, F>(
    store: &S,
    locks: &L,
    doc_ref: &DocumentReference,
    comment: &str,
    edit: F,
) -> Result<bool>
where
    S: DocumentStore + ?Sized,
    L: LockService + ?Sized,
    F: FnOnce(&mut Document) -> Result<bool>,
{
    const LOCK_NAME: &str = "edit";
    if !locks.try_lock(doc_ref, LOCK_NAME)? {
        return Err(StoreError::LockUnavailable {
            doc: doc_ref.clone(),
            lock: LOCK_NAME.to_string(),
        }
        .into());
    }

    let result = store.get_or_create_document(doc_ref).and_then(|mut doc| {
        if edit(&mut doc)? {
            store.save_document(&doc, comment)?;
            Ok(true)
        } else {
            Ok(false)
        }
    });

    if let Err(e) = locks.unlock_by_owner(doc_ref, LOCK_NAME) {
        tracing::warn!(doc = %doc_ref, error = %e, "Failed to release edit lock");
    }
    result
}
