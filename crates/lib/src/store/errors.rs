//! Error types for the document store and locking collaborators.

use thiserror::Error;

use crate::reference::DocumentReference;

/// Errors raised by [`DocumentStore`](super::DocumentStore) and
/// [`LockService`](super::LockService) implementations.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The document does not exist
    #[error("Document not found: {doc}")]
    DocumentNotFound { doc: DocumentReference },

    /// Saving the document failed
    #[error("Failed to save {doc}: {reason}")]
    SaveFailed {
        doc: DocumentReference,
        reason: String,
    },

    /// Another owner holds the lock
    #[error("Lock '{lock}' on {doc} is held by another owner")]
    LockUnavailable {
        doc: DocumentReference,
        lock: String,
    },

    /// An internal lock was poisoned by a panicking thread
    #[error("Store state poisoned: {resource}")]
    Poisoned { resource: String },
}

impl StoreError {
    /// Check if this error indicates a document was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::DocumentNotFound { .. })
    }

    /// Check if this error is caused by lock contention
    pub fn is_lock_error(&self) -> bool {
        matches!(self, StoreError::LockUnavailable { .. })
    }

    /// Get the document involved, if any
    pub fn doc_ref(&self) -> Option<&DocumentReference> {
        match self {
            StoreError::DocumentNotFound { doc }
            | StoreError::SaveFailed { doc, .. }
            | StoreError::LockUnavailable { doc, .. } => Some(doc),
            StoreError::Poisoned { .. } => None,
        }
    }
}

impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
