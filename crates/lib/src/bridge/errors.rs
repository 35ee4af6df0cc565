//! Error types for object bridges.

use thiserror::Error;

use crate::reference::{ClassReference, DocumentReference};

/// Errors raised by [`ObjectBridge`](super::ObjectBridge) implementations.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// Objects were requested from a translation instead of the primary view
    #[error("Objects of {doc} are only held by the primary document, not the '{language}' translation")]
    NotPrimaryDocument {
        doc: DocumentReference,
        language: String,
    },

    /// The bridge does not support the operation
    #[error("Operation not supported by this bridge: {operation}")]
    UnsupportedOperation { operation: &'static str },

    /// The class is not registered
    #[error("Unknown class: {class}")]
    UnknownClass { class: ClassReference },
}

impl BridgeError {
    /// Check if this error is a violated call precondition
    pub fn is_precondition(&self) -> bool {
        matches!(self, BridgeError::NotPrimaryDocument { .. })
    }

    /// Check if this error indicates a class was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, BridgeError::UnknownClass { .. })
    }
}

impl From<BridgeError> for crate::Error {
    fn from(err: BridgeError) -> Self {
        crate::Error::Bridge(err)
    }
}
