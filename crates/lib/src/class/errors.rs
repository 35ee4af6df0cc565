//! Error types for class definitions and the class registry.

use thiserror::Error;

use crate::reference::ClassReference;

/// Errors raised by class definitions, the registry and class creation.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassError {
    /// A class with the same reference is already registered
    #[error("Class already registered: {class}")]
    DuplicateClass { class: ClassReference },

    /// No class with this reference is registered
    #[error("Unknown class: {class}")]
    UnknownClass { class: ClassReference },

    /// The class may not be stored
    #[error("Class {class} cannot be stored: {reason}")]
    NotStorable {
        class: ClassReference,
        reason: String,
    },
}

impl ClassError {
    /// Check if this error indicates a class was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClassError::UnknownClass { .. })
    }

    /// Check if this error indicates a conflicting registration
    pub fn is_already_exists(&self) -> bool {
        matches!(self, ClassError::DuplicateClass { .. })
    }

    /// Get the class involved
    pub fn class(&self) -> &ClassReference {
        match self {
            ClassError::DuplicateClass { class }
            | ClassError::UnknownClass { class }
            | ClassError::NotStorable { class, .. } => class,
        }
    }
}

impl From<ClassError> for crate::Error {
    fn from(err: ClassError) -> Self {
        crate::Error::Class(err)
    }
}
