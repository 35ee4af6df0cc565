//! Error types for bean conversion.

use thiserror::Error;

use crate::{field::FieldAccessError, reference::ClassReference};

/// Errors raised by [`BeanObjectConverter`](super::BeanObjectConverter).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The converter was used before being initialized
    #[error("Converter {what} is not initialized")]
    NotInitialized { what: &'static str },

    /// The converter was initialized twice
    #[error("Converter {what} is already initialized")]
    AlreadyInitialized { what: &'static str },

    /// The object is not of the class the converter is bound to
    #[error("Cannot convert object of class {actual}, converter is bound to {expected}")]
    ClassMismatch {
        expected: ClassReference,
        actual: ClassReference,
    },

    /// A field could not be read or written
    #[error("Conversion of field '{field}' failed")]
    Conversion {
        field: String,
        #[source]
        source: FieldAccessError,
    },
}

impl ConvertError {
    /// Check if this error is a wiring mistake rather than a data problem
    pub fn is_illegal_state(&self) -> bool {
        matches!(
            self,
            ConvertError::NotInitialized { .. } | ConvertError::AlreadyInitialized { .. }
        )
    }

    /// Get the underlying field error, if any
    pub fn field_error(&self) -> Option<&FieldAccessError> {
        match self {
            ConvertError::Conversion { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConvertError> for crate::Error {
    fn from(err: ConvertError) -> Self {
        crate::Error::Convert(err)
    }
}
