//! Error types for field definitions and field access.
//!
//! [`FieldAccessError`] separates a field that does not exist on a
//! representation (`Missing`) from a field that exists but could not be read
//! or written. Callers decide per variant whether to tolerate the failure;
//! the converter absorbs `Missing` and propagates everything else.

use thiserror::Error;

/// Result of a field read or write.
///
/// `Ok` carries the value, `Err(Missing)` reports an undefined field and any
/// other error is a genuine access failure.
pub type FieldResult<T> = std::result::Result<T, FieldAccessError>;

/// Errors raised by field accessors.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldAccessError {
    /// The representation has no such field
    #[error("Field '{field}' is not defined on {target}")]
    Missing { field: String, target: String },

    /// The value has the wrong type for the field
    #[error("Type mismatch for field '{field}': expected {expected}, found {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// The field exists but the representation failed to read or write it
    #[error("Failed to access field '{field}': {reason}")]
    Failed { field: String, reason: String },
}

impl FieldAccessError {
    /// Check if the field is absent from the representation
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldAccessError::Missing { .. })
    }

    /// Check if this is an access failure on an existing field
    pub fn is_access_error(&self) -> bool {
        !self.is_missing()
    }

    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(self, FieldAccessError::TypeMismatch { .. })
    }

    /// Get the name of the field involved
    pub fn field(&self) -> &str {
        match self {
            FieldAccessError::Missing { field, .. }
            | FieldAccessError::TypeMismatch { field, .. }
            | FieldAccessError::Failed { field, .. } => field,
        }
    }
}

/// Errors raised while building a field definition.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldDefError {
    /// Field names may not be blank
    #[error("Field name must not be empty (class {class})")]
    EmptyName { class: String },

    /// The validation pattern is not a valid regular expression
    #[error("Invalid validation pattern for field '{field}': {reason}")]
    InvalidPattern { field: String, reason: String },
}

impl From<FieldAccessError> for crate::Error {
    fn from(err: FieldAccessError) -> Self {
        crate::Error::Field(err)
    }
}

impl From<FieldDefError> for crate::Error {
    fn from(err: FieldDefError) -> Self {
        crate::Error::FieldDef(err)
    }
}
