//! Error types for reference parsing.

use thiserror::Error;

/// Errors raised while resolving a textual reference.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// The input was empty or only whitespace
    #[error("Cannot resolve an empty reference")]
    Empty,

    /// The input could not be split into wiki, space and name
    #[error("Unparseable reference '{input}': {reason}")]
    Unparseable { input: String, reason: String },

    /// An unknown serialization mode was requested
    #[error("Unknown reference serialization mode '{mode}'")]
    UnknownMode { mode: String },
}

impl ReferenceError {
    /// Check if this error was caused by malformed input
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            ReferenceError::Empty | ReferenceError::Unparseable { .. }
        )
    }

    /// Get the offending input, if any
    pub fn input(&self) -> Option<&str> {
        match self {
            ReferenceError::Unparseable { input, .. } => Some(input),
            _ => None,
        }
    }
}

impl From<ReferenceError> for crate::Error {
    fn from(err: ReferenceError) -> Self {
        crate::Error::Reference(err)
    }
}
