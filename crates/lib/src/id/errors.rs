//! Error types for identifier computation.

use thiserror::Error;

/// Errors raised while computing an object identifier.
///
/// No identifier is produced when any of these is returned; counts are
/// never truncated to fit.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdComputationError {
    /// A disambiguation count was negative
    #[error("Invalid {kind}: negative count {count}")]
    NegativeCount { kind: &'static str, count: i64 },

    /// A disambiguation count does not fit its reserved bits
    #[error("Invalid {kind}: {count} is outside of defined range [0, {limit})")]
    OutOfRange {
        kind: &'static str,
        count: i64,
        limit: u64,
    },

    /// The reserved bit widths leave no room for the document hash
    #[error(
        "Invalid id layout: {collision_bits} collision bits and {ordinal_bits} ordinal bits leave no hash bits"
    )]
    InvalidLayout { collision_bits: u8, ordinal_bits: u8 },
}

impl IdComputationError {
    /// Check if this error was caused by a count argument
    pub fn is_count_error(&self) -> bool {
        matches!(
            self,
            IdComputationError::NegativeCount { .. } | IdComputationError::OutOfRange { .. }
        )
    }
}

impl From<IdComputationError> for crate::Error {
    fn from(err: IdComputationError) -> Self {
        crate::Error::Id(err)
    }
}
