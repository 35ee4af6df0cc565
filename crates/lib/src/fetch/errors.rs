//! Error types for fetching and editing objects.

use thiserror::Error;

/// Errors raised by [`ObjectFetcher`](super::ObjectFetcher) and
/// [`ObjectEditor`](super::ObjectEditor).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// A unique object was requested but several matched
    #[error("Expected at most one matching object, found {count}")]
    NotUnique { count: usize },

    /// Objects can only be created for classes named by the query
    #[error("Query does not reference any class to create objects of")]
    NoClass,
}

impl FetchError {
    /// Check if the query matched more objects than allowed
    pub fn is_not_unique(&self) -> bool {
        matches!(self, FetchError::NotUnique { .. })
    }
}

impl From<FetchError> for crate::Error {
    fn from(err: FetchError) -> Self {
        crate::Error::Fetch(err)
    }
}
