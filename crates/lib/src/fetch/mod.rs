//! Querying and editing the objects of a document.
//!
//! [`ObjectFetcher`] evaluates an [`ObjectQuery`](crate::query::ObjectQuery)
//! against a document through an [`ObjectBridge`](crate::bridge::ObjectBridge).
//! [`ObjectEditor`] does the same on a mutable document and adds creation,
//! field edits and deletion. Both build their query through
//! [`QueryBuilder`](crate::query::QueryBuilder).
//!
//! Only the classes named by the query are scanned; a query without class
//! restrictions scans every class present on the document.

mod editor;
mod errors;
mod fetcher;

pub use editor::{FieldEditor, ObjectEditor};
pub use errors::FetchError;
pub use fetcher::ObjectFetcher;
