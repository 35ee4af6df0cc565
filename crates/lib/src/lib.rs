//!
//! Wikimodel: a typed object model over schema-tagged property containers.
//! This library maps plain Rust structs onto the generic objects stored in
//! wiki documents, and queries and edits those objects through typed field
//! definitions.
//!
//! ## Core Concepts
//!
//! * **Field definitions (`field::FieldDef`)**: A named, typed attribute of a class. The kind of a field (`field::FieldKind`) is a tagged variant carrying its own configuration.
//! * **Class definitions (`class::ClassDefinition`)**: The ordered, uniquely named field set of a class, held in an explicit `class::ClassRegistry`.
//! * **Objects and documents (`object::PropertyObject`, `object::Document`)**: Property containers tagged with a class, grouped by class inside documents.
//! * **Field accessors (`accessor::FieldAccessor`)**: Read and write one field on one representation, separating missing fields from unset ones.
//! * **Marshallers (`marshal::Marshaller`)**: Bidirectional string conversion for single value types.
//! * **Converters (`convert::BeanObjectConverter`)**: Copy a whole class worth of fields between a struct and an object.
//! * **Queries (`query::ObjectQuery`)**: Sets of restrictions combined with AND, scoped per class.
//! * **Bridges, fetchers and editors (`bridge`, `fetch`)**: Evaluate queries against documents and create, edit or delete the matching objects.
//! * **Identifiers (`id::IdComputer`)**: Deterministic 64-bit object identifiers packed from an MD5 document hash and two disambiguation counts.
//!
//! Persistence, locking and configuration are provided by the host through
//! the traits in `store` and `config`.

pub mod accessor;
pub mod bridge;
pub mod class;
pub mod config;
pub mod constants;
pub mod convert;
pub mod fetch;
pub mod field;
pub mod id;
pub mod marshal;
pub mod object;
pub mod query;
pub mod reference;
pub mod store;
pub mod value;

/// Re-export the reference types for easier access.
pub use reference::{ClassReference, DocumentReference};
/// Re-export the value type for easier access.
pub use value::Value;

/// Result type used throughout the Wikimodel library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Wikimodel library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured reference errors from the reference module
    #[error(transparent)]
    Reference(reference::ReferenceError),

    /// Field access errors from the accessor implementations
    #[error(transparent)]
    Field(field::FieldAccessError),

    /// Field definition errors from the field builder
    #[error(transparent)]
    FieldDef(field::FieldDefError),

    /// Structured class errors from the class module
    #[error(transparent)]
    Class(class::ClassError),

    /// Structured conversion errors from the convert module
    #[error(transparent)]
    Convert(convert::ConvertError),

    /// Structured identifier errors from the id module
    #[error(transparent)]
    Id(id::IdComputationError),

    /// Structured bridge errors from the bridge module
    #[error(transparent)]
    Bridge(bridge::BridgeError),

    /// Structured fetch errors from the fetch module
    #[error(transparent)]
    Fetch(fetch::FetchError),

    /// Structured store errors from the store module
    #[error(transparent)]
    Store(store::StoreError),

    /// Structured configuration errors from the config module
    #[error(transparent)]
    Config(config::ConfigError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Reference(_) => "reference",
            Error::Field(_) | Error::FieldDef(_) => "field",
            Error::Class(_) => "class",
            Error::Convert(_) => "convert",
            Error::Id(_) => "id",
            Error::Bridge(_) => "bridge",
            Error::Fetch(_) => "fetch",
            Error::Store(_) => "store",
            Error::Config(_) => "config",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Class(class_err) => class_err.is_not_found(),
            Error::Bridge(bridge_err) => bridge_err.is_not_found(),
            Error::Store(store_err) => store_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error reports a field the representation does not have.
    pub fn is_field_missing(&self) -> bool {
        match self {
            Error::Field(field_err) => field_err.is_missing(),
            Error::Convert(convert_err) => convert_err.field_error().is_some_and(|e| e.is_missing()),
            _ => false,
        }
    }

    /// Check if this error is a failed access to an existing field.
    pub fn is_field_access_error(&self) -> bool {
        match self {
            Error::Field(field_err) => field_err.is_access_error(),
            Error::Convert(convert_err) => convert_err.field_error().is_some(),
            _ => false,
        }
    }

    /// Check if this error is type-related.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Field(field_err) => field_err.is_type_error(),
            Error::Convert(convert_err) => convert_err.field_error().is_some_and(|e| e.is_type_error()),
            _ => false,
        }
    }

    /// Check if this error is a wiring mistake such as using an uninitialized converter.
    pub fn is_illegal_state(&self) -> bool {
        match self {
            Error::Convert(convert_err) => convert_err.is_illegal_state(),
            _ => false,
        }
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::Class(class_err) => class_err.is_already_exists(),
            _ => false,
        }
    }

    /// Check if this error is a violated call precondition.
    pub fn is_precondition(&self) -> bool {
        match self {
            Error::Bridge(bridge_err) => bridge_err.is_precondition(),
            _ => false,
        }
    }

    /// Check if this error comes from identifier computation.
    pub fn is_id_error(&self) -> bool {
        matches!(self, Error::Id(_))
    }

    /// Check if this error is caused by lock contention.
    pub fn is_lock_error(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_lock_error(),
            _ => false,
        }
    }

    /// Check if this error is configuration-related.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}
