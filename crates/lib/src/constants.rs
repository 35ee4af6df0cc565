//! Constants used throughout the wikimodel library.
//!
//! Central definitions for configuration keys, delimiters and the default
//! bit layout of the object identifier scheme.

/// Configuration key holding the comma separated list of blacklisted classes.
pub const CONFIG_CLASS_BLACKLIST: &str = "wikimodel.classdefinition.blacklist";

/// Configuration key for the default document language.
pub const CONFIG_DEFAULT_LANGUAGE: &str = "wikimodel.language.default";

/// Configuration key for the serialization mode of reference fields.
pub const CONFIG_REFERENCE_MODE: &str = "wikimodel.reference.mode";

/// Reference serialization mode used when none is configured.
pub const DEFAULT_REFERENCE_MODE: &str = "compact";

/// Delimiter used when a collection is written into a scalar property.
pub const LIST_DELIMITER: char = '|';

/// Number of low identifier bits reserved for the collision count.
pub const DEFAULT_COLLISION_BITS: u8 = 2;

/// Number of identifier bits above the collision bits reserved for the ordinal count.
pub const DEFAULT_ORDINAL_BITS: u8 = 12;

/// Space holding the pseudo class describing document-level fields.
pub const DOCUMENT_CLASS_SPACE: &str = "WikiModel";

/// Name of the pseudo class describing document-level fields.
pub const DOCUMENT_CLASS_NAME: &str = "DocumentClass";
