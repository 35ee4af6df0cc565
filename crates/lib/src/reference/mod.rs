//! Document and class references.
//!
//! A [`DocumentReference`] addresses one document as `wiki:space.name`. A
//! [`ClassReference`] names a schema as `Space.Name`; the schema itself lives
//! on the document with the same space and name in whatever wiki is current.
//!
//! Parsing and serialization are exposed through the [`ReferenceResolver`]
//! trait so a host platform can supply its own rules. The
//! [`DefaultReferenceResolver`] implements the plain dotted syntax.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

mod errors;
pub use errors::ReferenceError;

/// How much of a reference is written out when it is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerializationMode {
    /// Fully qualified: `wiki:space.name`
    Global,
    /// Without the wiki: `space.name`
    Local,
    /// Only the parts that differ from a base reference
    #[default]
    Compact,
}

impl FromStr for SerializationMode {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(SerializationMode::Global),
            "local" => Ok(SerializationMode::Local),
            "compact" => Ok(SerializationMode::Compact),
            other => Err(ReferenceError::UnknownMode {
                mode: other.to_string(),
            }),
        }
    }
}

/// Reference to a single document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentReference {
    wiki: String,
    space: String,
    name: String,
}

impl DocumentReference {
    /// Creates a new reference from its three segments.
    pub fn new(wiki: impl Into<String>, space: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            wiki: wiki.into(),
            space: space.into(),
            name: name.into(),
        }
    }

    pub fn wiki(&self) -> &str {
        &self.wiki
    }

    pub fn space(&self) -> &str {
        &self.space
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the same document in another wiki.
    pub fn with_wiki(&self, wiki: impl Into<String>) -> Self {
        Self {
            wiki: wiki.into(),
            space: self.space.clone(),
            name: self.name.clone(),
        }
    }

    /// Serializes this reference.
    ///
    /// `base` is only consulted in [`SerializationMode::Compact`]: segments equal
    /// to the base are left out. Without a base, compact output is global.
    pub fn serialize(&self, mode: SerializationMode, base: Option<&DocumentReference>) -> String {
        match mode {
            SerializationMode::Global => self.to_string(),
            SerializationMode::Local => format!("{}.{}", self.space, self.name),
            SerializationMode::Compact => match base {
                Some(base) if base.wiki == self.wiki && base.space == self.space => {
                    self.name.clone()
                }
                Some(base) if base.wiki == self.wiki => format!("{}.{}", self.space, self.name),
                _ => self.to_string(),
            },
        }
    }

    /// Parses `wiki:space.name`, `space.name` or `name`.
    ///
    /// Missing segments are taken from `base`; without a base they are an error.
    pub fn parse(input: &str, base: Option<&DocumentReference>) -> Result<Self, ReferenceError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ReferenceError::Empty);
        }
        let unparseable = |reason: &str| ReferenceError::Unparseable {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let (wiki, local) = match trimmed.split_once(':') {
            Some((wiki, _)) if wiki.is_empty() => return Err(unparseable("empty wiki segment")),
            Some((wiki, local)) => (Some(wiki), local),
            None => (None, trimmed),
        };
        let (space, name) = match local.rsplit_once('.') {
            Some((space, _)) if space.is_empty() => {
                return Err(unparseable("empty space segment"));
            }
            Some((space, name)) => (Some(space), name),
            None => (None, local),
        };
        if name.is_empty() {
            return Err(unparseable("empty name segment"));
        }

        let wiki = match (wiki, base) {
            (Some(wiki), _) => wiki.to_string(),
            (None, Some(base)) => base.wiki.clone(),
            (None, None) => return Err(unparseable("no wiki and no base reference")),
        };
        let space = match (space, base) {
            (Some(space), _) => space.to_string(),
            (None, Some(base)) => base.space.clone(),
            (None, None) => return Err(unparseable("no space and no base reference")),
        };
        Ok(Self::new(wiki, space, name))
    }
}

impl fmt::Display for DocumentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}.{}", self.wiki, self.space, self.name)
    }
}

/// Reference to a class, independent of the wiki it is used in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassReference {
    space: String,
    name: String,
}

impl ClassReference {
    pub fn new(space: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            space: space.into(),
            name: name.into(),
        }
    }

    pub fn space(&self) -> &str {
        &self.space
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The class document holding this schema in `wiki`.
    pub fn doc_ref(&self, wiki: impl Into<String>) -> DocumentReference {
        DocumentReference::new(wiki, self.space.clone(), self.name.clone())
    }

    /// Parses `Space.Name`, ignoring an optional `wiki:` prefix.
    pub fn parse(input: &str) -> Result<Self, ReferenceError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ReferenceError::Empty);
        }
        let local = trimmed.split_once(':').map_or(trimmed, |(_, local)| local);
        match local.split_once('.') {
            Some((space, name)) if !space.is_empty() && !name.is_empty() => {
                Ok(Self::new(space, name))
            }
            _ => Err(ReferenceError::Unparseable {
                input: input.to_string(),
                reason: "expected 'Space.Name'".to_string(),
            }),
        }
    }
}

impl fmt::Display for ClassReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.space, self.name)
    }
}

impl From<&DocumentReference> for ClassReference {
    fn from(doc_ref: &DocumentReference) -> Self {
        Self::new(doc_ref.space(), doc_ref.name())
    }
}

impl FromStr for ClassReference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parses and serializes document references for the host platform.
pub trait ReferenceResolver: Send + Sync + fmt::Debug {
    /// Resolves `input` relative to `base`; unparseable input is an error.
    fn resolve(
        &self,
        input: &str,
        base: Option<&DocumentReference>,
    ) -> Result<DocumentReference, ReferenceError>;

    /// Serializes `reference` in the given mode.
    fn serialize(
        &self,
        reference: &DocumentReference,
        mode: SerializationMode,
        base: Option<&DocumentReference>,
    ) -> String;
}

/// Resolver using the plain `wiki:space.name` syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultReferenceResolver;

impl ReferenceResolver for DefaultReferenceResolver {
    fn resolve(
        &self,
        input: &str,
        base: Option<&DocumentReference>,
    ) -> Result<DocumentReference, ReferenceError> {
        DocumentReference::parse(input, base)
    }

    fn serialize(
        &self,
        reference: &DocumentReference,
        mode: SerializationMode,
        base: Option<&DocumentReference>,
    ) -> String {
        reference.serialize(mode, base)
    }
}
