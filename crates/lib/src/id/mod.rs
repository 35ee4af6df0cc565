//! Deterministic 64-bit object identifiers.
//!
//! An identifier packs three parts, from the most significant bit down:
//!
//! ```text
//! [ document hash : 64 - C - O ][ ordinal count : O ][ collision count : C ]
//! ```
//!
//! The document hash is the first eight bytes (big-endian) of the MD5 digest
//! of the *local uid*, a length-prefixed encoding of the local document
//! reference and language. Its low `C + O` bits are cleared to make room for
//! the two counts. The ordinal count numbers objects within a document; the
//! collision count disambiguates whole identifiers that collide across
//! documents.
//!
//! Computation is a pure function of its inputs and needs no synchronization.

use std::{collections::HashSet, fmt};

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{DEFAULT_COLLISION_BITS, DEFAULT_ORDINAL_BITS},
    object::Document,
    reference::{DocumentReference, SerializationMode},
};

mod errors;
pub use errors::IdComputationError;


/// A packed object identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(u64);

impl ObjectId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The same bits read as a signed integer, as stored by hosts with signed 64-bit keys.
    pub fn as_i64(&self) -> i64 {
        self.0 as i64
    }

    /// Big-endian hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.to_be_bytes())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Scheme an identifier was computed with.
///
/// Only identifiers of the same version are compared when probing for a free
/// identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdVersion {
    /// Identifiers assigned by an earlier, unpacked scheme
    Legacy,
    /// Identifiers computed by [`IdComputer`]
    Packed,
}

/// Bit widths reserved for the collision and ordinal counts.
///
/// Deserialization goes through [`IdLayout::new`], so a deserialized layout
/// is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawIdLayout")]
pub struct IdLayout {
    collision_bits: u8,
    ordinal_bits: u8,
}

impl IdLayout {
    /// Fails unless at least one bit remains for the document hash.
    pub fn new(collision_bits: u8, ordinal_bits: u8) -> Result<Self, IdComputationError> {
        if u32::from(collision_bits) + u32::from(ordinal_bits) >= 64 {
            return Err(IdComputationError::InvalidLayout {
                collision_bits,
                ordinal_bits,
            });
        }
        Ok(Self {
            collision_bits,
            ordinal_bits,
        })
    }

    pub fn collision_bits(&self) -> u8 {
        self.collision_bits
    }

    pub fn ordinal_bits(&self) -> u8 {
        self.ordinal_bits
    }

    /// Exclusive upper bound of the collision count.
    pub fn collision_limit(&self) -> u64 {
        1u64 << self.collision_bits
    }

    /// Exclusive upper bound of the ordinal count.
    pub fn ordinal_limit(&self) -> u64 {
        1u64 << self.ordinal_bits
    }

    fn reserved_bits(&self) -> u32 {
        u32::from(self.collision_bits) + u32::from(self.ordinal_bits)
    }
}

#[derive(Deserialize)]
struct RawIdLayout {
    collision_bits: u8,
    ordinal_bits: u8,
}

impl TryFrom<RawIdLayout> for IdLayout {
    type Error = IdComputationError;

    fn try_from(raw: RawIdLayout) -> Result<Self, Self::Error> {
        IdLayout::new(raw.collision_bits, raw.ordinal_bits)
    }
}

impl Default for IdLayout {
    fn default() -> Self {
        Self {
            collision_bits: DEFAULT_COLLISION_BITS,
            ordinal_bits: DEFAULT_ORDINAL_BITS,
        }
    }
}

/// Builds the length-prefixed local uid of a document and language.
///
/// Each non-empty `.`-separated segment of `space.name.lang` is written as
/// `<length>:<segment>`. The wiki is not part of the uid.
///
/// ```
/// # use wikimodel::{DocumentReference, id::local_uid};
/// let doc_ref = DocumentReference::new("xwiki", "space", "page");
/// assert_eq!(local_uid(&doc_ref, "es"), "5:space4:page2:es");
/// ```
pub fn local_uid(doc_ref: &DocumentReference, lang: &str) -> String {
    let key = format!(
        "{}.{}",
        doc_ref.serialize(SerializationMode::Local, None),
        lang.trim()
    );
    key.split('.')
        .filter(|segment| !segment.is_empty())
        .map(|segment| format!("{}:{}", segment.len(), segment))
        .collect()
}

/// Computes packed identifiers with a given layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdComputer {
    layout: IdLayout,
}

impl IdComputer {
    pub fn new(layout: IdLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> IdLayout {
        self.layout
    }

    /// Version tag of the identifiers this computer produces.
    pub fn version(&self) -> IdVersion {
        IdVersion::Packed
    }

    /// The unmasked 64-bit hash of the local uid.
    pub fn doc_hash(&self, doc_ref: &DocumentReference, lang: &str) -> u64 {
        let digest = Md5::digest(local_uid(doc_ref, lang).as_bytes());
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        u64::from_be_bytes(head)
    }

    /// Computes the identifier for one `(document, language, collision, ordinal)` tuple.
    pub fn compute(
        &self,
        doc_ref: &DocumentReference,
        lang: &str,
        collision_count: i64,
        ordinal_count: i64,
    ) -> Result<ObjectId, IdComputationError> {
        let collision = check_range("collision count", collision_count, self.layout.collision_limit())?;
        let ordinal = check_range("ordinal count", ordinal_count, self.layout.ordinal_limit())?;

        let reserved_mask = (1u64 << self.layout.reserved_bits()) - 1;
        let center = self.doc_hash(doc_ref, lang) & !reserved_mask;
        let right = ordinal << self.layout.collision_bits;
        Ok(ObjectId(center | right | collision))
    }

    /// Identifier of the document itself: ordinal count zero.
    pub fn compute_document_id(
        &self,
        doc_ref: &DocumentReference,
        lang: &str,
        collision_count: i64,
    ) -> Result<ObjectId, IdComputationError> {
        self.compute(doc_ref, lang, collision_count, 0)
    }

    /// Finds the first ordinal, starting at 1, whose identifier is not used
    /// by an object of `doc` carrying a packed identifier.
    pub fn compute_next_object_id(&self, doc: &Document) -> Result<ObjectId, IdComputationError> {
        let used: HashSet<ObjectId> = doc
            .all_objects()
            .filter(|object| object.has_valid_id(self.version()))
            .filter_map(|object| object.id())
            .collect();

        let limit = self.layout.ordinal_limit();
        for ordinal in 1..limit {
            let id = self.compute(doc.doc_ref(), doc.language(), 0, ordinal as i64)?;
            if !used.contains(&id) {
                return Ok(id);
            }
            tracing::trace!(doc = %doc.doc_ref(), ordinal, id = %id, "Object id in use");
        }
        Err(IdComputationError::OutOfRange {
            kind: "ordinal count",
            count: limit as i64,
            limit,
        })
    }
}

fn check_range(kind: &'static str, count: i64, limit: u64) -> Result<u64, IdComputationError> {
    if count < 0 {
        return Err(IdComputationError::NegativeCount { kind, count });
    }
    let value = count as u64;
    if value >= limit {
        return Err(IdComputationError::OutOfRange { kind, count, limit });
    }
    Ok(value)
}
