//! Block identity: the authored id and the derived output key.
//!
//! Editor output gives each block an opaque `id`. It is used for keying the
//! rendered output only, never for lookup or mutation.
//!
//! # Keys
//!
//! A [`BlockKey`] is a blake3 hash of the block id plus its **occurrence
//! index**: how many blocks with the same id appeared before it. Ids are
//! supposed to be unique, but legacy documents contain copy-pasted blocks;
//! the occurrence index keeps their keys distinct while leaving the keys of
//! unique blocks independent of position. Blocks without an id are keyed by
//! their position in the document.

use std::fmt;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

// =============================================================================
// BlockId
// =============================================================================

/// Authored block identifier (e.g. `"oUq2g_tl8y"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub CompactString);

impl BlockId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(CompactString::new(id))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// =============================================================================
// BlockKey
// =============================================================================

/// Deterministic key of a rendered block.
///
/// - 8 bytes, `Copy`
/// - same id and occurrence → same key, across processes
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub struct BlockKey(u64);

impl BlockKey {
    /// Key for the `occurrence`-th block carrying `id`, or for the block at
    /// `position` when the id is empty.
    pub fn for_block(id: &BlockId, occurrence: usize, position: usize) -> Self {
        let mut hasher = blake3::Hasher::new();
        if id.is_empty() {
            hasher.update(b"__position__");
            hasher.update(&(position as u64).to_le_bytes());
        } else {
            hasher.update(b"__block__");
            hasher.update(id.as_str().as_bytes());
            hasher.update(&(occurrence as u64).to_le_bytes());
        }
        let hash = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        Self(u64::from_le_bytes(bytes))
    }

    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(&self) -> u64 {
        self.0
    }

    /// Lowercase hex, as written to the key attribute.
    #[inline]
    pub fn to_attr_value(self) -> String {
        format!("{:x}", self.0)
    }
}

impl fmt::Debug for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockKey({:016x})", self.0)
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_deterministic() {
        let id = BlockId::new("oUq2g_tl8y");
        assert_eq!(BlockKey::for_block(&id, 0, 3), BlockKey::for_block(&id, 0, 3));
        // Position does not matter for blocks with an id
        assert_eq!(BlockKey::for_block(&id, 0, 3), BlockKey::for_block(&id, 0, 9));
    }

    #[test]
    fn test_key_distinguishes_occurrences() {
        let id = BlockId::new("dup");
        assert_ne!(BlockKey::for_block(&id, 0, 0), BlockKey::for_block(&id, 1, 1));
    }

    #[test]
    fn test_empty_id_uses_position() {
        let id = BlockId::default();
        assert_ne!(BlockKey::for_block(&id, 0, 0), BlockKey::for_block(&id, 0, 1));
        assert_ne!(
            BlockKey::for_block(&id, 0, 0),
            BlockKey::for_block(&BlockId::new("0"), 0, 0)
        );
    }

    #[test]
    fn test_attr_value_is_hex() {
        assert_eq!(BlockKey::from_raw(255).to_attr_value(), "ff");
        assert_eq!(BlockKey::from_raw(255).to_string(), "ff");
    }
}
