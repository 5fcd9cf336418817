//! # Block Keys
//!
//! A block key is the 32-byte content hash that names a stored block.
//! Its lowercase-hex rendering doubles as the on-disk file name.

use std::fmt;
use std::str::FromStr;

use super::errors::{BlockError, BlockResult};

/// Length of a block key in bytes
pub const KEY_LEN: usize = 32;

/// A fixed-width content identifier for a stored block
///
/// Equality, ordering and hashing are byte-wise. The canonical text
/// rendering is lowercase hex, 64 characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockKey([u8; KEY_LEN]);

impl BlockKey {
    /// Create a key from raw bytes
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a key from its hex text rendering
    ///
    /// Input case is accepted either way; the canonical output is lowercase.
    pub fn parse(text: &str) -> BlockResult<Self> {
        let decoded =
            hex::decode(text).map_err(|_| BlockError::MalformedKey(text.to_string()))?;
        let bytes: [u8; KEY_LEN] = decoded
            .try_into()
            .map_err(|_| BlockError::MalformedKey(text.to_string()))?;
        Ok(Self(bytes))
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Canonical lowercase-hex rendering, used as the file name
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for BlockKey {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
