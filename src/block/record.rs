//! # Block Records
//!
//! The `Block` trait is the interface the store consumes: an immutable
//! byte payload with a canonical serialization that round-trips exactly
//! and a content-derived key.
//!
//! `BlockRecord` is the bundled implementation, framed as:
//!
//! ```text
//! +------------------+
//! | Magic            | (4 bytes, "BVR1")
//! +------------------+
//! | Payload Length   | (u32 LE)
//! +------------------+
//! | Payload          | (opaque bytes)
//! +------------------+
//! | Checksum         | (u32 LE)
//! +------------------+
//! ```
//!
//! Checksum covers all bytes before the checksum itself.

use crc32fast::Hasher;
use sha2::{Digest, Sha256};

use super::errors::{BlockError, BlockResult};
use super::key::BlockKey;

/// Magic bytes opening every block record
pub const RECORD_MAGIC: [u8; 4] = *b"BVR1";

/// Fixed framing overhead: magic + length prefix + checksum
const FRAME_LEN: usize = 4 + 4 + 4;

/// A storable block: opaque payload, canonical byte form, derivable key
pub trait Block: Sized {
    /// Content-derived key naming this block
    fn hash(&self) -> BlockKey;

    /// Canonical binary serialization
    fn to_bytes(&self) -> Vec<u8>;

    /// Canonical deserialization; must round-trip `to_bytes` exactly
    fn from_bytes(bytes: &[u8]) -> BlockResult<Self>;
}

/// Computes a CRC32 checksum over the provided data.
fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// A checksum-framed block carrying an opaque payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRecord {
    payload: Vec<u8>,
}

impl BlockRecord {
    /// Create a record from a payload
    pub fn new(payload: Vec<u8>) -> Self {
        Self { payload }
    }

    /// The opaque payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Consume the record, returning the payload
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

impl Block for BlockRecord {
    fn hash(&self) -> BlockKey {
        let digest = Sha256::digest(&self.payload);
        BlockKey::from_bytes(digest.into())
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(FRAME_LEN + self.payload.len());
        buf.extend_from_slice(&RECORD_MAGIC);
        buf.extend_from_slice(&(self.payload.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.payload);
        let checksum = compute_checksum(&buf);
        buf.extend_from_slice(&checksum.to_le_bytes());
        buf
    }

    fn from_bytes(bytes: &[u8]) -> BlockResult<Self> {
        if bytes.len() < FRAME_LEN {
            return Err(BlockError::Truncated(FRAME_LEN, bytes.len()));
        }
        if bytes[..4] != RECORD_MAGIC {
            return Err(BlockError::BadMagic);
        }

        let payload_len = u32::from_le_bytes(bytes[4..8].try_into().unwrap()) as usize;
        let expected = FRAME_LEN + payload_len;
        if bytes.len() != expected {
            return Err(BlockError::Truncated(expected, bytes.len()));
        }

        let body_end = 8 + payload_len;
        let stored = u32::from_le_bytes(bytes[body_end..body_end + 4].try_into().unwrap());
        if compute_checksum(&bytes[..body_end]) != stored {
            return Err(BlockError::ChecksumMismatch);
        }

        Ok(Self {
            payload: bytes[8..body_end].to_vec(),
        })
    }
}
