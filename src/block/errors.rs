//! # Block Errors

use thiserror::Error;

/// Result type for block operations
pub type BlockResult<T> = Result<T, BlockError>;

/// Block key and record errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    #[error("Malformed block key: {0}")]
    MalformedKey(String),

    #[error("Block record truncated: need {0} bytes, have {1}")]
    Truncated(usize, usize),

    #[error("Invalid block record magic")]
    BadMagic,

    #[error("Block record checksum mismatch")]
    ChecksumMismatch,
}
