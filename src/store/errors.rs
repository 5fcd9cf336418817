//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Block store errors
///
/// Only genuine I/O failures cross the store boundary; corruption and
/// migration/pruning failures are absorbed internally.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("Entry already exists: {0}")]
    AlreadyExists(String),

    #[error("I/O error: {0}")]
    IoError(String),
}
