//! # Directory Gateway Trait

use std::path::Path;
use std::time::SystemTime;

use super::errors::StoreResult;

/// Metadata for one directory entry, freshly stat-ed at enumeration time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMeta {
    /// File name within the directory
    pub name: String,
    /// Entry size in bytes
    pub len: u64,
    /// Last-access timestamp
    pub accessed: SystemTime,
}

/// Gateway trait over a flat storage directory
///
/// A thin file-system wrapper with no policy logic. All retention and
/// migration decisions live above this seam.
pub trait DirectoryGateway: Send + Sync + std::fmt::Debug {
    /// Enumerate files in a directory with fresh size and access-time metadata
    fn list_entries(&self, dir: &Path) -> StoreResult<Vec<EntryMeta>>;

    /// Read the full contents of a file
    fn read(&self, path: &Path) -> StoreResult<Vec<u8>>;

    /// Create a file that must not already exist
    ///
    /// Fails with `AlreadyExists` if the path is present. The write is
    /// staged to a temporary name in the same directory and renamed into
    /// place, so a crash mid-write never leaves a partial file visible
    /// under the final name.
    fn write_new(&self, path: &Path, data: &[u8]) -> StoreResult<()>;

    /// Delete a file; absent is not an error
    fn delete(&self, path: &Path) -> StoreResult<()>;

    /// Set a file's last-access timestamp
    fn touch_accessed(&self, path: &Path, when: SystemTime) -> StoreResult<()>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory tree if missing
    fn ensure_dir(&self, path: &Path) -> StoreResult<()>;

    /// Delete a directory tree; absent is not an error
    fn remove_tree(&self, path: &Path) -> StoreResult<()>;

    /// Rename a file; atomic within one volume, may fail across volumes
    fn rename(&self, from: &Path, to: &Path) -> StoreResult<()>;
}
