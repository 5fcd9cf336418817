//! # Local Filesystem Gateway

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use super::backend::{DirectoryGateway, EntryMeta};
use super::errors::{StoreError, StoreResult};

/// Suffix for staged writes awaiting rename
pub const TMP_SUFFIX: &str = "tmp";

/// Directory gateway backed by the local file system
#[derive(Debug, Default)]
pub struct LocalGateway;

impl LocalGateway {
    /// Create a new local gateway
    pub fn new() -> Self {
        Self
    }
}

impl DirectoryGateway for LocalGateway {
    fn list_entries(&self, dir: &Path) -> StoreResult<Vec<EntryMeta>> {
        let mut results = Vec::new();

        for entry in fs::read_dir(dir).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(dir.display().to_string())
            } else {
                StoreError::IoError(e.to_string())
            }
        })? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(_) => continue,
            };
            // Stat fresh on every enumeration; never reuse cached metadata
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(_) => continue,
            };
            if !metadata.is_file() {
                continue;
            }
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };
            let accessed = metadata
                .accessed()
                .or_else(|_| metadata.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            results.push(EntryMeta {
                name,
                len: metadata.len(),
                accessed,
            });
        }

        Ok(results)
    }

    fn read(&self, path: &Path) -> StoreResult<Vec<u8>> {
        fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(path.display().to_string())
            } else {
                StoreError::IoError(e.to_string())
            }
        })
    }

    fn write_new(&self, path: &Path, data: &[u8]) -> StoreResult<()> {
        if path.exists() {
            return Err(StoreError::AlreadyExists(path.display().to_string()));
        }

        // Stage next to the final name, then rename into place
        let tmp = path.with_extension(TMP_SUFFIX);
        fs::write(&tmp, data).map_err(|e| StoreError::IoError(e.to_string()))?;
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::IoError(e.to_string()));
        }

        Ok(())
    }

    fn delete(&self, path: &Path) -> StoreResult<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::IoError(e.to_string())),
        }
    }

    fn touch_accessed(&self, path: &Path, when: SystemTime) -> StoreResult<()> {
        let file = fs::File::options()
            .write(true)
            .open(path)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    StoreError::NotFound(path.display().to_string())
                } else {
                    StoreError::IoError(e.to_string())
                }
            })?;
        let times = fs::FileTimes::new().set_accessed(when);
        file.set_times(times)
            .map_err(|e| StoreError::IoError(e.to_string()))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn ensure_dir(&self, path: &Path) -> StoreResult<()> {
        fs::create_dir_all(path).map_err(|e| StoreError::IoError(e.to_string()))
    }

    fn remove_tree(&self, path: &Path) -> StoreResult<()> {
        match fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::IoError(e.to_string())),
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> StoreResult<()> {
        fs::rename(from, to).map_err(|e| StoreError::IoError(e.to_string()))
    }
}
