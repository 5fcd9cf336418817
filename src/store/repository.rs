//! # Block Store
//!
//! Content-addressed block storage over a flat directory: one file per
//! block, named by the key's hex text. All public operations are
//! serialized through a single directory-wide async guard.
//!
//! # Open Sequence (strict order)
//!
//! 1. Wipe the root if the namespace is ephemeral
//! 2. Create the directory tree
//! 3. Sweep stale temp files left by interrupted writes
//! 4. Migrate entries out of legacy directories (best-effort)
//! 5. Prune least-recently-accessed entries to the size budget (best-effort)
//!
//! Only step 2 can fail the open; the best-effort passes degrade to log
//! output.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tokio::sync::Mutex;

use crate::block::{Block, BlockKey};

use super::backend::DirectoryGateway;
use super::config::StoreConfig;
use super::errors::{StoreError, StoreResult};
use super::local::{LocalGateway, TMP_SUFFIX};
use super::migrate::migrate_legacy_dirs;
use super::prune::prune_to_budget;

/// Aggregate usage snapshot, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreUsage {
    /// Number of stored entries
    pub entries: usize,
    /// Total size of stored entries in bytes
    pub total_bytes: u64,
    /// Access time of the least recently accessed entry
    pub oldest_access: Option<SystemTime>,
    /// Access time of the most recently accessed entry
    pub newest_access: Option<SystemTime>,
}

/// Content-addressed block store bounded to a disk-size budget
///
/// A stored entry is either Absent or Present; `save` moves it to
/// Present, while `remove`, budget eviction and corrupt-read self-healing
/// move it back to Absent. There is no in-place mutation path.
#[derive(Debug)]
pub struct BlockStore<G: DirectoryGateway = LocalGateway> {
    gateway: G,
    blocks_dir: PathBuf,
    guard: Mutex<()>,
}

impl BlockStore<LocalGateway> {
    /// Open a store on the local file system
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        Self::open_with(LocalGateway::new(), config).await
    }
}

impl<G: DirectoryGateway> BlockStore<G> {
    /// Open a store through a custom gateway
    pub async fn open_with(gateway: G, config: StoreConfig) -> StoreResult<Self> {
        if config.network.is_ephemeral() {
            // Deliberate full reset, not an eviction
            if let Err(e) = gateway.remove_tree(&config.blocks_dir) {
                tracing::debug!(
                    "Failed to reset ephemeral blocks directory {}: {}",
                    config.blocks_dir.display(),
                    e
                );
            }
        }

        gateway.ensure_dir(&config.blocks_dir)?;

        sweep_temp_files(&gateway, &config.blocks_dir);

        if let Err(e) = migrate_legacy_dirs(&gateway, &config.legacy_dirs, &config.blocks_dir) {
            tracing::warn!("Legacy block migration failed: {}", e);
        }

        match prune_to_budget(&gateway, &config.blocks_dir, config.target_size_bytes()) {
            Ok(stats) => {
                tracing::debug!(
                    "Opened block store at {} ({} entries, {} bytes)",
                    config.blocks_dir.display(),
                    stats.kept,
                    stats.kept_bytes
                );
            }
            Err(e) => tracing::warn!("Block pruning failed: {}", e),
        }

        Ok(Self {
            gateway,
            blocks_dir: config.blocks_dir,
            guard: Mutex::new(()),
        })
    }

    /// Root directory holding the stored entries
    pub fn blocks_dir(&self) -> &Path {
        &self.blocks_dir
    }

    fn entry_path(&self, key: &BlockKey) -> PathBuf {
        self.blocks_dir.join(key.to_hex())
    }

    /// Look up a block by key
    ///
    /// Returns `Ok(None)` when the entry is absent. A corrupt entry is
    /// deleted and also reported as `Ok(None)`; the caller re-acquires
    /// the block from its original source. A successful read refreshes
    /// the entry's access time.
    pub async fn get<B: Block>(&self, key: &BlockKey) -> StoreResult<Option<B>> {
        let _guard = self.guard.lock().await;
        let path = self.entry_path(key);

        let bytes = match self.gateway.read(&path) {
            Ok(bytes) => bytes,
            Err(StoreError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        match B::from_bytes(&bytes) {
            Ok(block) => {
                if let Err(e) = self.gateway.touch_accessed(&path, SystemTime::now()) {
                    tracing::debug!("Failed to touch access time of {}: {}", key, e);
                }
                Ok(Some(block))
            }
            Err(e) => {
                tracing::debug!("Block {} file corrupted, deleting entry: {}", key, e);
                self.gateway.delete(&path)?;
                Ok(None)
            }
        }
    }

    /// Store a block under its content-derived key
    ///
    /// Saving a key that is already present is a no-op: content
    /// addressing guarantees the existing bytes are the right ones.
    pub async fn save<B: Block>(&self, block: &B) -> StoreResult<()> {
        let key = block.hash();
        let _guard = self.guard.lock().await;
        let path = self.entry_path(&key);

        if self.gateway.exists(&path) {
            return Ok(());
        }
        self.gateway.write_new(&path, &block.to_bytes())
    }

    /// Delete the entry for a key; absent is not an error
    pub async fn remove(&self, key: &BlockKey) -> StoreResult<()> {
        let _guard = self.guard.lock().await;
        self.gateway.delete(&self.entry_path(key))
    }

    /// Number of stored entries, for diagnostics and tests
    pub async fn count(&self) -> StoreResult<usize> {
        let _guard = self.guard.lock().await;
        Ok(self.gateway.list_entries(&self.blocks_dir)?.len())
    }

    /// Usage snapshot, for diagnostics
    pub async fn usage(&self) -> StoreResult<StoreUsage> {
        let _guard = self.guard.lock().await;
        let entries = self.gateway.list_entries(&self.blocks_dir)?;
        Ok(StoreUsage {
            entries: entries.len(),
            total_bytes: entries.iter().map(|e| e.len).sum(),
            oldest_access: entries.iter().map(|e| e.accessed).min(),
            newest_access: entries.iter().map(|e| e.accessed).max(),
        })
    }
}

/// Delete `*.tmp` leftovers from writes interrupted by a crash, so counts
/// and retention only ever observe whole entries.
fn sweep_temp_files<G: DirectoryGateway>(gateway: &G, blocks_dir: &Path) {
    let entries = match gateway.list_entries(blocks_dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Temp-file sweep failed: {}", e);
            return;
        }
    };

    for entry in entries {
        let is_tmp =
            Path::new(&entry.name).extension().and_then(|ext| ext.to_str()) == Some(TMP_SUFFIX);
        if !is_tmp {
            continue;
        }
        let path = blocks_dir.join(&entry.name);
        match gateway.delete(&path) {
            Ok(()) => tracing::debug!("Deleted stale temp file {}", entry.name),
            Err(e) => tracing::debug!("Failed to delete stale temp file {}: {}", entry.name, e),
        }
    }
}
