//! # Legacy Layout Migration
//!
//! One-time startup pass relocating entries from deprecated root
//! directories into the current root. Strictly best-effort: a bad file
//! never aborts the batch, and a failed pass never prevents the store
//! from opening.

use std::path::{Path, PathBuf};

use super::backend::DirectoryGateway;
use super::errors::StoreResult;

/// Counters for one migration pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationStats {
    /// Entries moved into the current root
    pub migrated: usize,
    /// Entries already present under the current root, left for deletion
    pub redundant: usize,
    /// Entries that could not be moved
    pub failed: usize,
}

/// Relocate entries from each existing legacy directory into `blocks_dir`,
/// then delete the legacy trees.
///
/// Entries whose name already exists under `blocks_dir` are never
/// overwritten; the legacy copy goes down with its directory.
pub fn migrate_legacy_dirs<G: DirectoryGateway>(
    gateway: &G,
    legacy_dirs: &[PathBuf],
    blocks_dir: &Path,
) -> StoreResult<MigrationStats> {
    let mut stats = MigrationStats::default();

    for legacy_dir in legacy_dirs {
        if !gateway.exists(legacy_dir) {
            continue;
        }
        tracing::debug!("Migrating legacy blocks from {}", legacy_dir.display());

        for entry in gateway.list_entries(legacy_dir)? {
            let source = legacy_dir.join(&entry.name);
            let target = blocks_dir.join(&entry.name);

            if gateway.exists(&target) {
                tracing::debug!("{} already exists, skipping", target.display());
                stats.redundant += 1;
                continue;
            }

            match move_entry(gateway, &source, &target) {
                Ok(()) => stats.migrated += 1,
                Err(e) => {
                    tracing::debug!("Failed to migrate {}: {}", source.display(), e);
                    stats.failed += 1;
                }
            }
        }

        // Redundant and failed leftovers go down with the directory
        match gateway.remove_tree(legacy_dir) {
            Ok(()) => tracing::info!("Deleted legacy directory {}", legacy_dir.display()),
            Err(e) => tracing::debug!(
                "Failed to delete legacy directory {}: {}",
                legacy_dir.display(),
                e
            ),
        }
    }

    if stats.migrated > 0 {
        tracing::info!(
            "Migrated {} blocks into {}",
            stats.migrated,
            blocks_dir.display()
        );
    }
    if stats.redundant > 0 {
        tracing::info!("{} blocks were already present", stats.redundant);
    }
    if stats.failed > 0 {
        tracing::debug!("Failed to migrate {} blocks", stats.failed);
    }

    Ok(stats)
}

/// Move one entry, falling back to copy-and-delete across volumes
fn move_entry<G: DirectoryGateway>(gateway: &G, source: &Path, target: &Path) -> StoreResult<()> {
    if gateway.rename(source, target).is_ok() {
        return Ok(());
    }
    let data = gateway.read(source)?;
    gateway.write_new(target, &data)?;
    gateway.delete(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::local::LocalGateway;
    use tempfile::TempDir;

    fn setup() -> (TempDir, LocalGateway, PathBuf, PathBuf) {
        let temp = TempDir::new().unwrap();
        let gateway = LocalGateway::new();
        let blocks_dir = temp.path().join("blocks");
        let legacy_dir = temp.path().join("old-blocks");
        gateway.ensure_dir(&blocks_dir).unwrap();
        gateway.ensure_dir(&legacy_dir).unwrap();
        (temp, gateway, blocks_dir, legacy_dir)
    }

    #[test]
    fn test_migrates_missing_entries() {
        let (_temp, gateway, blocks_dir, legacy_dir) = setup();
        gateway.write_new(&legacy_dir.join("a"), b"aaa").unwrap();
        gateway.write_new(&legacy_dir.join("b"), b"bbb").unwrap();

        let stats =
            migrate_legacy_dirs(&gateway, &[legacy_dir.clone()], &blocks_dir).unwrap();

        assert_eq!(stats.migrated, 2);
        assert_eq!(stats.redundant, 0);
        assert_eq!(stats.failed, 0);
        assert_eq!(gateway.read(&blocks_dir.join("a")).unwrap(), b"aaa");
        assert_eq!(gateway.read(&blocks_dir.join("b")).unwrap(), b"bbb");
        assert!(!gateway.exists(&legacy_dir));
    }

    #[test]
    fn test_never_overwrites_existing_entries() {
        let (_temp, gateway, blocks_dir, legacy_dir) = setup();
        gateway.write_new(&blocks_dir.join("b"), b"current").unwrap();
        gateway.write_new(&legacy_dir.join("a"), b"aaa").unwrap();
        gateway.write_new(&legacy_dir.join("b"), b"stale").unwrap();

        let stats =
            migrate_legacy_dirs(&gateway, &[legacy_dir.clone()], &blocks_dir).unwrap();

        assert_eq!(stats.migrated, 1);
        assert_eq!(stats.redundant, 1);
        assert_eq!(gateway.read(&blocks_dir.join("b")).unwrap(), b"current");
        assert!(!gateway.exists(&legacy_dir));
    }

    #[test]
    fn test_missing_legacy_dir_is_a_no_op() {
        let (_temp, gateway, blocks_dir, legacy_dir) = setup();
        gateway.remove_tree(&legacy_dir).unwrap();

        let stats = migrate_legacy_dirs(&gateway, &[legacy_dir], &blocks_dir).unwrap();
        assert_eq!(stats, MigrationStats::default());
    }

    #[test]
    fn test_no_legacy_dirs_configured() {
        let (_temp, gateway, blocks_dir, _legacy_dir) = setup();
        let stats = migrate_legacy_dirs(&gateway, &[], &blocks_dir).unwrap();
        assert_eq!(stats, MigrationStats::default());
    }

    #[test]
    fn test_multiple_legacy_dirs() {
        let (temp, gateway, blocks_dir, legacy_dir) = setup();
        let second = temp.path().join("older-blocks");
        gateway.ensure_dir(&second).unwrap();
        gateway.write_new(&legacy_dir.join("a"), b"aaa").unwrap();
        gateway.write_new(&second.join("c"), b"ccc").unwrap();

        let stats = migrate_legacy_dirs(
            &gateway,
            &[legacy_dir.clone(), second.clone()],
            &blocks_dir,
        )
        .unwrap();

        assert_eq!(stats.migrated, 2);
        assert!(gateway.exists(&blocks_dir.join("a")));
        assert!(gateway.exists(&blocks_dir.join("c")));
        assert!(!gateway.exists(&legacy_dir));
        assert!(!gateway.exists(&second));
    }
}
