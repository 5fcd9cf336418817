//! Legacy Migration Tests
//!
//! Opening a store relocates entries from deprecated root directories
//! into the current root without overwriting anything, then deletes the
//! legacy trees. Migration is best-effort and never blocks the open.

use blockvault::block::{Block, BlockRecord};
use blockvault::store::{BlockStore, Network, StoreConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn config_with_legacy(temp: &TempDir, legacy_dirs: Vec<PathBuf>) -> StoreConfig {
    let mut config = StoreConfig::new(temp.path().join("blocks"), Network::Mainnet);
    config.legacy_dirs = legacy_dirs;
    config
}

/// Lay a block down in a directory under the store's file naming scheme
fn seed_entry(dir: &Path, block: &BlockRecord) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(block.hash().to_hex()), block.to_bytes()).unwrap();
}

// =============================================================================
// Relocation
// =============================================================================

#[tokio::test]
async fn test_legacy_entries_become_readable() {
    let temp = TempDir::new().unwrap();
    let legacy_dir = temp.path().join("old-blocks");

    let a = BlockRecord::new(b"legacy a".to_vec());
    let b = BlockRecord::new(b"legacy b".to_vec());
    seed_entry(&legacy_dir, &a);
    seed_entry(&legacy_dir, &b);

    let store = BlockStore::open(config_with_legacy(&temp, vec![legacy_dir.clone()]))
        .await
        .unwrap();

    assert_eq!(store.count().await.unwrap(), 2);
    let loaded_a: BlockRecord = store.get(&a.hash()).await.unwrap().unwrap();
    let loaded_b: BlockRecord = store.get(&b.hash()).await.unwrap().unwrap();
    assert_eq!(loaded_a.to_bytes(), a.to_bytes());
    assert_eq!(loaded_b.to_bytes(), b.to_bytes());
    assert!(!legacy_dir.exists());
}

#[tokio::test]
async fn test_existing_entries_are_never_overwritten() {
    let temp = TempDir::new().unwrap();
    let blocks_dir = temp.path().join("blocks");
    let legacy_dir = temp.path().join("old-blocks");

    let a = BlockRecord::new(b"only legacy".to_vec());
    let b = BlockRecord::new(b"in both".to_vec());
    seed_entry(&legacy_dir, &a);
    seed_entry(&legacy_dir, &b);

    // The current root already holds b under the same name but with
    // sentinel bytes; migration must leave those bytes alone.
    fs::create_dir_all(&blocks_dir).unwrap();
    let sentinel = b"sentinel bytes";
    fs::write(blocks_dir.join(b.hash().to_hex()), sentinel).unwrap();

    let _store = BlockStore::open(config_with_legacy(&temp, vec![legacy_dir.clone()]))
        .await
        .unwrap();

    assert!(blocks_dir.join(a.hash().to_hex()).exists());
    assert_eq!(
        fs::read(blocks_dir.join(b.hash().to_hex())).unwrap(),
        sentinel
    );
    assert!(!legacy_dir.exists());
}

#[tokio::test]
async fn test_multiple_legacy_dirs_merge() {
    let temp = TempDir::new().unwrap();
    let older = temp.path().join("blocks-v1");
    let old = temp.path().join("blocks-v2");

    let a = BlockRecord::new(b"from v1".to_vec());
    let b = BlockRecord::new(b"from v2".to_vec());
    seed_entry(&older, &a);
    seed_entry(&old, &b);

    let store = BlockStore::open(config_with_legacy(
        &temp,
        vec![older.clone(), old.clone()],
    ))
    .await
    .unwrap();

    assert_eq!(store.count().await.unwrap(), 2);
    assert!(!older.exists());
    assert!(!old.exists());
}

// =============================================================================
// Best-Effort Behavior
// =============================================================================

#[tokio::test]
async fn test_missing_legacy_dir_does_not_block_open() {
    let temp = TempDir::new().unwrap();
    let store = BlockStore::open(config_with_legacy(
        &temp,
        vec![temp.path().join("never-existed")],
    ))
    .await
    .unwrap();

    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_store_works_normally_after_migration() {
    let temp = TempDir::new().unwrap();
    let legacy_dir = temp.path().join("old-blocks");

    let migrated = BlockRecord::new(b"migrated".to_vec());
    seed_entry(&legacy_dir, &migrated);

    let store = BlockStore::open(config_with_legacy(&temp, vec![legacy_dir]))
        .await
        .unwrap();

    let fresh = BlockRecord::new(b"fresh".to_vec());
    store.save(&fresh).await.unwrap();

    assert_eq!(store.count().await.unwrap(), 2);
    let loaded: Option<BlockRecord> = store.get(&fresh.hash()).await.unwrap();
    assert!(loaded.is_some());
}

#[tokio::test]
async fn test_migrated_corrupt_entry_still_self_heals() {
    let temp = TempDir::new().unwrap();
    let legacy_dir = temp.path().join("old-blocks");

    // A legacy entry whose bytes were damaged before migration
    let block = BlockRecord::new(b"damaged in transit".to_vec());
    fs::create_dir_all(&legacy_dir).unwrap();
    let mut bytes = block.to_bytes();
    bytes.truncate(bytes.len() / 2);
    fs::write(legacy_dir.join(block.hash().to_hex()), bytes).unwrap();

    let store = BlockStore::open(config_with_legacy(&temp, vec![legacy_dir]))
        .await
        .unwrap();
    assert_eq!(store.count().await.unwrap(), 1);

    // The corrupt migrated entry heals on read
    let loaded: Option<BlockRecord> = store.get(&block.hash()).await.unwrap();
    assert!(loaded.is_none());
    assert_eq!(store.count().await.unwrap(), 0);
}
