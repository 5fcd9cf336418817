//! # Retention Pruning
//!
//! Startup pass holding the blocks directory at or under its size budget
//! by evicting least-recently-accessed entries first.

use std::path::Path;

use super::backend::DirectoryGateway;
use super::errors::StoreResult;

/// Counters for one pruning pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneStats {
    /// Entries retained
    pub kept: usize,
    /// Entries deleted to satisfy the budget
    pub evicted: usize,
    /// Total size of retained entries in bytes
    pub kept_bytes: u64,
}

/// Evict least-recently-accessed entries until the directory fits
/// `budget_bytes`.
///
/// Entries are stat-ed fresh, sorted most-recently-accessed first (the
/// sort is stable, so access-time ties keep enumeration order), and kept
/// while the running size total stays within budget; everything after the
/// first entry that would exceed it is deleted. A failed deletion is
/// logged and skipped.
pub fn prune_to_budget<G: DirectoryGateway>(
    gateway: &G,
    blocks_dir: &Path,
    budget_bytes: u64,
) -> StoreResult<PruneStats> {
    let mut entries = gateway.list_entries(blocks_dir)?;
    entries.sort_by(|a, b| b.accessed.cmp(&a.accessed));

    let mut stats = PruneStats::default();
    let mut evicting = false;

    for entry in entries {
        // Once one entry overflows, the whole less-recent remainder goes
        if !evicting && stats.kept_bytes + entry.len <= budget_bytes {
            stats.kept_bytes += entry.len;
            stats.kept += 1;
            continue;
        }
        evicting = true;

        let path = blocks_dir.join(&entry.name);
        match gateway.delete(&path) {
            Ok(()) => {
                tracing::debug!("Pruned {} ({} bytes)", entry.name, entry.len);
                stats.evicted += 1;
            }
            Err(e) => {
                tracing::warn!("Failed to prune {}: {}", entry.name, e);
            }
        }
    }

    if stats.evicted > 0 {
        tracing::info!(
            "Blocks directory was over budget, deleted {} blocks ({} kept, {} bytes)",
            stats.evicted,
            stats.kept,
            stats.kept_bytes
        );
    }

    Ok(stats)
}
