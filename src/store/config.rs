//! # Store Configuration
//!
//! All knobs are passed in explicitly; the store reads no ambient or
//! process-wide state.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default size budget for the blocks directory, in megabytes
pub const DEFAULT_TARGET_SIZE_MB: u64 = 300;

/// Network namespace a store belongs to
///
/// Only consulted for the ephemeral reset rule: a `Regtest` store is
/// wiped and recreated empty on every open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Regtest,
}

impl Network {
    /// Whether stores in this namespace are throwaway
    pub fn is_ephemeral(&self) -> bool {
        matches!(self, Network::Regtest)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Regtest => "regtest",
        };
        write!(f, "{}", name)
    }
}

/// Block store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Root directory holding one file per stored block
    pub blocks_dir: PathBuf,

    /// Network namespace (decides the ephemeral reset rule)
    #[serde(default = "default_network")]
    pub network: Network,

    /// Size budget for the blocks directory, in megabytes
    #[serde(default = "default_target_size_mb")]
    pub target_size_mb: u64,

    /// Deprecated root directories to migrate entries out of
    #[serde(default)]
    pub legacy_dirs: Vec<PathBuf>,
}

fn default_network() -> Network {
    Network::Mainnet
}

fn default_target_size_mb() -> u64 {
    DEFAULT_TARGET_SIZE_MB
}

impl StoreConfig {
    /// Create a config with default budget and no legacy directories
    pub fn new(blocks_dir: impl Into<PathBuf>, network: Network) -> Self {
        Self {
            blocks_dir: blocks_dir.into(),
            network,
            target_size_mb: DEFAULT_TARGET_SIZE_MB,
            legacy_dirs: Vec::new(),
        }
    }

    /// The size budget in bytes
    pub fn target_size_bytes(&self) -> u64 {
        self.target_size_mb * 1024 * 1024
    }
}
