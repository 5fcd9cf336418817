//! CLI command implementations
//!
//! Each command loads the JSON configuration file, opens the store (which
//! runs migration and pruning), performs one operation and exits. The
//! tokio runtime lives here, not in `main`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::block::{Block, BlockKey, BlockRecord};
use crate::store::{BlockStore, Network, StoreConfig};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments, initialize logging and dispatch one command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Command::Init { config } => init(&config),
        Command::Stats { config } => stats(&config),
        Command::Put { config, file } => put(&config, &file),
        Command::Get { config, key, out } => get(&config, &key, out.as_deref()),
        Command::Rm { config, key } => rm(&config, &key),
    }
}

/// Write a default configuration file, refusing to overwrite one
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized(
            config_path.display().to_string(),
        ));
    }

    let config = StoreConfig::new(PathBuf::from("./blocks"), Network::Mainnet);
    let json = serde_json::to_string_pretty(&config)?;
    fs::write(config_path, json)?;

    println!("Wrote {}", config_path.display());
    Ok(())
}

/// Open the store and print entry count, sizes and access-time range
pub fn stats(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let network = config.network;
    let rt = runtime()?;

    let usage = rt.block_on(async {
        let store = BlockStore::open(config).await?;
        store.usage().await
    })?;

    println!("Network:     {}", network);
    println!("Entries:     {}", usage.entries);
    println!("Total bytes: {}", usage.total_bytes);
    if let Some(oldest) = usage.oldest_access {
        let oldest: DateTime<Utc> = oldest.into();
        println!("Oldest access: {}", oldest.to_rfc3339());
    }
    if let Some(newest) = usage.newest_access {
        let newest: DateTime<Utc> = newest.into();
        println!("Newest access: {}", newest.to_rfc3339());
    }
    Ok(())
}

/// Store a file's bytes as a block record and print the key
pub fn put(config_path: &Path, file: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let payload = fs::read(file)?;
    let block = BlockRecord::new(payload);
    let key = block.hash();
    let rt = runtime()?;

    rt.block_on(async {
        let store = BlockStore::open(config).await?;
        store.save(&block).await
    })?;

    println!("{}", key);
    Ok(())
}

/// Fetch a block's payload to stdout or a file
pub fn get(config_path: &Path, key: &str, out: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path)?;
    let key = BlockKey::parse(key).map_err(|e| CliError::bad_key(e.to_string()))?;
    let rt = runtime()?;

    let block: Option<BlockRecord> = rt.block_on(async {
        let store = BlockStore::open(config).await?;
        store.get::<BlockRecord>(&key).await
    })?;

    let block = block.ok_or_else(|| CliError::not_found(key.to_hex()))?;
    match out {
        Some(path) => fs::write(path, block.payload())?,
        None => std::io::stdout().write_all(block.payload())?,
    }
    Ok(())
}

/// Remove a block by key
pub fn rm(config_path: &Path, key: &str) -> CliResult<()> {
    let config = load_config(config_path)?;
    let key = BlockKey::parse(key).map_err(|e| CliError::bad_key(e.to_string()))?;
    let rt = runtime()?;

    rt.block_on(async {
        let store = BlockStore::open(config).await?;
        store.remove(&key).await
    })?;

    println!("Removed {}", key);
    Ok(())
}

fn load_config(path: &Path) -> CliResult<StoreConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        CliError::config_error(format!("Failed to read {}: {}", path.display(), e))
    })?;
    Ok(serde_json::from_str(&contents)?)
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::store_failed(format!("Failed to create tokio runtime: {}", e)))
}
