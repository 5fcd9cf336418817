//! CLI argument definitions using clap
//!
//! Commands:
//! - blockvault init --config <path>
//! - blockvault stats --config <path>
//! - blockvault put --config <path> <file>
//! - blockvault get --config <path> <key> [--out <file>]
//! - blockvault rm --config <path> <key>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// blockvault - A size-bounded, content-addressed block store
#[derive(Parser, Debug)]
#[command(name = "blockvault")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default store configuration file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./blockvault.json")]
        config: PathBuf,
    },

    /// Open the store and print usage statistics
    Stats {
        /// Path to configuration file
        #[arg(long, default_value = "./blockvault.json")]
        config: PathBuf,
    },

    /// Store a file's bytes as a block and print its key
    Put {
        /// Path to configuration file
        #[arg(long, default_value = "./blockvault.json")]
        config: PathBuf,

        /// File whose contents become the block payload
        file: PathBuf,
    },

    /// Fetch a block's payload by key
    Get {
        /// Path to configuration file
        #[arg(long, default_value = "./blockvault.json")]
        config: PathBuf,

        /// Block key in hex
        key: String,

        /// Write the payload here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Remove a block by key
    Rm {
        /// Path to configuration file
        #[arg(long, default_value = "./blockvault.json")]
        config: PathBuf,

        /// Block key in hex
        key: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
