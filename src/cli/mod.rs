//! CLI module for blockvault
//!
//! Provides command-line access to a store described by a JSON
//! configuration file:
//! - init: write a default configuration
//! - stats: open the store and report usage
//! - put/get/rm: one-shot block operations

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{get, init, put, rm, run, stats};
pub use errors::{CliError, CliErrorCode, CliResult};
