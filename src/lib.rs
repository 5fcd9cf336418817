//! blockvault - A size-bounded, content-addressed block store
//!
//! Blocks are immutable byte payloads named by their 32-byte content
//! hash and kept as flat files under one root directory. Opening a store
//! migrates entries out of deprecated directory layouts and prunes the
//! least recently accessed entries down to a configured size budget.

pub mod block;
pub mod cli;
pub mod store;
