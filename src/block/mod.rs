//! # Block Identity and Serialization
//!
//! Content-addressed identity (32-byte keys, hex file names) and the
//! block interface consumed by the store.

pub mod errors;
pub mod key;
pub mod record;

pub use errors::{BlockError, BlockResult};
pub use key::{BlockKey, KEY_LEN};
pub use record::{Block, BlockRecord, RECORD_MAGIC};
