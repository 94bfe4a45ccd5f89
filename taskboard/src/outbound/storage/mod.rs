//! Key-value storage slots backing the simulated adapters.
//!
//! A slot is one string value addressed by a key such as `taskboard.tasks`.
//! Adapters serialize whole collections into a slot; this module only moves
//! text in and out.

mod directory;
mod memory;

use thiserror::Error;

pub use directory::DirectoryKeyValueStore;
pub use memory::MemoryKeyValueStore;

/// Failures raised by storage slot adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The key cannot be mapped onto the backing medium.
    #[error("invalid storage key `{key}`: {reason}")]
    InvalidKey { key: String, reason: &'static str },
    /// The slot exists but could not be read.
    #[error("failed to read storage slot `{key}`: {message}")]
    Read { key: String, message: String },
    /// The slot could not be written or removed.
    #[error("failed to write storage slot `{key}`: {message}")]
    Write { key: String, message: String },
}

/// Synchronous string slots keyed by name.
///
/// Implementations must be safe to share between adapters; the last writer
/// wins.
pub trait KeyValueStore: Send + Sync {
    /// Read a slot, or `None` when it has never been written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the slot exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a slot. Removing an absent slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the slot cannot be removed.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
