//! String-keyed storage sinks.
//!
//! A [`StorageSink`] is the page's local storage as seen by the cart: a flat
//! map of string keys to string values that may refuse writes (quota) or be
//! unavailable altogether (private browsing, disabled storage).

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors a storage sink can report.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The write would exceed the storage quota.
    #[error("Storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Storage is disabled or otherwise not reachable.
    #[error("Storage unavailable")]
    Unavailable,

    /// The backing file could not be read or written.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but is not a key-value document.
    #[error("Storage backing file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A string-keyed key-value store.
pub trait StorageSink {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write is refused or fails.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}
