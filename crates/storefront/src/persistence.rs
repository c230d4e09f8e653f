//! Best-effort persistence of the cart's item list.
//!
//! The list is written as a JSON array under a single key. Nothing here is
//! allowed to fail a cart operation: [`PersistenceAdapter::save`] and
//! [`PersistenceAdapter::load`] log and swallow every error. The `try_*`
//! variants expose the underlying [`PersistenceError`] for diagnostics.

use techstore_core::CartLineItem;
use thiserror::Error;

use crate::storage::{StorageError, StorageSink};

/// Reasons a save or load did not happen.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The storage sink refused or failed the write.
    #[error("Failed to write cart: {0}")]
    WriteFailed(#[source] StorageError),

    /// The storage sink could not be read.
    #[error("Failed to read cart: {0}")]
    ReadFailed(#[source] StorageError),

    /// The stored blob is not a JSON array.
    #[error("Persisted cart is malformed: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The item list could not be encoded.
    #[error("Failed to encode cart: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Lines read back from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedLines {
    /// Lines that decoded, in stored order.
    pub items: Vec<CartLineItem>,
    /// Array elements that are not a line: a negative, fractional or
    /// oversized quantity, a missing field, a wrong type.
    pub skipped: usize,
}

/// Serializes the item list to and from a [`StorageSink`].
#[derive(Debug)]
pub struct PersistenceAdapter<S> {
    storage: S,
    key: String,
    memory_only: bool,
}

impl<S: StorageSink> PersistenceAdapter<S> {
    /// Adapter writing under `key`.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            memory_only: false,
        }
    }

    /// Write `items`, logging and swallowing any failure.
    pub fn save(&mut self, items: &[CartLineItem]) {
        match self.try_save(items) {
            Ok(()) => {
                if self.memory_only {
                    tracing::info!(key = %self.key, "Cart persistence recovered");
                }
                self.memory_only = false;
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "Failed to save cart, continuing in memory"
                );
                self.memory_only = true;
            }
        }
    }

    /// Write `items`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if encoding or the storage write fails.
    pub fn try_save(&mut self, items: &[CartLineItem]) -> Result<(), PersistenceError> {
        let blob = serde_json::to_string(items).map_err(PersistenceError::Encode)?;
        self.storage
            .set_item(&self.key, &blob)
            .map_err(PersistenceError::WriteFailed)?;
        tracing::debug!(key = %self.key, lines = items.len(), "Cart saved");
        Ok(())
    }

    /// Read the persisted list, or an empty list if there is none or it
    /// cannot be read.
    ///
    /// Lines are returned as stored: no catalog check, zero quantities kept.
    /// Elements that do not decode as a line are skipped.
    #[must_use]
    pub fn load(&self) -> Vec<CartLineItem> {
        self.load_lines().items
    }

    /// Like [`load`](Self::load), but also reports how many elements were
    /// skipped.
    #[must_use]
    pub fn load_lines(&self) -> LoadedLines {
        self.try_load_lines().unwrap_or_else(|e| {
            tracing::warn!(key = %self.key, error = %e, "Failed to load cart, starting empty");
            LoadedLines::default()
        })
    }

    /// Read the persisted list. A missing key is an empty list.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the storage read fails or the blob is
    /// not a JSON array.
    pub fn try_load(&self) -> Result<Vec<CartLineItem>, PersistenceError> {
        self.try_load_lines().map(|loaded| loaded.items)
    }

    /// Read the persisted list, decoding each element on its own.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the storage read fails or the blob is
    /// not a JSON array.
    pub fn try_load_lines(&self) -> Result<LoadedLines, PersistenceError> {
        let Some(blob) = self
            .storage
            .get_item(&self.key)
            .map_err(PersistenceError::ReadFailed)?
        else {
            return Ok(LoadedLines::default());
        };
        let entries: Vec<serde_json::Value> =
            serde_json::from_str(&blob).map_err(PersistenceError::Malformed)?;

        let mut loaded = LoadedLines::default();
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<CartLineItem>(entry) {
                Ok(line) => loaded.items.push(line),
                Err(e) => {
                    tracing::warn!(
                        key = %self.key,
                        index,
                        error = %e,
                        "Skipping undecodable cart line"
                    );
                    loaded.skipped += 1;
                }
            }
        }
        Ok(loaded)
    }

    /// Whether the most recent write failed.
    #[must_use]
    pub const fn is_memory_only(&self) -> bool {
        self.memory_only
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }
}
