//! Error types for cart operations.
//!
//! Cart failures never reach the user as a blocking error: an operation that
//! fails simply does not happen, and the reason is logged. The subsystem
//! errors live next to the code that produces them and are re-exported here.

use techstore_core::ProductId;
use thiserror::Error;

pub use crate::cart::CheckoutError;
pub use crate::catalog::CatalogError;
pub use crate::config::ConfigError;
pub use crate::persistence::PersistenceError;
pub use crate::storage::StorageError;

/// Errors returned by cart store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The requested product is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
