//! Read-only product catalog.
//!
//! The catalog is supplied by the page (or a JSON document) once at startup
//! and shared with the cart behind an `Arc`. Nothing in this crate mutates it.

use indexmap::IndexMap;
use techstore_core::{ProductDescriptor, ProductId};
use thiserror::Error;

/// Errors that can occur when building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog document is not a valid product list.
    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share an ID.
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateProduct(ProductId),
}

/// Fixed mapping from product ID to descriptor, in listing order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: IndexMap<ProductId, ProductDescriptor>,
}

impl Catalog {
    /// Build a catalog from a list of products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateProduct` if two products share an ID.
    pub fn new(
        products: impl IntoIterator<Item = ProductDescriptor>,
    ) -> Result<Self, CatalogError> {
        let mut map = IndexMap::new();
        for product in products {
            let id = product.id;
            if map.insert(id, product).is_some() {
                return Err(CatalogError::DuplicateProduct(id));
            }
        }
        tracing::debug!(products = map.len(), "Catalog loaded");
        Ok(Self { products: map })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the document cannot be parsed or contains
    /// duplicate IDs.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<ProductDescriptor> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&ProductDescriptor> {
        self.products.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.products.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &ProductDescriptor> {
        self.products.values()
    }
}
