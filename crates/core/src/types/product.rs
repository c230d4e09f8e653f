//! Catalog product and cart line records.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product as listed in the catalog.
///
/// Owned by whoever supplies the catalog; the cart only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDescriptor {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Path or URL of the product image.
    pub image: String,
}

/// One product's entry in the cart.
///
/// `name`, `price` and `image` are copied from the catalog when the line is
/// created and are not refreshed afterwards. The field names are the
/// persisted layout: `{ "id", "name", "price", "quantity", "image" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    pub image: String,
}

impl CartLineItem {
    /// Start a line for `product` with a quantity of one.
    #[must_use]
    pub fn from_product(product: &ProductDescriptor) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity: 1,
            image: product.image.clone(),
        }
    }

    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}
