//! Placeholder checkout.
//!
//! There is no order submission: checkout only acknowledges what is in the
//! cart. It never mutates the cart and never talks to anything external.

use techstore_core::Price;
use thiserror::Error;

use super::CartSnapshot;
use crate::config::CartConfig;

/// Why checkout could not start.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Nothing to check out. The text is the message shown to the user.
    #[error("{0}")]
    EmptyCart(String),
}

/// Acknowledgment shown when checkout starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub item_count: u64,
    pub total_price: Price,
    /// Message reporting the item count and formatted total.
    pub message: String,
}

/// Summarize `snapshot` for checkout.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` if the cart has no lines.
pub fn summarize_checkout(
    snapshot: &CartSnapshot,
    config: &CartConfig,
) -> Result<CheckoutSummary, CheckoutError> {
    if snapshot.is_empty() {
        tracing::info!("Checkout attempted with an empty cart");
        return Err(CheckoutError::EmptyCart(
            config.messages.checkout_empty.clone(),
        ));
    }

    let total = config.display.format_price(snapshot.total_price);
    tracing::info!(
        item_count = snapshot.total_count,
        total = %snapshot.total_price,
        "Proceeding to checkout"
    );

    Ok(CheckoutSummary {
        item_count: snapshot.total_count,
        total_price: snapshot.total_price,
        message: format!(
            "Proceeding to checkout... Items in cart: {}. Total: {total}",
            snapshot.total_count
        ),
    })
}
