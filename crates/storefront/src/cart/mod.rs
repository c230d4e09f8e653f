//! The cart store.
//!
//! [`CartStore`] is the only owner of the cart contents. Every mutation goes
//! through it and ends the same way: totals recomputed from the items, the
//! item list persisted, a fresh snapshot pushed to the display sink and,
//! for adds, removals and clears, a notification.
//!
//! The store is built once at startup with its collaborators injected and
//! handed to whatever needs it; there is no global cart.

mod checkout;

pub use checkout::{CheckoutError, CheckoutSummary, summarize_checkout};

use std::sync::Arc;

use indexmap::IndexMap;
use techstore_core::{CartLineItem, Price, ProductId};
use tracing::instrument;

use crate::catalog::Catalog;
use crate::config::CartConfig;
use crate::display::DisplaySink;
use crate::error::CartError;
use crate::notification::NotificationChannel;
use crate::persistence::PersistenceAdapter;
use crate::storage::StorageSink;

/// Key name that closes the cart panel (matches `KeyboardEvent.key`).
pub const ESCAPE_KEY: &str = "Escape";

/// Read-only copy of the cart for display and checkout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartSnapshot {
    /// Lines in the order they were first added.
    pub items: Vec<CartLineItem>,
    pub total_price: Price,
    pub total_count: u64,
}

impl CartSnapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Line for `id`, if present.
    #[must_use]
    pub fn item(&self, id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// What [`CartStore::hydrate`] did with the persisted list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HydrateReport {
    /// Lines now in the cart.
    pub restored: usize,
    /// Lines dropped because they did not decode, had a zero quantity or
    /// named an unknown product.
    pub dropped: usize,
    /// Duplicate lines folded into an earlier line for the same product.
    pub merged: usize,
}

/// Cart contents and their derived totals.
#[derive(Debug, Default)]
struct CartState {
    items: IndexMap<ProductId, CartLineItem>,
    total_price: Price,
    total_count: u64,
}

impl CartState {
    /// Recompute both totals from scratch.
    fn recompute(&mut self) {
        self.total_count = self
            .items
            .values()
            .map(|item| u64::from(item.quantity))
            .sum();
        self.total_price = self.items.values().map(CartLineItem::line_total).sum();
    }

    fn lines(&self) -> Vec<CartLineItem> {
        self.items.values().cloned().collect()
    }
}

/// Sole authority over the cart.
pub struct CartStore<S, D, N> {
    catalog: Arc<Catalog>,
    config: CartConfig,
    state: CartState,
    persistence: PersistenceAdapter<S>,
    display: D,
    notifier: N,
    panel_open: bool,
}

impl<S, D, N> CartStore<S, D, N>
where
    S: StorageSink,
    D: DisplaySink,
    N: NotificationChannel,
{
    /// Create an empty cart. Call [`hydrate`](Self::hydrate) to restore a
    /// persisted one.
    pub fn new(
        catalog: Arc<Catalog>,
        config: CartConfig,
        storage: S,
        display: D,
        notifier: N,
    ) -> Self {
        let persistence = PersistenceAdapter::new(storage, config.storage_key.clone());
        Self {
            catalog,
            config,
            state: CartState::default(),
            persistence,
            display,
            notifier,
            panel_open: false,
        }
    }

    /// Replace the cart with the persisted item list and render it.
    ///
    /// Lines that do not decode (a negative or fractional quantity, say) and
    /// lines with a zero quantity are always dropped, and repeated product IDs
    /// are folded together. With `validate_on_load`, lines whose product is
    /// no longer in the catalog are dropped too. The cleaned list is written
    /// back only if something changed.
    #[instrument(skip(self))]
    pub fn hydrate(&mut self) -> HydrateReport {
        let loaded = self.persistence.load_lines();
        let mut report = HydrateReport {
            dropped: loaded.skipped,
            ..HydrateReport::default()
        };
        let mut items: IndexMap<ProductId, CartLineItem> = IndexMap::new();

        for line in loaded.items {
            if line.quantity == 0 {
                tracing::warn!(product_id = %line.id, "Dropping persisted line with zero quantity");
                report.dropped += 1;
                continue;
            }
            if self.config.validate_on_load && !self.catalog.contains(line.id) {
                tracing::warn!(product_id = %line.id, "Dropping persisted line for unknown product");
                report.dropped += 1;
                continue;
            }
            if let Some(existing) = items.get_mut(&line.id) {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
                report.merged += 1;
            } else {
                items.insert(line.id, line);
            }
        }

        report.restored = items.len();
        self.state.items = items;
        self.state.recompute();

        if report.dropped > 0 || report.merged > 0 {
            self.persistence.save(&self.state.lines());
        }
        self.render();

        tracing::info!(
            restored = report.restored,
            dropped = report.dropped,
            merged = report.merged,
            "Cart hydrated"
        );
        report
    }

    /// Add one unit of `product_id`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if the product is not in the
    /// catalog. Nothing is changed, persisted, rendered or announced then.
    #[instrument(skip(self))]
    pub fn add_item(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let Some(product) = self.catalog.get(product_id) else {
            tracing::error!(%product_id, "Product not found");
            return Err(CartError::ProductNotFound(product_id));
        };

        if let Some(item) = self.state.items.get_mut(&product_id) {
            item.quantity = item.quantity.saturating_add(1);
            tracing::debug!(%product_id, quantity = item.quantity, "Increased quantity");
        } else {
            self.state
                .items
                .insert(product_id, CartLineItem::from_product(product));
            tracing::debug!(%product_id, name = %product.name, "New line added");
        }

        self.commit();
        self.notifier.notify(&self.config.messages.item_added);
        Ok(())
    }

    /// Remove the line for `product_id`. Absent products are ignored.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, product_id: ProductId) {
        let Some(removed) = self.state.items.shift_remove(&product_id) else {
            return;
        };
        tracing::debug!(%product_id, name = %removed.name, "Line removed");

        self.commit();
        self.notifier.notify(&self.config.messages.item_removed);
    }

    /// Set the quantity of an existing line.
    ///
    /// Zero or negative quantities remove the line. Products not in the cart
    /// are ignored. No notification is sent for a plain quantity change.
    #[instrument(skip(self))]
    pub fn set_quantity(&mut self, product_id: ProductId, new_quantity: i64) {
        if new_quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        let Some(item) = self.state.items.get_mut(&product_id) else {
            return;
        };
        item.quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        tracing::debug!(%product_id, quantity = item.quantity, "Quantity set");

        self.commit();
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.state.items.clear();
        self.commit();
        self.notifier.notify(&self.config.messages.cart_cleared);
    }

    /// Read-only copy of the current contents and totals.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.state.lines(),
            total_price: self.state.total_price,
            total_count: self.state.total_count,
        }
    }

    /// Summarize the cart for the placeholder checkout.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if there is nothing to check out.
    pub fn checkout(&self) -> Result<CheckoutSummary, CheckoutError> {
        summarize_checkout(&self.snapshot(), &self.config)
    }

    pub fn open_cart_panel(&mut self) {
        self.panel_open = true;
        self.display.set_visible(true);
    }

    pub fn close_cart_panel(&mut self) {
        self.panel_open = false;
        self.display.set_visible(false);
    }

    pub fn toggle_cart_panel(&mut self) {
        if self.panel_open {
            self.close_cart_panel();
        } else {
            self.open_cart_panel();
        }
    }

    /// Handle a key press. Escape closes an open panel.
    ///
    /// Returns whether the key was handled.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if key == ESCAPE_KEY && self.panel_open {
            self.close_cart_panel();
            return true;
        }
        false
    }

    #[must_use]
    pub const fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn config(&self) -> &CartConfig {
        &self.config
    }

    #[must_use]
    pub const fn persistence(&self) -> &PersistenceAdapter<S> {
        &self.persistence
    }

    #[must_use]
    pub const fn display(&self) -> &D {
        &self.display
    }

    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Recompute totals, persist and render.
    fn commit(&mut self) {
        self.state.recompute();
        self.persistence.save(&self.state.lines());
        self.render();
    }

    fn render(&mut self) {
        let snapshot = self.snapshot();
        self.display.render_snapshot(&snapshot);
    }
}
