//! Display glue between the cart store and the page.
//!
//! The store pushes every new [`CartSnapshot`] into a [`DisplaySink`] and
//! never reads anything back. [`CartView`] is the formatted projection of a
//! snapshot that sinks render: badge, rows with quantity controls, total.

mod html;

pub use html::HtmlDisplay;

use techstore_core::ProductId;

use crate::cart::CartSnapshot;
use crate::config::DisplayConfig;

/// Write-only rendering target for cart state.
pub trait DisplaySink {
    /// Show `snapshot` (badge, item list, total).
    fn render_snapshot(&mut self, snapshot: &CartSnapshot);

    /// Show or hide the cart panel.
    fn set_visible(&mut self, visible: bool);
}

/// Cart line display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    /// Quantity the "-" control sets; zero removes the line.
    pub decrement_to: i64,
    /// Quantity the "+" control sets.
    pub increment_to: i64,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
    /// The counter badge is hidden while the cart is empty.
    pub badge_visible: bool,
    pub empty_text: String,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty(config: &DisplayConfig) -> Self {
        Self::from_snapshot(&CartSnapshot::default(), config)
    }

    #[must_use]
    pub fn from_snapshot(snapshot: &CartSnapshot, config: &DisplayConfig) -> Self {
        let items = snapshot
            .items
            .iter()
            .map(|line| CartItemView {
                id: line.id,
                name: line.name.clone(),
                image: line.image.clone(),
                quantity: line.quantity,
                price: config.format_price(line.price),
                line_price: config.format_price(line.line_total()),
                decrement_to: i64::from(line.quantity) - 1,
                increment_to: i64::from(line.quantity) + 1,
            })
            .collect();

        Self {
            items,
            total: config.format_price(snapshot.total_price),
            item_count: snapshot.total_count,
            badge_visible: snapshot.total_count > 0,
            empty_text: config.empty_cart_text.clone(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use techstore_core::{CartLineItem, Price};

    use super::*;

    fn snapshot() -> CartSnapshot {
        CartSnapshot {
            items: vec![
                CartLineItem {
                    id: ProductId::new(1),
                    name: "XTech Pro Smartphone".to_string(),
                    price: Price::new(29_990),
                    quantity: 2,
                    image: "images/product1-large.jpg".to_string(),
                },
                CartLineItem {
                    id: ProductId::new(3),
                    name: "AudioMax Headphones".to_string(),
                    price: Price::new(12_990),
                    quantity: 1,
                    image: "images/product3-large.jpg".to_string(),
                },
            ],
            total_price: Price::new(72_970),
            total_count: 3,
        }
    }

    #[test]
    fn test_empty_view_hides_badge() {
        let view = CartView::empty(&DisplayConfig::default());
        assert!(view.is_empty());
        assert!(!view.badge_visible);
        assert_eq!(view.item_count, 0);
        assert_eq!(view.total, "0 ₽");
        assert_eq!(view.empty_text, "Your cart is empty");
    }

    #[test]
    fn test_rows_are_formatted() {
        let view = CartView::from_snapshot(&snapshot(), &DisplayConfig::default());

        assert!(view.badge_visible);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.total, "72 970 ₽");
        assert_eq!(view.items.len(), 2);

        let phone = &view.items[0];
        assert_eq!(phone.price, "29 990 ₽");
        assert_eq!(phone.line_price, "59 980 ₽");
        assert_eq!(phone.decrement_to, 1);
        assert_eq!(phone.increment_to, 3);

        let headphones = &view.items[1];
        assert_eq!(headphones.decrement_to, 0);
    }

    #[test]
    fn test_separator_from_config() {
        let config = DisplayConfig {
            group_separator: '\u{a0}',
            ..DisplayConfig::default()
        };
        let view = CartView::from_snapshot(&snapshot(), &config);
        assert_eq!(view.total, "72\u{a0}970 ₽");
    }
}
