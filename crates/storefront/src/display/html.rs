//! HTML fragment display sink.
//!
//! Renders the cart badge, the item list and the total as separate HTML
//! fragments, the same split the page swaps in after each cart update. The
//! host reads the latest fragments and injects them into the page.

use askama::Template;

use super::{CartView, DisplaySink};
use crate::cart::CartSnapshot;
use crate::config::DisplayConfig;

/// Cart count badge fragment.
#[derive(Template)]
#[template(path = "partials/cart_count.html")]
struct CartCountTemplate {
    count: u64,
    visible: bool,
}

/// Cart items fragment.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
struct CartItemsTemplate<'a> {
    cart: &'a CartView,
}

/// Cart total fragment.
#[derive(Template)]
#[template(path = "partials/cart_total.html")]
struct CartTotalTemplate<'a> {
    total: &'a str,
}

/// Display sink that keeps the most recently rendered HTML fragments.
#[derive(Debug, Clone)]
pub struct HtmlDisplay {
    config: DisplayConfig,
    view: CartView,
    badge: String,
    items: String,
    total: String,
    visible: bool,
    renders: usize,
}

impl HtmlDisplay {
    /// A sink showing an empty, hidden cart until the first render.
    #[must_use]
    pub fn new(config: DisplayConfig) -> Self {
        let view = CartView::empty(&config);
        let mut display = Self {
            config,
            view,
            badge: String::new(),
            items: String::new(),
            total: String::new(),
            visible: false,
            renders: 0,
        };
        display.render_fragments();
        display
    }

    /// Latest view model.
    #[must_use]
    pub const fn view(&self) -> &CartView {
        &self.view
    }

    #[must_use]
    pub fn badge_html(&self) -> &str {
        &self.badge
    }

    #[must_use]
    pub fn items_html(&self) -> &str {
        &self.items
    }

    #[must_use]
    pub fn total_html(&self) -> &str {
        &self.total
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Number of snapshots rendered so far.
    #[must_use]
    pub const fn render_count(&self) -> usize {
        self.renders
    }

    /// Re-render every fragment from the current view. A fragment that fails
    /// to render keeps its previous content.
    fn render_fragments(&mut self) {
        let badge = CartCountTemplate {
            count: self.view.item_count,
            visible: self.view.badge_visible,
        };
        match badge.render() {
            Ok(html) => self.badge = html,
            Err(e) => tracing::error!(error = %e, "Failed to render cart badge"),
        }

        match (CartItemsTemplate { cart: &self.view }).render() {
            Ok(html) => self.items = html,
            Err(e) => tracing::error!(error = %e, "Failed to render cart items"),
        }

        match (CartTotalTemplate {
            total: &self.view.total,
        })
        .render()
        {
            Ok(html) => self.total = html,
            Err(e) => tracing::error!(error = %e, "Failed to render cart total"),
        }
    }
}

impl DisplaySink for HtmlDisplay {
    fn render_snapshot(&mut self, snapshot: &CartSnapshot) {
        self.view = CartView::from_snapshot(snapshot, &self.config);
        self.render_fragments();
        self.renders += 1;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use techstore_core::{CartLineItem, Price, ProductId};

    use super::*;

    fn snapshot() -> CartSnapshot {
        CartSnapshot {
            items: vec![CartLineItem {
                id: ProductId::new(4),
                name: "TabPro <Tablet>".to_string(),
                price: Price::new(45_990),
                quantity: 2,
                image: "images/product4-large.jpg".to_string(),
            }],
            total_price: Price::new(91_980),
            total_count: 2,
        }
    }

    #[test]
    fn test_initial_state_is_empty_and_hidden() {
        let display = HtmlDisplay::new(DisplayConfig::default());
        assert!(!display.is_visible());
        assert_eq!(display.render_count(), 0);
        assert!(display.badge_html().contains("display: none"));
        assert!(display.items_html().contains("Your cart is empty"));
        assert!(display.total_html().contains("0 ₽"));
    }

    #[test]
    fn test_render_snapshot_updates_fragments() {
        let mut display = HtmlDisplay::new(DisplayConfig::default());
        display.render_snapshot(&snapshot());

        assert_eq!(display.render_count(), 1);
        assert!(display.badge_html().contains(">2<"));
        assert!(!display.badge_html().contains("display: none"));

        let items = display.items_html();
        assert!(items.contains("data-id=\"4\""));
        assert!(items.contains("45 990 ₽"));
        assert!(items.contains("data-quantity=\"1\""));
        assert!(items.contains("data-quantity=\"3\""));
        assert!(!items.contains("Your cart is empty"));

        assert!(display.total_html().contains("91 980 ₽"));
    }

    #[test]
    fn test_product_names_are_escaped() {
        let mut display = HtmlDisplay::new(DisplayConfig::default());
        display.render_snapshot(&snapshot());
        let items = display.items_html();
        assert!(items.contains("TabPro &"));
        assert!(!items.contains("<Tablet>"));
    }

    #[test]
    fn test_set_visible() {
        let mut display = HtmlDisplay::new(DisplayConfig::default());
        display.set_visible(true);
        assert!(display.is_visible());
        display.set_visible(false);
        assert!(!display.is_visible());
    }
}
