//! Integration tests for the Techstore cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p techstore-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Store operations end to end through the sinks
//! - `cart_persistence` - Save/load/hydrate across store instances
//! - `cart_invariants` - Property tests over random operation sequences
//!
//! This library holds the shared fixtures: the demo catalog and recording
//! display and notification sinks.

use std::sync::{Arc, Once};

use techstore_core::{Price, ProductDescriptor, ProductId};
use techstore_storefront::{
    CartConfig, CartSnapshot, CartStore, Catalog, DisplaySink, MemoryStorage, NotificationChannel,
    StorageSink,
};

/// Product 1 in the demo catalog.
pub const PHONE: ProductId = ProductId::new(1);
/// Product 2 in the demo catalog.
pub const LAPTOP: ProductId = ProductId::new(2);
/// Product 3 in the demo catalog.
pub const HEADPHONES: ProductId = ProductId::new(3);
/// An ID the demo catalog does not contain.
pub const UNKNOWN: ProductId = ProductId::new(999);

static TRACING: Once = Once::new();

/// Install a test-writer tracing subscriber once per test binary.
///
/// Honors `RUST_LOG`; defaults to `debug` for the cart crates.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("techstore_storefront=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// The six products listed on the storefront page.
#[must_use]
pub fn demo_products() -> Vec<ProductDescriptor> {
    [
        (1, "XTech Pro Smartphone", 29_990),
        (2, "GameBook Ultra Laptop", 89_990),
        (3, "AudioMax Headphones", 12_990),
        (4, "TabPro Tablet", 45_990),
        (5, "WatchSmart Smart Watch", 19_990),
        (6, "ActionPro Action Camera", 24_990),
    ]
    .into_iter()
    .map(|(id, name, price)| ProductDescriptor {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::new(price),
        image: format!("images/product{id}-large.jpg"),
    })
    .collect()
}

/// The demo catalog, ready to share with a store.
///
/// # Panics
///
/// Never: the demo products have unique IDs.
#[must_use]
#[allow(clippy::expect_used)]
pub fn demo_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::new(demo_products()).expect("demo catalog has unique ids"))
}

/// Display sink that records everything pushed to it.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub renders: Vec<CartSnapshot>,
    pub visibility: Vec<bool>,
}

impl RecordingDisplay {
    /// The most recently rendered snapshot.
    #[must_use]
    pub fn last(&self) -> Option<&CartSnapshot> {
        self.renders.last()
    }
}

impl DisplaySink for RecordingDisplay {
    fn render_snapshot(&mut self, snapshot: &CartSnapshot) {
        self.renders.push(snapshot.clone());
    }

    fn set_visible(&mut self, visible: bool) {
        self.visibility.push(visible);
    }
}

/// Notification channel that records every message.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub messages: Vec<String>,
}

impl NotificationChannel for RecordingNotifier {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// Store type used by most integration tests.
pub type TestCart<S = MemoryStorage> = CartStore<S, RecordingDisplay, RecordingNotifier>;

/// A store over the demo catalog with default config and `storage`.
pub fn cart_with_storage<S: StorageSink>(storage: S) -> TestCart<S> {
    cart_with(storage, CartConfig::default())
}

/// A store over the demo catalog with the given storage and config.
pub fn cart_with<S: StorageSink>(storage: S, config: CartConfig) -> TestCart<S> {
    init_test_tracing();
    CartStore::new(
        demo_catalog(),
        config,
        storage,
        RecordingDisplay::default(),
        RecordingNotifier::default(),
    )
}

/// An empty store over the demo catalog backed by fresh memory storage.
#[must_use]
pub fn empty_cart() -> TestCart {
    cart_with_storage(MemoryStorage::new())
}
