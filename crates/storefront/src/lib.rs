//! Techstore Storefront cart library.
//!
//! A headless shopping cart for the storefront page. The page supplies the
//! catalog and three collaborators, and the cart does the rest:
//!
//! - [`storage::StorageSink`] - where the item list is persisted (local storage)
//! - [`display::DisplaySink`] - where rendered cart state is pushed
//! - [`notification::NotificationChannel`] - where short messages go
//!
//! ```
//! use std::sync::Arc;
//!
//! use techstore_core::{Price, ProductDescriptor, ProductId};
//! use techstore_storefront::{
//!     CartConfig, CartStore, Catalog, HtmlDisplay, MemoryStorage, ToastQueue,
//! };
//!
//! let catalog = Catalog::new([ProductDescriptor {
//!     id: ProductId::new(1),
//!     name: "XTech Pro Smartphone".to_string(),
//!     price: Price::new(29_990),
//!     image: "images/product1-large.jpg".to_string(),
//! }])?;
//! let config = CartConfig::default();
//! let display = HtmlDisplay::new(config.display.clone());
//! let toasts = ToastQueue::new(config.notification);
//! let mut cart = CartStore::new(Arc::new(catalog), config, MemoryStorage::new(), display, toasts);
//!
//! cart.hydrate();
//! cart.add_item(ProductId::new(1))?;
//! assert_eq!(cart.snapshot().total_price, Price::new(29_990));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod display;
pub mod error;
pub mod notification;
pub mod persistence;
pub mod storage;

pub use cart::{CartSnapshot, CartStore, CheckoutSummary, HydrateReport};
pub use catalog::Catalog;
pub use config::CartConfig;
pub use display::{CartView, DisplaySink, HtmlDisplay};
pub use error::CartError;
pub use notification::{NotificationChannel, ToastQueue};
pub use persistence::PersistenceAdapter;
pub use storage::{FileStorage, MemoryStorage, StorageSink};
