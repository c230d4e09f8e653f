//! Techstore Core - Shared types library.
//!
//! This crate provides the types shared by the cart components:
//! - `storefront` - Cart store, persistence, display and notification glue
//! - `integration-tests` - Scenario and property tests over the store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! rendering. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices, plus the
//!   product and cart line records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
