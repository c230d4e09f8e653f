//! Core types for Techstore.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;

pub use id::*;
pub use price::{CurrencyCode, ParseCurrencyError, Price};
pub use product::{CartLineItem, ProductDescriptor};
