//! Cart configuration loaded from environment variables.
//!
//! Every setting has a default, so [`CartConfig::default()`] is a complete,
//! working configuration. [`CartConfig::from_env()`] overlays whatever is set
//! in the environment (or a `.env` file).
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_STORAGE_KEY` - Local storage key for the cart blob (default: shopping-cart)
//! - `CART_CURRENCY` - ISO 4217 currency code used for display (default: RUB)
//! - `CART_GROUP_SEPARATOR` - Thousands separator character (default: a space)
//! - `CART_NOTIFICATION_MS` - How long a notification stays on screen (default: 3000)
//! - `CART_VALIDATE_ON_LOAD` - Drop persisted lines unknown to the catalog (default: true)

use chrono::TimeDelta;
use techstore_core::{CurrencyCode, Price};
use thiserror::Error;

const DEFAULT_STORAGE_KEY: &str = "shopping-cart";
const DEFAULT_NOTIFICATION_MS: i64 = 3000;
const ENTER_DELAY_MS: i64 = 100;
const EXIT_TRANSITION_MS: i64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Key the item list is persisted under
    pub storage_key: String,
    /// Re-check persisted lines against the catalog when hydrating
    pub validate_on_load: bool,
    /// Price and list formatting
    pub display: DisplayConfig,
    /// Toast timings
    pub notification: NotificationConfig,
    /// User-facing message texts
    pub messages: CartMessages,
}

/// Formatting settings used when turning a snapshot into display data.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub currency: CurrencyCode,
    pub group_separator: char,
    /// Shown in place of the item list when the cart is empty
    pub empty_cart_text: String,
}

/// Toast lifecycle timings.
#[derive(Debug, Clone, Copy)]
pub struct NotificationConfig {
    /// Delay before the enter transition completes
    pub enter_delay: TimeDelta,
    /// Time from creation until the exit transition starts
    pub display_duration: TimeDelta,
    /// Length of the exit transition
    pub exit_duration: TimeDelta,
}

/// Notification and validation texts.
#[derive(Debug, Clone)]
pub struct CartMessages {
    pub item_added: String,
    pub item_removed: String,
    pub cart_cleared: String,
    pub checkout_empty: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            validate_on_load: true,
            display: DisplayConfig::default(),
            notification: NotificationConfig::default(),
            messages: CartMessages::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::default(),
            group_separator: Price::DEFAULT_GROUP_SEPARATOR,
            empty_cart_text: "Your cart is empty".to_string(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enter_delay: TimeDelta::milliseconds(ENTER_DELAY_MS),
            display_duration: TimeDelta::milliseconds(DEFAULT_NOTIFICATION_MS),
            exit_duration: TimeDelta::milliseconds(EXIT_TRANSITION_MS),
        }
    }
}

impl Default for CartMessages {
    fn default() -> Self {
        Self {
            item_added: "Item added to cart!".to_string(),
            item_removed: "Item removed from cart".to_string(),
            cart_cleared: "Cart cleared".to_string(),
            checkout_empty: "Your cart is empty!".to_string(),
        }
    }
}

impl DisplayConfig {
    /// Format a price for display, e.g. `29 990 ₽`.
    #[must_use]
    pub fn format_price(&self, price: Price) -> String {
        format!(
            "{} {}",
            price.grouped(self.group_separator),
            self.currency.symbol()
        )
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(key) = lookup("CART_STORAGE_KEY") {
            if key.trim().is_empty() {
                return Err(invalid("CART_STORAGE_KEY", "must not be empty"));
            }
            config.storage_key = key;
        }

        if let Some(code) = lookup("CART_CURRENCY") {
            config.display.currency = code
                .parse::<CurrencyCode>()
                .map_err(|e| invalid("CART_CURRENCY", e))?;
        }

        if let Some(sep) = lookup("CART_GROUP_SEPARATOR") {
            config.display.group_separator = parse_separator(&sep)?;
        }

        if let Some(ms) = lookup("CART_NOTIFICATION_MS") {
            let ms = ms
                .parse::<u32>()
                .map_err(|e| invalid("CART_NOTIFICATION_MS", e))?;
            config.notification.display_duration = TimeDelta::milliseconds(i64::from(ms));
        }

        if let Some(flag) = lookup("CART_VALIDATE_ON_LOAD") {
            config.validate_on_load = parse_bool(&flag)
                .ok_or_else(|| invalid("CART_VALIDATE_ON_LOAD", "expected true or false"))?;
        }

        Ok(config)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn invalid(key: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.to_string())
}

/// Accepts exactly one character; `nbsp` names the non-breaking space.
fn parse_separator(value: &str) -> Result<char, ConfigError> {
    if value.eq_ignore_ascii_case("nbsp") {
        return Ok('\u{a0}');
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(invalid(
            "CART_GROUP_SEPARATOR",
            "must be a single character",
        )),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
