//! Configuration management for the purchase service.
//!
//! Loads configuration from environment variables with the standard price
//! table and seat limit as defaults.

use crate::pricing::{PricingPolicy, ADULT_PRICE, CHILD_PRICE, INFANT_PRICE, MAX_CHARGEABLE_SEATS};
use crate::types::Money;
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Prices and seat limit
    pub pricing: PricingConfig,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Pricing configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Price per adult ticket, in whole units
    pub adult_price: u64,
    /// Price per child ticket, in whole units
    pub child_price: u64,
    /// Price per infant ticket, in whole units
    pub infant_price: u64,
    /// Maximum adult + child tickets per order
    pub max_seats: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            adult_price: ADULT_PRICE.units(),
            child_price: CHILD_PRICE.units(),
            infant_price: INFANT_PRICE.units(),
            max_seats: MAX_CHARGEABLE_SEATS,
        }
    }
}

impl From<PricingConfig> for PricingPolicy {
    fn from(config: PricingConfig) -> Self {
        Self {
            adult_price: Money::from_units(config.adult_price),
            child_price: Money::from_units(config.child_price),
            infant_price: Money::from_units(config.infant_price),
            max_chargeable_seats: config.max_seats,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparsable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PricingConfig::default();
        Self {
            pricing: PricingConfig {
                adult_price: lookup("TICKET_ADULT_PRICE")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.adult_price),
                child_price: lookup("TICKET_CHILD_PRICE")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.child_price),
                infant_price: lookup("TICKET_INFANT_PRICE")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.infant_price),
                max_seats: lookup("TICKET_MAX_SEATS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.max_seats),
            },
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        }
    }

    /// Pricing policy built from this configuration
    #[must_use]
    pub fn policy(&self) -> PricingPolicy {
        self.pricing.into()
    }
}
