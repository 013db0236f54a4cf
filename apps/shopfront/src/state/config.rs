//! # Display Configuration
//!
//! Store name and currency formatting, read-only after startup.
//!
//! ## Sources (Priority Order)
//! 1. Environment variables (`SHOPFRONT_STORE_NAME`, `SHOPFRONT_CURRENCY_SYMBOL`,
//!    `SHOPFRONT_CURRENCY_DECIMALS`)
//! 2. Defaults (this file)

use serde::Serialize;
use shopfront_core::Money;

/// Upper bound accepted for `SHOPFRONT_CURRENCY_DECIMALS`.
pub const MAX_CURRENCY_DECIMALS: u8 = 8;

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Shown in the nav bar and on the home page
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "Shopfront".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
        }
    }
}

impl ConfigState {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(name) = lookup("SHOPFRONT_STORE_NAME").filter(|s| !s.trim().is_empty()) {
            config.store_name = name;
        }

        if let Some(symbol) = lookup("SHOPFRONT_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(decimals) = lookup("SHOPFRONT_CURRENCY_DECIMALS")
            .and_then(|v| v.trim().parse::<u8>().ok())
            .filter(|d| *d <= MAX_CURRENCY_DECIMALS)
        {
            config.currency_decimals = decimals;
        }

        config
    }

    /// Formats an amount rounded to `currency_decimals` places.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_app::state::ConfigState;
    /// use shopfront_core::Money;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1998)), "$19.98");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let places = u32::from(self.currency_decimals);
        let rounded = amount.round_to(places);
        let sign = if rounded.is_negative() { "-" } else { "" };
        let digits = rounded.to_fixed(places);
        format!(
            "{}{}{}",
            sign,
            self.currency_symbol,
            digits.trim_start_matches('-')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_format_currency_positive() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(100)), "$1.00");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
    }

    #[test]
    fn test_format_currency_uses_configured_decimals() {
        let whole = ConfigState {
            currency_decimals: 0,
            ..ConfigState::default()
        };
        assert_eq!(whole.format_currency(Money::from_cents(999)), "$10");
        assert_eq!(whole.format_currency(Money::from_cents(-250)), "-$3");

        let fine = ConfigState {
            currency_decimals: 3,
            ..ConfigState::default()
        };
        let line = Money::parse_decimal("0.125").unwrap().multiply_quantity(3);
        assert_eq!(fine.format_currency(line), "$0.375");
        assert_eq!(ConfigState::default().format_currency(line), "$0.38");
    }

    #[test]
    fn test_decimals_env_override() {
        let lookup = |value: &'static str| {
            move |k: &str| (k == "SHOPFRONT_CURRENCY_DECIMALS").then(|| value.to_string())
        };

        assert_eq!(ConfigState::from_lookup(lookup("0")).currency_decimals, 0);
        assert_eq!(ConfigState::from_lookup(lookup(" 3 ")).currency_decimals, 3);
        assert_eq!(ConfigState::from_lookup(lookup("many")).currency_decimals, 2);
        assert_eq!(ConfigState::from_lookup(lookup("40")).currency_decimals, 2);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("SHOPFRONT_STORE_NAME", "Corner Shop"),
            ("SHOPFRONT_CURRENCY_SYMBOL", "€"),
        ]
        .into_iter()
        .collect();

        let config = ConfigState::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.store_name, "Corner Shop");
        assert_eq!(config.format_currency(Money::from_cents(500)), "€5.00");
    }

    #[test]
    fn test_blank_store_name_is_ignored() {
        let config = ConfigState::from_lookup(|k| {
            (k == "SHOPFRONT_STORE_NAME").then(|| "   ".to_string())
        });
        assert_eq!(config.store_name, "Shopfront");
    }
}
