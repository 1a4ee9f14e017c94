//! # Configuration State
//!
//! Storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`EASYSHOP_*`)
//! 2. `.env` file (loaded into the environment by the binary)
//! 3. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no lock is needed.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use easyshop_core::validation::{validate_page_size, validate_tax_rate_bps};
use easyshop_core::{
    CheckoutPolicy, Money, TaxRate, DEFAULT_FLAT_SHIPPING_CENTS,
    DEFAULT_FREE_SHIPPING_THRESHOLD_CENTS, DEFAULT_TAX_RATE_BPS,
};
use serde::{Deserialize, Serialize};

/// Default catalog API root.
pub const DEFAULT_API_BASE_URL: &str = "https://dummyjson.com";

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Catalog API root, e.g. `https://dummyjson.com`
    pub api_base_url: String,

    /// Products per listing page
    pub page_size: u32,

    /// Tax rate in basis points (1800 = 18%)
    pub tax_rate_bps: u32,

    /// Orders with a subtotal strictly above this ship free (minor units)
    pub free_shipping_over_cents: i64,

    /// Shipping charged below the threshold (minor units)
    pub flat_shipping_cents: i64,

    /// Simulated payment processing time
    pub checkout_delay_ms: u64,

    /// Currency symbol for display
    pub currency_symbol: String,

    /// Per-request timeout for catalog calls
    pub request_timeout_secs: u64,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: easyshop_catalog::DEFAULT_PAGE_SIZE,
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            free_shipping_over_cents: DEFAULT_FREE_SHIPPING_THRESHOLD_CENTS,
            flat_shipping_cents: DEFAULT_FLAT_SHIPPING_CENTS,
            checkout_delay_ms: 3_000,
            currency_symbol: "₹".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl ConfigState {
    /// Loads configuration from the process environment.
    ///
    /// ## Environment Variables
    /// - `EASYSHOP_API_BASE_URL`: catalog API root
    /// - `EASYSHOP_PAGE_SIZE`: products per page (1-100)
    /// - `EASYSHOP_TAX_RATE`: tax in percent, e.g. "18" or "8.25"
    /// - `EASYSHOP_FREE_SHIPPING_OVER`: free shipping threshold in minor units
    /// - `EASYSHOP_FLAT_SHIPPING`: flat shipping charge in minor units
    /// - `EASYSHOP_CHECKOUT_DELAY_MS`: simulated checkout delay
    /// - `EASYSHOP_CURRENCY_SYMBOL`: display symbol
    /// - `EASYSHOP_REQUEST_TIMEOUT_SECS`: catalog request timeout
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults for
    /// unset variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ConfigState::default();

        let tax_rate_bps = match lookup("EASYSHOP_TAX_RATE") {
            Some(raw) => {
                let pct: f64 = parse_value("EASYSHOP_TAX_RATE", &raw)?;
                if !pct.is_finite() || pct < 0.0 {
                    return Err(ConfigError::InvalidValue("EASYSHOP_TAX_RATE".to_string()));
                }
                TaxRate::from_percentage(pct).bps()
            }
            None => defaults.tax_rate_bps,
        };

        let config = ConfigState {
            api_base_url: lookup("EASYSHOP_API_BASE_URL")
                .map(|url| url.trim().to_string())
                .unwrap_or(defaults.api_base_url),
            page_size: parse_or("EASYSHOP_PAGE_SIZE", &lookup, defaults.page_size)?,
            tax_rate_bps,
            free_shipping_over_cents: parse_or(
                "EASYSHOP_FREE_SHIPPING_OVER",
                &lookup,
                defaults.free_shipping_over_cents,
            )?,
            flat_shipping_cents: parse_or("EASYSHOP_FLAT_SHIPPING", &lookup, defaults.flat_shipping_cents)?,
            checkout_delay_ms: parse_or("EASYSHOP_CHECKOUT_DELAY_MS", &lookup, defaults.checkout_delay_ms)?,
            currency_symbol: lookup("EASYSHOP_CURRENCY_SYMBOL").unwrap_or(defaults.currency_symbol),
            request_timeout_secs: parse_or(
                "EASYSHOP_REQUEST_TIMEOUT_SECS",
                &lookup,
                defaults.request_timeout_secs,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.is_empty() {
            return Err(ConfigError::MissingRequired("EASYSHOP_API_BASE_URL".to_string()));
        }
        validate_page_size(self.page_size)
            .map_err(|_| ConfigError::InvalidValue("EASYSHOP_PAGE_SIZE".to_string()))?;
        validate_tax_rate_bps(self.tax_rate_bps)
            .map_err(|_| ConfigError::InvalidValue("EASYSHOP_TAX_RATE".to_string()))?;
        if self.free_shipping_over_cents < 0 {
            return Err(ConfigError::InvalidValue("EASYSHOP_FREE_SHIPPING_OVER".to_string()));
        }
        if self.flat_shipping_cents < 0 {
            return Err(ConfigError::InvalidValue("EASYSHOP_FLAT_SHIPPING".to_string()));
        }
        Ok(())
    }

    /// Shipping and tax rules for checkout.
    pub fn checkout_policy(&self) -> CheckoutPolicy {
        CheckoutPolicy {
            free_shipping_threshold: Money::from_cents(self.free_shipping_over_cents),
            flat_shipping: Money::from_cents(self.flat_shipping_cents),
            tax_rate: TaxRate::from_bps(self.tax_rate_bps),
        }
    }

    pub fn checkout_delay(&self) -> Duration {
        Duration::from_millis(self.checkout_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Formats a minor-unit amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1234), "₹12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let sign = if cents < 0 { "-" } else { "" };
        let abs = cents.unsigned_abs();
        format!("{}{}{}.{:02}", sign, self.currency_symbol, abs / 100, abs % 100)
    }
}

fn parse_value<T: FromStr>(var: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(var.to_string()))
}

fn parse_or<T, F>(var: &str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(raw) => parse_value(var, &raw),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ConfigState, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConfigState::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config, ConfigState::default());
        assert_eq!(config.page_size, 10);
        assert_eq!(config.tax_rate_bps, 1800);
        assert_eq!(config.checkout_delay(), Duration::from_secs(3));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("EASYSHOP_API_BASE_URL", " http://localhost:3000 "),
            ("EASYSHOP_PAGE_SIZE", "12"),
            ("EASYSHOP_TAX_RATE", "8.25"),
            ("EASYSHOP_CHECKOUT_DELAY_MS", "0"),
            ("EASYSHOP_CURRENCY_SYMBOL", "$"),
        ])
        .unwrap();

        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.page_size, 12);
        assert_eq!(config.tax_rate_bps, 825);
        assert_eq!(config.checkout_delay_ms, 0);
        assert_eq!(config.format_currency(1234), "$12.34");
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = load(&[("EASYSHOP_PAGE_SIZE", "ten")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for EASYSHOP_PAGE_SIZE");

        assert!(load(&[("EASYSHOP_PAGE_SIZE", "0")]).is_err());
        assert!(load(&[("EASYSHOP_TAX_RATE", "-1")]).is_err());
        assert!(load(&[("EASYSHOP_FLAT_SHIPPING", "-100")]).is_err());
        assert!(matches!(
            load(&[("EASYSHOP_API_BASE_URL", "   ")]),
            Err(ConfigError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_checkout_policy_from_config() {
        let config = load(&[("EASYSHOP_FREE_SHIPPING_OVER", "50000")]).unwrap();
        let policy = config.checkout_policy();
        assert_eq!(policy.free_shipping_threshold, Money::from_cents(50_000));
        assert_eq!(policy.flat_shipping, Money::from_cents(9_900));
        assert_eq!(policy.tax_rate.bps(), 1800);
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(1234), "₹12.34");
        assert_eq!(config.format_currency(100), "₹1.00");
        assert_eq!(config.format_currency(1), "₹0.01");
        assert_eq!(config.format_currency(0), "₹0.00");
        assert_eq!(config.format_currency(-1234), "-₹12.34");
        assert_eq!(config.format_currency(123_456_789), "₹1234567.89");
    }
}
