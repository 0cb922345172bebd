//! # Configuration State
//!
//! Stores app configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CHAIRSIDE_*`)
//! 2. Defaults (this file)
//!
//! Read-only after initialization, so no mutex needed.

use chairside_core::{PricingPolicy, Rate};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// App configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Marketplace display name (shown on receipts)
    pub salon_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Tax, points earn rate and evening multiplier
    pub policy: PricingPolicy,
}

impl Default for ConfigState {
    /// Development defaults: USD, 8% tax, 10% points, ×2 after 6 PM.
    fn default() -> Self {
        ConfigState {
            salon_name: "Chairside".to_string(),
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            policy: PricingPolicy::default(),
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `CHAIRSIDE_SALON_NAME`: Override display name
    /// - `CHAIRSIDE_TAX_RATE`: Tax rate in percent (e.g., "8")
    /// - `CHAIRSIDE_POINTS_RATE`: Points earn rate in percent (e.g., "10")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Invalid values are skipped
    /// with a warning and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(name) = lookup("CHAIRSIDE_SALON_NAME").filter(|n| !n.trim().is_empty()) {
            config.salon_name = name;
        }

        let percent = |var: &str| lookup(var).and_then(|raw| parse_percent(var, &raw));

        if let Some(rate) = percent("CHAIRSIDE_TAX_RATE") {
            config.policy.tax_rate = rate;
        }

        if let Some(rate) = percent("CHAIRSIDE_POINTS_RATE") {
            config.policy.earn_rate = rate;
        }

        if let Err(e) = config.policy.validate() {
            warn!(error = %e, "Invalid pricing policy from environment, using defaults");
            config.policy = PricingPolicy::default();
        }

        config
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ```rust
    /// use chairside_app::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1080), "$10.80");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

fn parse_percent(var: &str, raw: &str) -> Option<Rate> {
    match raw.trim().parse::<f64>() {
        Ok(pct) if pct.is_finite() && (0.0..=100.0).contains(&pct) => {
            Some(Rate::from_percentage(pct))
        }
        _ => {
            warn!(var, value = raw, "Ignoring invalid percentage");
            None
        }
    }
}
