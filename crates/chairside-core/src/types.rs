//! # Domain Types
//!
//! Small value types shared by every stage of the booking pipeline.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ SelectedService │   │      Rate       │   │  PricingPolicy  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  key            │   │  bps (u32)      │   │  tax_rate       │       │
//! │  │  label          │   │  800 = 8%       │   │  earn_rate      │       │
//! │  └─────────────────┘   └─────────────────┘   │  multiplier     │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────────┐                                               │
//! │  │ AppointmentDetails  │  salon / barber / date / time labels          │
//! │  └─────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::validation::{
    validate_clock_hour, validate_multiplier, validate_rate_bps, ValidationResult,
};

// =============================================================================
// Rate
// =============================================================================

/// A rate represented in basis points (bps).
///
/// 1 basis point = 0.01% = 1/10000. Used for the tax rate, the loyalty
/// earn rate and percentage-off rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a percentage (for config parsing).
    ///
    /// Negative or non-finite input yields zero.
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return Rate::zero();
        }
        Rate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Selected Service
// =============================================================================

/// A `(key, label)` pair chosen by the user before the pricing step.
///
/// The key is not guaranteed to exist in the catalog; the label is what the
/// user saw and becomes the display name when the key is unknown.
///
/// Accepts `id` for `key` and `name` / `title` for `label` because older
/// navigation payloads used those names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectedService {
    #[serde(alias = "id")]
    pub key: String,
    #[serde(alias = "name", alias = "title")]
    pub label: String,
}

impl SelectedService {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        SelectedService {
            key: key.into(),
            label: label.into(),
        }
    }
}

// =============================================================================
// Appointment Details
// =============================================================================

/// The slot the user picked, as display labels.
///
/// Availability comes from the scheduling provider; the core only reads the
/// time label for the evening points multiplier and copies the rest onto
/// the receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDetails {
    pub salon_name: Option<String>,
    pub barber_name: Option<String>,
    /// e.g. "Sat, Oct 24"
    pub date: String,
    /// e.g. "7:00 PM"
    pub time: String,
}

// =============================================================================
// Pricing Policy
// =============================================================================

/// Rates and loyalty rules applied at checkout.
///
/// ## Defaults
/// - Tax: 8% on the discounted subtotal
/// - Points: 10% of the pre-discount subtotal, in whole currency units
/// - PM bookings from 6 on the clock face earn ×2, which takes in 12 PM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingPolicy {
    pub tax_rate: Rate,
    pub earn_rate: Rate,
    pub evening_multiplier: u32,
    /// PM clock hour (1-12, as printed on the label) from which the
    /// evening multiplier applies. 12 PM counts as 12.
    pub evening_start_hour: u32,
}

impl PricingPolicy {
    pub const DEFAULT_TAX_RATE: Rate = Rate::from_bps(800);
    pub const DEFAULT_EARN_RATE: Rate = Rate::from_bps(1000);
    pub const DEFAULT_EVENING_MULTIPLIER: u32 = 2;
    pub const DEFAULT_EVENING_START_HOUR: u32 = 6;

    /// Checks every field against its allowed range.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_rate_bps("tax_rate", self.tax_rate.bps())?;
        validate_rate_bps("earn_rate", self.earn_rate.bps())?;
        validate_multiplier(self.evening_multiplier)?;
        validate_clock_hour("evening_start_hour", self.evening_start_hour)?;
        Ok(())
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            tax_rate: Self::DEFAULT_TAX_RATE,
            earn_rate: Self::DEFAULT_EARN_RATE,
            evening_multiplier: Self::DEFAULT_EVENING_MULTIPLIER,
            evening_start_hour: Self::DEFAULT_EVENING_START_HOUR,
        }
    }
}
