//! # Loyalty Points
//!
//! Points are earned on gross spend: the pre-discount subtotal. A PM
//! booking whose clock-face hour is 6 or more earns the evening multiplier.
//! The hour is read as printed, so 12 PM (noon) counts as 12 and qualifies.
//!
//! ```text
//! subtotal $50.00 × earn 10% ──► base 5 pts
//!                                    │
//! "7:00 PM" ──► PM, 7 ≥ 6 ──────► × 2
//!                                    ▼
//!                             points_earned 10
//! ```
//!
//! The multiplier is applied to the stored `points_earned`, and also
//! reported separately so the receipt can say why the number doubled.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{PricingPolicy, Rate};

/// A parsed `h:mm AM|PM` label on the 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    pub fn is_pm(&self) -> bool {
        self.hour >= 12
    }

    /// The hour as printed on the label, 1 through 12.
    pub fn clock_hour(&self) -> u32 {
        match self.hour % 12 {
            0 => 12,
            h => h,
        }
    }
}

/// Parses a 12-hour time label such as `"7:00 PM"`, `"7pm"` or `"12:30 am"`.
///
/// 12 AM is midnight (hour 0) and 12 PM is noon (hour 12). Labels without
/// an AM/PM marker are not accepted.
///
/// ```rust
/// use chairside_core::loyalty::parse_time_label;
///
/// assert_eq!(parse_time_label("7:00 PM").map(|t| t.hour), Some(19));
/// assert_eq!(parse_time_label("12:15 AM").map(|t| t.hour), Some(0));
/// assert!(parse_time_label("19:00").is_none());
/// ```
pub fn parse_time_label(label: &str) -> Option<ClockTime> {
    let normalized = label.trim().to_ascii_uppercase();

    let (clock, is_pm) = if let Some(rest) = normalized.strip_suffix("PM") {
        (rest, true)
    } else if let Some(rest) = normalized.strip_suffix("AM") {
        (rest, false)
    } else {
        return None;
    };

    let clock = clock.trim();
    let (hour_part, minute_part) = match clock.split_once(':') {
        Some((h, m)) => (h.trim(), m.trim()),
        None => (clock, "0"),
    };

    let hour: u32 = hour_part.parse().ok()?;
    let minute: u32 = minute_part.parse().ok()?;

    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }

    let hour = match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };

    Some(ClockTime { hour, minute })
}

/// Points awarded for one booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PointsAward {
    pub base_points: u32,
    pub multiplier: u32,
    /// `base_points × multiplier`; this is what the wallet is credited.
    pub points_earned: u32,
}

/// `floor(subtotal × earn_rate)` in whole currency units.
pub fn base_points(subtotal: Money, earn_rate: Rate) -> u32 {
    let cents = subtotal.cents().max(0) as i128;
    let points = cents * earn_rate.bps() as i128 / 1_000_000;
    u32::try_from(points).unwrap_or(u32::MAX)
}

/// The multiplier for an appointment time label.
pub fn multiplier_for(appointment_time: &str, policy: &PricingPolicy) -> u32 {
    match parse_time_label(appointment_time) {
        Some(time) if time.is_pm() && time.clock_hour() >= policy.evening_start_hour => {
            policy.evening_multiplier
        }
        Some(_) => 1,
        None => {
            debug!(label = %appointment_time, "Unrecognized appointment time, no multiplier");
            1
        }
    }
}

/// Computes the award for a pre-discount subtotal.
///
/// ```rust
/// use chairside_core::loyalty::compute_points;
/// use chairside_core::money::Money;
/// use chairside_core::types::PricingPolicy;
///
/// let policy = PricingPolicy::default();
/// assert_eq!(compute_points(Money::from_dollars(50), "7:00 PM", &policy).multiplier, 2);
/// assert_eq!(compute_points(Money::from_dollars(50), "7:00 AM", &policy).multiplier, 1);
/// ```
pub fn compute_points(
    subtotal: Money,
    appointment_time: &str,
    policy: &PricingPolicy,
) -> PointsAward {
    let base_points = base_points(subtotal, policy.earn_rate);
    let multiplier = multiplier_for(appointment_time, policy);

    PointsAward {
        base_points,
        multiplier,
        points_earned: base_points.saturating_mul(multiplier),
    }
}
