//! # Money Module
//!
//! Provides the `Money` type for every amount on a booking: service prices,
//! reward values, discounts, tax and totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    35.00 - 35.00 + 0.1 + 0.2 = 0.30000000000000004                      │
//! │                                                                         │
//! │  A receipt that sums services, subtracts two reward sources and        │
//! │  adds tax would drift a little at every step.                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Sums and differences are exact. The only multiplication that can    │
//! │    produce a fraction of a cent (tax, percent-off) rounds ONCE.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use chairside_core::money::Money;
//! use chairside_core::types::Rate;
//!
//! let haircut = Money::from_cents(3500); // $35.00
//! let beard = Money::from_dollars(15);   // $15.00
//! let subtotal = haircut + beard;
//! assert_eq!(subtotal.cents(), 5000);
//!
//! let tax = subtotal.apply_rate(Rate::from_bps(800)); // 8%
//! assert_eq!(tax.cents(), 400);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::types::Rate;

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction never wraps; callers clamp explicitly
///   with [`Money::saturating_sub`] where a negative amount is meaningless
/// - **Single field tuple struct**: zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// ServiceDefinition.base_price ──► LineItem.price ──► subtotal
///                                                        │
/// ClaimedReward value ──┐                                ▼
///                       ├──► total_discount ──► discounted_subtotal
/// Redeemed reward ──────┘                                │
///                                                        ▼
///                                          tax ──► total ──► Receipt
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use chairside_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// Catalog prices are whole dollars, so this keeps the tables readable.
    #[inline]
    pub const fn from_dollars(dollars: i64) -> Self {
        Money(dollars * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole dollars, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Cents past the whole dollar, 0-99 regardless of sign.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// $0.00
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// A fully discounted booking totals zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Subtracts `other`, flooring the result at zero.
    ///
    /// ```rust
    /// use chairside_core::money::Money;
    ///
    /// let subtotal = Money::from_dollars(10);
    /// let discount = Money::from_dollars(25);
    /// assert_eq!(subtotal.saturating_sub(discount), Money::zero());
    /// ```
    #[inline]
    pub fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0).max(0))
    }

    /// Returns `amount × rate`, rounded half-up to the cent.
    ///
    /// Used for tax on the discounted subtotal and for percentage-off
    /// rewards. i128 keeps large amounts from overflowing.
    ///
    /// ```rust
    /// use chairside_core::money::Money;
    /// use chairside_core::types::Rate;
    ///
    /// let discounted = Money::from_cents(1000); // $10.00
    /// let tax = discounted.apply_rate(Rate::from_bps(800));
    /// assert_eq!(tax.cents(), 80);
    ///
    /// // $0.05 × 8% = 0.4¢ → 0¢; $0.07 × 8% = 0.56¢ → 1¢
    /// assert_eq!(Money::from_cents(5).apply_rate(Rate::from_bps(800)).cents(), 0);
    /// assert_eq!(Money::from_cents(7).apply_rate(Rate::from_bps(800)).cents(), 1);
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        let scaled = self.0 as i128 * rate.bps() as i128;
        let rounded = if scaled >= 0 {
            (scaled + 5000) / 10000
        } else {
            (scaled - 5000) / 10000
        };
        Money::from_cents(rounded.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }
}

/// `$12.34` / `-$5.50`. Log fields only; the app formats with its own currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Arithmetic saturates at the i64 bounds. Reward amounts arrive from
// outside the crate and a sum of them must never wrap negative or panic.

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
