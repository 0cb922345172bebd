//! # Tax & Totals
//!
//! ```text
//! subtotal ─► − total_discount ─► discounted_subtotal (floored at 0)
//!                                        │
//!                                        ├─► × tax_rate ─► tax
//!                                        ▼
//!                                  total = discounted_subtotal + tax
//! ```
//!
//! Tax is charged on what the customer actually pays for, never on the
//! pre-discount subtotal.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Rate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub discounted_subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

/// Applies the discount and tax.
///
/// ```rust
/// use chairside_core::money::Money;
/// use chairside_core::totals::finalize;
/// use chairside_core::types::Rate;
///
/// let totals = finalize(Money::from_dollars(100), Money::from_dollars(30), Rate::from_bps(800));
/// assert_eq!(totals.discounted_subtotal.cents(), 7000);
/// assert_eq!(totals.tax.cents(), 560);
/// assert_eq!(totals.total.cents(), 7560);
/// ```
pub fn finalize(subtotal: Money, total_discount: Money, tax_rate: Rate) -> Totals {
    let discounted_subtotal = subtotal.saturating_sub(Money::zero().max(total_discount));
    let tax = discounted_subtotal.apply_rate(tax_rate);

    Totals {
        discounted_subtotal,
        tax,
        total: discounted_subtotal + tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAX: Rate = Rate::from_bps(800);

    #[test]
    fn test_fully_discounted_booking_is_free() {
        let totals = finalize(Money::from_dollars(35), Money::from_dollars(35), TAX);
        assert_eq!(totals, Totals::default());
    }

    #[test]
    fn test_beard_trim_with_five_off() {
        let totals = finalize(Money::from_dollars(15), Money::from_dollars(5), TAX);
        assert_eq!(totals.discounted_subtotal.cents(), 1000);
        assert_eq!(totals.tax.cents(), 80);
        assert_eq!(totals.total.cents(), 1080);
    }

    #[test]
    fn test_over_discount_floors_at_zero() {
        let totals = finalize(Money::from_dollars(10), Money::from_dollars(25), TAX);
        assert_eq!(totals.discounted_subtotal, Money::zero());
        assert_eq!(totals.total, Money::zero());
    }

    #[test]
    fn test_tax_uses_discounted_subtotal() {
        let with_discount = finalize(Money::from_dollars(50), Money::from_dollars(10), TAX);
        let without = finalize(Money::from_dollars(50), Money::zero(), TAX);
        assert_eq!(with_discount.tax.cents(), 320);
        assert_eq!(without.tax.cents(), 400);
    }

    #[test]
    fn test_zero_tax_rate() {
        let totals = finalize(Money::from_dollars(20), Money::zero(), Rate::zero());
        assert_eq!(totals.total.cents(), 2000);
    }
}
