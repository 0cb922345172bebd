//! # Checkout
//!
//! Runs the full pipeline for the booking-confirmation step and freezes the
//! result into a [`Receipt`].
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  SelectionInputBundle ──► selection::resolve                            │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                           pricing::price ───────────┐                   │
//! │                                  │ subtotal         │ subtotal          │
//! │                                  ▼                  ▼                   │
//! │                 rewards::compute_discount    loyalty::compute_points    │
//! │                                  │                  │                   │
//! │                                  ▼                  │                   │
//! │                          totals::finalize           │                   │
//! │                                  │                  │                   │
//! │                                  ▼                  ▼                   │
//! │                             BookingQuote (preview, re-derivable)        │
//! │                                  │                                      │
//! │                        confirm(booking_id, now)                         │
//! │                                  ▼                                      │
//! │                             Receipt (immutable)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A quote holds no state worth resuming: abandoning checkout simply drops
//! it, and the next visit re-derives everything from the inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::catalog::ServiceCatalog;
use crate::error::{CoreError, CoreResult};
use crate::loyalty::{compute_points, PointsAward};
use crate::money::Money;
use crate::pricing::{price, LineItem};
use crate::rewards::{
    compute_discount, AppliedDiscount, ClaimedReward, DiscountResult, DiscountSource,
    RewardCatalog,
};
use crate::selection::{resolve, SelectionInputBundle, SelectionSourceKind};
use crate::totals::{finalize, Totals};
use crate::types::{AppointmentDetails, PricingPolicy};

// =============================================================================
// Quote
// =============================================================================

/// Everything the confirmation screen knows when it asks for a price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(default)]
    pub selections: SelectionInputBundle,
    #[serde(default)]
    pub claimed_rewards: Vec<ClaimedReward>,
    /// Id of the redeemable reward toggled on, if any.
    #[serde(default)]
    pub redemption_id: Option<String>,
    #[serde(default)]
    pub current_points: u32,
    #[serde(default)]
    pub appointment: AppointmentDetails,
}

/// A priced, reward-adjusted preview of the booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuote {
    pub selection_source: SelectionSourceKind,
    pub line_items: Vec<LineItem>,
    pub subtotal: Money,
    pub discounts: DiscountResult,
    pub totals: Totals,
    pub points: PointsAward,
    pub appointment: AppointmentDetails,
}

/// Prices a booking.
///
/// Fails only when `redemption_id` names a reward that is not in the
/// reward catalog. An unaffordable redemption still quotes; the rejection
/// is carried in `discounts.redemption`.
pub fn quote(
    request: &QuoteRequest,
    catalog: &ServiceCatalog,
    rewards: &RewardCatalog,
    policy: &PricingPolicy,
) -> CoreResult<BookingQuote> {
    let redemption = request
        .redemption_id
        .as_deref()
        .map(|id| rewards.get(id))
        .transpose()?;

    let source = resolve(&request.selections);
    let selection_source = source.kind();
    let priced = price(source.services(), catalog);

    let discounts = compute_discount(
        &request.claimed_rewards,
        redemption,
        &priced.line_items,
        priced.subtotal,
        request.current_points,
    );
    let totals = finalize(priced.subtotal, discounts.total_discount, policy.tax_rate);
    let points = compute_points(priced.subtotal, &request.appointment.time, policy);

    debug!(
        source = ?selection_source,
        items = priced.line_items.len(),
        subtotal = %priced.subtotal,
        discount = %discounts.total_discount,
        total = %totals.total,
        points = points.points_earned,
        "Booking quoted"
    );

    Ok(BookingQuote {
        selection_source,
        line_items: priced.line_items,
        subtotal: priced.subtotal,
        discounts,
        totals,
        points,
        appointment: request.appointment.clone(),
    })
}

impl BookingQuote {
    /// The first reason this quote cannot be confirmed, if any.
    pub fn blocking_error(&self) -> Option<CoreError> {
        if self.line_items.is_empty() {
            return Some(CoreError::NoServicesSelected);
        }
        self.discounts.redemption.error()
    }

    pub fn can_confirm(&self) -> bool {
        self.blocking_error().is_none()
    }

    /// Freezes the quote into a receipt.
    ///
    /// Either a complete receipt comes back or nothing does. The caller
    /// supplies the id and timestamp so this stays deterministic.
    pub fn confirm(self, booking_id: Uuid, confirmed_at: DateTime<Utc>) -> CoreResult<Receipt> {
        if let Some(err) = self.blocking_error() {
            return Err(err);
        }

        let points_redeemed = self.discounts.redemption.points_spent();
        let (redeemed, claimed): (Vec<AppliedDiscount>, Vec<AppliedDiscount>) = self
            .discounts
            .applied
            .into_iter()
            .partition(|d| d.source == DiscountSource::Redeemed);

        Ok(Receipt {
            booking_id: booking_id.to_string(),
            booking_reference: booking_reference(&booking_id, confirmed_at),
            selection_source: self.selection_source,
            services: self.line_items,
            subtotal: self.subtotal,
            discounts: ReceiptDiscounts {
                claimed,
                redeemed: redeemed.into_iter().next(),
                claimed_amount: self.discounts.claimed_amount,
                redeemed_amount: self.discounts.redeemed_amount,
                total: self.discounts.total_discount,
            },
            discounted_subtotal: self.totals.discounted_subtotal,
            tax: self.totals.tax,
            total: self.totals.total,
            points_earned: self.points.points_earned,
            base_points: self.points.base_points,
            points_multiplier: self.points.multiplier,
            points_redeemed,
            appointment: self.appointment,
            confirmed_at,
        })
    }
}

// =============================================================================
// Receipt
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptDiscounts {
    pub claimed: Vec<AppliedDiscount>,
    pub redeemed: Option<AppliedDiscount>,
    pub claimed_amount: Money,
    pub redeemed_amount: Money,
    /// Clamped to the subtotal.
    pub total: Money,
}

/// The completed, immutable booking record.
///
/// Fields are read-only by convention: nothing in this crate hands out a
/// `&mut Receipt`, and the app stores receipts behind shared references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub booking_id: String,
    /// Short code shown to the customer, e.g. `BK-261019-3F2A9C`.
    pub booking_reference: String,
    pub selection_source: SelectionSourceKind,
    pub services: Vec<LineItem>,
    pub subtotal: Money,
    pub discounts: ReceiptDiscounts,
    pub discounted_subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub points_earned: u32,
    pub base_points: u32,
    pub points_multiplier: u32,
    pub points_redeemed: u32,
    pub appointment: AppointmentDetails,
    #[ts(as = "String")]
    pub confirmed_at: DateTime<Utc>,
}

impl Receipt {
    /// Wallet balance after this booking: spent points out, earned points in.
    pub fn balance_after(&self, previous_balance: u32) -> u32 {
        previous_balance
            .saturating_sub(self.points_redeemed)
            .saturating_add(self.points_earned)
    }
}

/// `BK-YYMMDD-XXXXXX` from the confirmation date and the booking id.
pub fn booking_reference(booking_id: &Uuid, confirmed_at: DateTime<Utc>) -> String {
    let short: String = booking_id
        .simple()
        .to_string()
        .chars()
        .take(6)
        .collect::<String>()
        .to_ascii_uppercase();
    format!("BK-{}-{}", confirmed_at.format("%y%m%d"), short)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewards::{RedemptionOutcome, RewardValue};
    use crate::types::SelectedService;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 14, 30, 0).unwrap()
    }

    fn booking_id() -> Uuid {
        Uuid::parse_str("3f2a9c10-0000-4000-8000-000000000001").unwrap()
    }

    fn request_for(selection: SelectedService) -> QuoteRequest {
        QuoteRequest {
            selections: SelectionInputBundle {
                context_selections: vec![selection],
                ..Default::default()
            },
            appointment: AppointmentDetails {
                date: "Mon, Oct 19".to_string(),
                time: "2:30 PM".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn run(request: &QuoteRequest) -> BookingQuote {
        quote(
            request,
            &ServiceCatalog::standard(),
            &RewardCatalog::standard(),
            &PricingPolicy::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_free_haircut_covers_haircut() {
        let mut request = request_for(SelectedService::new("hair", "Haircut & Styling"));
        request.claimed_rewards = vec![ClaimedReward {
            id: "claim-1".to_string(),
            title: "Free Haircut".to_string(),
            value: RewardValue::FreeService {
                service_key: "hair".to_string(),
            },
            claimed_at: at(),
        }];

        let quote = run(&request);
        assert_eq!(quote.subtotal.cents(), 3500);
        assert_eq!(quote.discounts.total_discount.cents(), 3500);
        assert_eq!(quote.totals.discounted_subtotal, Money::zero());
        assert_eq!(quote.totals.tax, Money::zero());
        assert_eq!(quote.totals.total, Money::zero());
        // Points follow gross spend.
        assert_eq!(quote.points.points_earned, 3);
    }

    #[test]
    fn test_oversized_claimed_rewards_clamp_without_panicking() {
        let fixed = |id: &str, cents: i64| ClaimedReward {
            id: id.to_string(),
            title: "Promo".to_string(),
            value: RewardValue::Fixed {
                amount: Money::from_cents(cents),
            },
            claimed_at: at(),
        };
        let mut request = request_for(SelectedService::new("hair", "Haircut & Styling"));
        request.claimed_rewards = vec![fixed("max", i64::MAX), fixed("penny", 1)];

        let quote = run(&request);
        assert_eq!(quote.discounts.total_discount, quote.subtotal);
        assert_eq!(quote.totals.total, Money::zero());

        let receipt = quote.confirm(booking_id(), at()).unwrap();
        let used: Vec<&str> = receipt
            .discounts
            .claimed
            .iter()
            .filter(|d| d.amount.is_positive())
            .map(|d| d.reward_id.as_str())
            .collect();
        assert_eq!(used, vec!["max"]);
    }

    #[test]
    fn test_beard_trim_with_five_off_redemption() {
        let mut request = request_for(SelectedService::new("beard", "Beard Trim"));
        request.redemption_id = Some("five_off".to_string());
        request.current_points = 1250;

        let quote = run(&request);
        assert_eq!(quote.subtotal.cents(), 1500);
        assert_eq!(quote.discounts.total_discount.cents(), 500);
        assert_eq!(quote.totals.discounted_subtotal.cents(), 1000);
        assert_eq!(quote.totals.tax.cents(), 80);
        assert_eq!(quote.totals.total.cents(), 1080);

        let receipt = quote.confirm(booking_id(), at()).unwrap();
        assert_eq!(receipt.points_redeemed, 500);
        assert_eq!(receipt.discounts.redeemed.as_ref().map(|d| d.amount.cents()), Some(500));
        assert!(receipt.discounts.claimed.is_empty());
        assert_eq!(receipt.balance_after(1250), 1250 - 500 + 1);
    }

    #[test]
    fn test_unknown_redemption_id_errors() {
        let mut request = request_for(SelectedService::new("beard", "Beard Trim"));
        request.redemption_id = Some("gold_bar".to_string());

        let err = quote(
            &request,
            &ServiceCatalog::standard(),
            &RewardCatalog::standard(),
            &PricingPolicy::default(),
        )
        .unwrap_err();
        assert_eq!(err, CoreError::UnknownReward("gold_bar".to_string()));
    }

    #[test]
    fn test_unaffordable_redemption_quotes_but_blocks_confirm() {
        let mut request = request_for(SelectedService::new("hair", "Haircut & Styling"));
        request.redemption_id = Some("ten_off".to_string());
        request.current_points = 100;

        let quote = run(&request);
        assert!(matches!(
            quote.discounts.redemption,
            RedemptionOutcome::Rejected { required: 900, available: 100, .. }
        ));
        assert_eq!(quote.totals.total.cents(), 3780);
        assert!(!quote.can_confirm());

        let err = quote.confirm(booking_id(), at()).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientPoints { .. }));
    }

    #[test]
    fn test_empty_quote_cannot_confirm() {
        let quote = BookingQuote {
            selection_source: SelectionSourceKind::Default,
            line_items: Vec::new(),
            subtotal: Money::zero(),
            discounts: DiscountResult::default(),
            totals: Totals::default(),
            points: PointsAward::default(),
            appointment: AppointmentDetails::default(),
        };
        assert_eq!(
            quote.confirm(booking_id(), at()).unwrap_err(),
            CoreError::NoServicesSelected
        );
    }

    #[test]
    fn test_no_inputs_quotes_default_selection() {
        let quote = run(&QuoteRequest::default());
        assert_eq!(quote.selection_source, SelectionSourceKind::Default);
        assert_eq!(quote.line_items.len(), 1);
        assert_eq!(quote.subtotal.cents(), 3500);
    }

    #[test]
    fn test_evening_booking_doubles_points_on_receipt() {
        let mut request = request_for(SelectedService::new("color", "Hair Coloring"));
        request.appointment.time = "7:00 PM".to_string();

        let receipt = run(&request).confirm(booking_id(), at()).unwrap();
        assert_eq!(receipt.base_points, 6);
        assert_eq!(receipt.points_multiplier, 2);
        assert_eq!(receipt.points_earned, 12);
    }

    #[test]
    fn test_receipt_carries_reference_and_source() {
        let receipt = run(&request_for(SelectedService::new("beard", "Beard Trim")))
            .confirm(booking_id(), at())
            .unwrap();

        assert_eq!(receipt.booking_id, "3f2a9c10-0000-4000-8000-000000000001");
        assert_eq!(receipt.booking_reference, "BK-261019-3F2A9C");
        assert_eq!(receipt.selection_source, SelectionSourceKind::Context);
        assert_eq!(receipt.confirmed_at, at());
        assert_eq!(receipt.appointment.time, "2:30 PM");
    }

    #[test]
    fn test_receipt_json_is_camel_case() {
        let receipt = run(&request_for(SelectedService::new("beard", "Beard Trim")))
            .confirm(booking_id(), at())
            .unwrap();
        let json = serde_json::to_value(&receipt).unwrap();

        assert_eq!(json["bookingReference"], "BK-261019-3F2A9C");
        assert_eq!(json["subtotal"], 1500);
        assert_eq!(json["pointsEarned"], 1);
        assert!(json["discounts"]["redeemed"].is_null());
    }
}
