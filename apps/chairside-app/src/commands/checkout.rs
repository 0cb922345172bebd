//! # Checkout Commands
//!
//! Quote and confirm the booking on the confirmation screen.
//!
//! ## Confirmation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Booking Confirmation                                 │
//! │                                                                         │
//! │  Screen opens                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  get_quote(params) ──► selection + redemption + wallet snapshot         │
//! │       │                      │                                          │
//! │       │                      ▼                                          │
//! │       │               chairside_core::checkout::quote                   │
//! │       ▼                                                                 │
//! │  Shows line items, discounts, tax, total, points to earn                │
//! │       │                                                                 │
//! │  "Confirm Booking"                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  confirm_booking(params)                                                │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  1. Lock selection → redemption → wallet → bookings            │    │
//! │  │  2. Re-quote from the locked state                             │    │
//! │  │  3. Confirm (fails on no services / insufficient points)       │    │
//! │  │  4. Settle wallet, consume redemption, clear selection         │    │
//! │  │  5. Store receipt                                              │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Receipt screen                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is written until step 3 succeeds, so a failed confirmation leaves
//! every state exactly as it was.

use chairside_core::checkout::{quote, QuoteRequest};
use chairside_core::selection::SelectionInputBundle;
use chairside_core::{
    AppointmentDetails, BookingQuote, ClaimedReward, Receipt, RedemptionSelection,
    SelectedService,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::{
    BookingsState, CatalogState, ConfigState, RedemptionState, SelectionState, Wallet,
    WalletState,
};

/// Inputs the confirmation screen receives from the previous screens.
///
/// The in-app multi-select comes from [`SelectionState`]; these are the
/// other two selection sources, as handed over by navigation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutParams {
    /// JSON array of `{ id, name }` from a deep link or older build.
    pub serialized_selections: Option<String>,
    /// Single-service hand-off from the old flow.
    pub legacy_service: Option<SelectedService>,
    pub appointment: AppointmentDetails,
}

/// Display strings for the totals block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDisplay {
    pub subtotal: String,
    pub discount: String,
    pub tax: String,
    pub total: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub quote: BookingQuote,
    pub can_confirm: bool,
    /// Why the confirm button is disabled, if it is.
    pub notice: Option<ApiError>,
    pub display: QuoteDisplay,
}

impl QuoteResponse {
    fn build(quote: BookingQuote, config: &ConfigState) -> Self {
        let display = QuoteDisplay {
            subtotal: config.format_currency(quote.subtotal.cents()),
            discount: config.format_currency(quote.discounts.total_discount.cents()),
            tax: config.format_currency(quote.totals.tax.cents()),
            total: config.format_currency(quote.totals.total.cents()),
        };
        let notice = quote.blocking_error().map(ApiError::from);

        QuoteResponse {
            can_confirm: notice.is_none(),
            notice,
            quote,
            display,
        }
    }
}

fn build_request(
    selected: &[SelectedService],
    redemption: &RedemptionSelection,
    wallet: &Wallet,
    params: &CheckoutParams,
) -> QuoteRequest {
    QuoteRequest {
        selections: SelectionInputBundle {
            context_selections: selected.to_vec(),
            serialized_selections: params.serialized_selections.clone(),
            legacy_single: params.legacy_service.clone(),
        },
        claimed_rewards: wallet.claimed_rewards.clone(),
        redemption_id: redemption.selected_id().map(str::to_string),
        current_points: wallet.points,
        appointment: params.appointment.clone(),
    }
}

/// Quotes a fully assembled request.
///
/// Used by the stdin preview and by any host that keeps its own state.
pub fn preview_quote(
    catalog: &CatalogState,
    config: &ConfigState,
    request: &QuoteRequest,
) -> Result<QuoteResponse, ApiError> {
    let booking = quote(request, &catalog.services, &catalog.rewards, &config.policy)?;
    Ok(QuoteResponse::build(booking, config))
}

/// Prices the booking from the current app state.
///
/// An unaffordable redemption does not fail the quote; it comes back with
/// `canConfirm: false` and an `INSUFFICIENT_POINTS` notice.
pub fn get_quote(
    catalog: &CatalogState,
    config: &ConfigState,
    selection: &SelectionState,
    redemption: &RedemptionState,
    wallet: &WalletState,
    params: &CheckoutParams,
) -> Result<QuoteResponse, ApiError> {
    debug!("get_quote command");

    let selected = selection.snapshot()?;
    let current = redemption.current()?;
    let wallet = wallet.snapshot()?;

    preview_quote(catalog, config, &build_request(&selected, &current, &wallet, params))
}

/// Confirms the booking and returns the immutable receipt.
///
/// ## Errors
/// - `NO_SERVICES_SELECTED` when nothing priced
/// - `INSUFFICIENT_POINTS` when the selected redemption costs too much
/// - `NOT_FOUND` when the selected redemption left the catalog
pub fn confirm_booking(
    catalog: &CatalogState,
    config: &ConfigState,
    selection: &SelectionState,
    redemption: &RedemptionState,
    wallet: &WalletState,
    bookings: &BookingsState,
    params: &CheckoutParams,
) -> Result<Receipt, ApiError> {
    debug!("confirm_booking command");

    let mut selection = selection.lock()?;
    let mut redemption = redemption.lock()?;
    let mut wallet = wallet.lock()?;
    let mut bookings = bookings.lock()?;

    let request = build_request(&selection.items, &redemption, &wallet, params);
    let booking = quote(&request, &catalog.services, &catalog.rewards, &config.policy)?;
    let receipt = booking.confirm(Uuid::new_v4(), Utc::now())?;

    wallet.settle(&receipt);
    redemption.consume();
    selection.clear();
    bookings.push(receipt.clone());

    info!(
        booking_id = %receipt.booking_id,
        reference = %receipt.booking_reference,
        total = %receipt.total,
        points_earned = receipt.points_earned,
        points_redeemed = receipt.points_redeemed,
        "Booking confirmed"
    );

    Ok(receipt)
}

pub fn list_bookings(bookings: &BookingsState) -> Result<Vec<Receipt>, ApiError> {
    debug!("list_bookings command");
    bookings.all()
}

/// Looks up a receipt by booking id or by its `BK-` reference.
pub fn get_booking(bookings: &BookingsState, booking_id: &str) -> Result<Receipt, ApiError> {
    debug!(booking_id, "get_booking command");
    bookings.find(booking_id)
}

/// Claimed rewards waiting in the wallet. Every one of them is offered to
/// the next quote; those worth nothing on it stay for a later booking.
pub fn pending_claimed_rewards(wallet: &WalletState) -> Result<Vec<ClaimedReward>, ApiError> {
    Ok(wallet.lock()?.claimed_rewards.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{claim_reward, toggle_redemption, toggle_service};
    use crate::error::ErrorCode;
    use chairside_core::money::Money;
    use chairside_core::rewards::RewardValue;
    use chairside_core::selection::SelectionSourceKind;
    use chrono::TimeZone;

    struct Harness {
        catalog: CatalogState,
        config: ConfigState,
        selection: SelectionState,
        redemption: RedemptionState,
        wallet: WalletState,
        bookings: BookingsState,
    }

    impl Harness {
        fn with_points(points: u32) -> Self {
            Harness {
                catalog: CatalogState::standard(),
                config: ConfigState::default(),
                selection: SelectionState::new(),
                redemption: RedemptionState::new(),
                wallet: WalletState::new(Wallet::new(points)),
                bookings: BookingsState::new(),
            }
        }

        fn quote(&self, params: &CheckoutParams) -> QuoteResponse {
            get_quote(
                &self.catalog,
                &self.config,
                &self.selection,
                &self.redemption,
                &self.wallet,
                params,
            )
            .unwrap()
        }

        fn confirm(&self, params: &CheckoutParams) -> Result<Receipt, ApiError> {
            confirm_booking(
                &self.catalog,
                &self.config,
                &self.selection,
                &self.redemption,
                &self.wallet,
                &self.bookings,
                params,
            )
        }
    }

    fn afternoon() -> CheckoutParams {
        CheckoutParams {
            appointment: AppointmentDetails {
                salon_name: Some("Fade Lab".to_string()),
                barber_name: Some("Marcus".to_string()),
                date: "Mon, Oct 19".to_string(),
                time: "2:30 PM".to_string(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_free_haircut_booking_end_to_end() {
        let h = Harness::with_points(0);
        claim_reward(
            &h.wallet,
            ClaimedReward {
                id: "claim-1".to_string(),
                title: "Free Haircut".to_string(),
                value: RewardValue::FreeService {
                    service_key: "hair".to_string(),
                },
                claimed_at: Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap(),
            },
        )
        .unwrap();
        toggle_service(&h.catalog, &h.selection, "hair").unwrap();

        let response = h.quote(&afternoon());
        assert!(response.can_confirm);
        assert_eq!(response.display.subtotal, "$35.00");
        assert_eq!(response.display.total, "$0.00");

        let receipt = h.confirm(&afternoon()).unwrap();
        assert_eq!(receipt.total, Money::zero());
        assert_eq!(receipt.points_earned, 3);

        let wallet = h.wallet.snapshot().unwrap();
        assert_eq!(wallet.points, 3);
        assert!(wallet.claimed_rewards.is_empty());
    }

    #[test]
    fn test_beard_trim_with_five_off_end_to_end() {
        let h = Harness::with_points(1250);
        toggle_service(&h.catalog, &h.selection, "beard").unwrap();
        toggle_redemption(&h.catalog, &h.redemption, "five_off").unwrap();

        let response = h.quote(&afternoon());
        assert_eq!(response.display.discount, "$5.00");
        assert_eq!(response.display.tax, "$0.80");
        assert_eq!(response.display.total, "$10.80");

        let receipt = h.confirm(&afternoon()).unwrap();
        assert_eq!(receipt.points_redeemed, 500);
        assert_eq!(h.wallet.snapshot().unwrap().points, 751);

        // Selection and redemption reset for the next booking.
        assert!(h.selection.snapshot().unwrap().is_empty());
        assert_eq!(h.redemption.current().unwrap(), RedemptionSelection::NoneSelected);
        assert_eq!(get_booking(&h.bookings, &receipt.booking_reference).unwrap(), receipt);
    }

    #[test]
    fn test_insufficient_points_leaves_state_untouched() {
        let h = Harness::with_points(650);
        toggle_service(&h.catalog, &h.selection, "hair").unwrap();
        toggle_redemption(&h.catalog, &h.redemption, "ten_off").unwrap();

        let response = h.quote(&afternoon());
        assert!(!response.can_confirm);
        assert_eq!(
            response.notice.as_ref().map(|n| n.code),
            Some(ErrorCode::InsufficientPoints)
        );

        let err = h.confirm(&afternoon()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientPoints);
        assert_eq!(h.wallet.snapshot().unwrap().points, 650);
        assert_eq!(h.selection.snapshot().unwrap().len(), 1);
        assert!(h.redemption.current().unwrap().is_selected("ten_off"));
        assert!(list_bookings(&h.bookings).unwrap().is_empty());
    }

    #[test]
    fn test_navigation_sources_used_when_nothing_tapped() {
        let h = Harness::with_points(0);
        let params = CheckoutParams {
            serialized_selections: Some(r#"[{"id":"shave","name":"Hot Towel Shave"}]"#.to_string()),
            legacy_service: Some(SelectedService::new("kids", "Kids Cut")),
            ..afternoon()
        };

        let response = h.quote(&params);
        assert_eq!(response.quote.selection_source, SelectionSourceKind::Serialized);
        assert_eq!(response.quote.subtotal.cents(), 2500);

        toggle_service(&h.catalog, &h.selection, "beard").unwrap();
        let response = h.quote(&params);
        assert_eq!(response.quote.selection_source, SelectionSourceKind::Context);
    }

    #[test]
    fn test_unused_claimed_reward_stays_in_wallet() {
        let h = Harness::with_points(0);
        claim_reward(
            &h.wallet,
            ClaimedReward {
                id: "claim-beard".to_string(),
                title: "Free Beard Trim".to_string(),
                value: RewardValue::FreeService {
                    service_key: "beard".to_string(),
                },
                claimed_at: Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap(),
            },
        )
        .unwrap();
        toggle_service(&h.catalog, &h.selection, "hair").unwrap();

        h.confirm(&afternoon()).unwrap();
        assert_eq!(pending_claimed_rewards(&h.wallet).unwrap().len(), 1);
    }

    #[test]
    fn test_second_free_haircut_is_kept_when_first_covers_booking() {
        let h = Harness::with_points(0);
        for id in ["claim-1", "claim-2"] {
            claim_reward(
                &h.wallet,
                ClaimedReward {
                    id: id.to_string(),
                    title: "Free Haircut".to_string(),
                    value: RewardValue::FreeService {
                        service_key: "hair".to_string(),
                    },
                    claimed_at: Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap(),
                },
            )
            .unwrap();
        }
        toggle_service(&h.catalog, &h.selection, "hair").unwrap();

        let receipt = h.confirm(&afternoon()).unwrap();
        let amounts: Vec<i64> = receipt
            .discounts
            .claimed
            .iter()
            .map(|d| d.amount.cents())
            .collect();
        assert_eq!(amounts, vec![3500, 0]);
        assert_eq!(receipt.total.cents(), 0);

        let left = pending_claimed_rewards(&h.wallet).unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, "claim-2");
    }

    #[test]
    fn test_evening_booking_earns_double() {
        let h = Harness::with_points(0);
        toggle_service(&h.catalog, &h.selection, "color").unwrap();
        let mut params = afternoon();
        params.appointment.time = "7:00 PM".to_string();

        let receipt = h.confirm(&params).unwrap();
        assert_eq!(receipt.points_multiplier, 2);
        assert_eq!(receipt.points_earned, 12);
        assert_eq!(h.wallet.snapshot().unwrap().points, 12);
    }
}
