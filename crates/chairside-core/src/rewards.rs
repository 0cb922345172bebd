//! # Rewards & Discount Engine
//!
//! Combines the two discount sources on a booking into one clamped amount.
//!
//! ## Discount Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ClaimedReward × N  ─── offered to every booking ─────────┐             │
//! │   • Fixed $ amount                                        │             │
//! │   • Free service (price of that booked service)           ├─► sum       │
//! │   • Percent off a booked service, or off the subtotal     │    │        │
//! │                                                           │    │        │
//! │  RedeemableRewardOption × 0..1 ── costs points ───────────┘    │        │
//! │   • Rejected (InsufficientPoints) when wallet < cost           │        │
//! │                                                                ▼        │
//! │                                     total = min(subtotal, sum)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A reward tied to a service is worth nothing unless that service is on
//! the booking. Over-claiming saturates at the subtotal instead of
//! erroring, and the clamped total is then split across the applied lines
//! (redemption first, then claimed rewards in order) so each line carries
//! what it actually took off. An unaffordable redemption is reported back
//! so the UI can tell the user, and contributes nothing.
//!
//! ## Redemption Selection
//! ```text
//!              toggle(a)                 toggle(b)
//! NoneSelected ─────────► Selected(a) ─────────────► Selected(b)
//!      ▲                      │
//!      └──────────────────────┘
//!              toggle(a)
//! ```

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing::LineItem;
use crate::types::Rate;
use crate::validation::{
    validate_display_name, validate_price, validate_rate_bps, validate_service_key,
    ValidationResult,
};

// =============================================================================
// Claimed Rewards
// =============================================================================

/// How much a claimed reward is worth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RewardValue {
    /// A flat amount off.
    Fixed { amount: Money },
    /// The price of one booked service, e.g. "Free Haircut".
    FreeService {
        #[serde(rename = "serviceKey")]
        service_key: String,
    },
    /// A percentage of one booked service's price, or of the subtotal when
    /// no service is named.
    PercentOff {
        rate: Rate,
        #[serde(rename = "serviceKey", default)]
        service_key: Option<String>,
    },
}

/// A reward granted to the user before this booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ClaimedReward {
    pub id: String,
    pub title: String,
    pub value: RewardValue,
    #[ts(as = "String")]
    pub claimed_at: DateTime<Utc>,
}

impl ClaimedReward {
    /// What this reward takes off a booking, before the combined clamp.
    ///
    /// A service-keyed reward looks for the first booked line with that
    /// key and is worth zero when there is none. Never negative.
    pub fn amount(&self, booked: &[LineItem], subtotal: Money) -> Money {
        let booked_price = |key: &str| {
            booked
                .iter()
                .find(|item| item.service.key == key)
                .map(|item| item.service.base_price)
        };

        let amount = match &self.value {
            RewardValue::Fixed { amount } => *amount,
            RewardValue::FreeService { service_key } => {
                booked_price(service_key).unwrap_or_else(Money::zero)
            }
            RewardValue::PercentOff { rate, service_key } => match service_key {
                Some(key) => booked_price(key).unwrap_or_else(Money::zero).apply_rate(*rate),
                None => subtotal.apply_rate(*rate),
            },
        };
        Money::zero().max(amount)
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_service_key(&self.id)?;
        validate_display_name(&self.title)?;
        validate_reward_value(&self.value)
    }
}

// =============================================================================
// Redeemable Rewards
// =============================================================================

/// A reward the user may spend points on for this booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RedeemableRewardOption {
    pub id: String,
    pub title: String,
    pub points_cost: u32,
    pub discount_value: Money,
}

impl RedeemableRewardOption {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        points_cost: u32,
        discount_value: Money,
    ) -> Self {
        RedeemableRewardOption {
            id: id.into(),
            title: title.into(),
            points_cost,
            discount_value,
        }
    }

    pub fn is_affordable(&self, current_points: u32) -> bool {
        current_points >= self.points_cost
    }

    fn validate(&self) -> ValidationResult<()> {
        validate_service_key(&self.id)?;
        validate_display_name(&self.title)?;
        validate_price("discount_value", self.discount_value)?;
        Ok(())
    }
}

/// The catalog of rewards that can be redeemed at checkout.
///
/// Only built through [`RewardCatalog::from_options`] or
/// [`RewardCatalog::standard`], so every option has passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct RewardCatalog {
    options: Vec<RedeemableRewardOption>,
}

impl RewardCatalog {
    /// Builds a catalog, rejecting invalid or duplicate options.
    pub fn from_options(options: Vec<RedeemableRewardOption>) -> ValidationResult<Self> {
        let mut seen = HashSet::with_capacity(options.len());
        for option in &options {
            option.validate()?;
            if !seen.insert(option.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "reward id".to_string(),
                    value: option.id.clone(),
                });
            }
        }
        Ok(RewardCatalog { options })
    }

    /// The built-in redemption menu.
    pub fn standard() -> Self {
        RewardCatalog {
            options: vec![
                RedeemableRewardOption::new("five_off", "$5 Off", 500, Money::from_dollars(5)),
                RedeemableRewardOption::new("ten_off", "$10 Off", 900, Money::from_dollars(10)),
                RedeemableRewardOption::new(
                    "free_beard",
                    "Free Beard Trim",
                    1500,
                    Money::from_dollars(15),
                ),
            ],
        }
    }

    pub fn get(&self, id: &str) -> CoreResult<&RedeemableRewardOption> {
        self.options
            .iter()
            .find(|o| o.id == id)
            .ok_or_else(|| CoreError::UnknownReward(id.to_string()))
    }

    pub fn options(&self) -> &[RedeemableRewardOption] {
        &self.options
    }

    /// Options the wallet can currently afford, in catalog order.
    pub fn affordable(&self, current_points: u32) -> Vec<&RedeemableRewardOption> {
        self.options
            .iter()
            .filter(|o| o.is_affordable(current_points))
            .collect()
    }
}

impl Default for RewardCatalog {
    fn default() -> Self {
        RewardCatalog::standard()
    }
}

// =============================================================================
// Redemption Selection
// =============================================================================

/// Single-select, toggle-to-deselect redemption state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "state", content = "optionId", rename_all = "snake_case")]
pub enum RedemptionSelection {
    #[default]
    NoneSelected,
    Selected(String),
}

impl RedemptionSelection {
    /// Selecting the active option clears it; any other id replaces it.
    ///
    /// ```rust
    /// use chairside_core::rewards::RedemptionSelection;
    ///
    /// let state = RedemptionSelection::NoneSelected.toggle("five_off");
    /// assert_eq!(state.selected_id(), Some("five_off"));
    /// assert_eq!(state.toggle("five_off"), RedemptionSelection::NoneSelected);
    /// ```
    pub fn toggle(self, option_id: &str) -> Self {
        match self {
            RedemptionSelection::Selected(current) if current == option_id => {
                RedemptionSelection::NoneSelected
            }
            _ => RedemptionSelection::Selected(option_id.to_string()),
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        match self {
            RedemptionSelection::NoneSelected => None,
            RedemptionSelection::Selected(id) => Some(id),
        }
    }

    pub fn is_selected(&self, option_id: &str) -> bool {
        self.selected_id() == Some(option_id)
    }

    /// Takes the selected id and resets to `NoneSelected`.
    pub fn consume(&mut self) -> Option<String> {
        match std::mem::take(self) {
            RedemptionSelection::NoneSelected => None,
            RedemptionSelection::Selected(id) => Some(id),
        }
    }
}

// =============================================================================
// Discount Result
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountSource {
    Claimed,
    Redeemed,
}

/// A labeled discount line for the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppliedDiscount {
    pub source: DiscountSource,
    pub reward_id: String,
    pub title: String,
    /// What the reward is worth on its own.
    pub nominal_amount: Money,
    /// What it actually took off, after the combined clamp.
    pub amount: Money,
}

/// What happened to the selected redemption.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RedemptionOutcome {
    #[default]
    NotRequested,
    #[serde(rename_all = "camelCase")]
    Applied {
        reward_id: String,
        points_cost: u32,
        amount: Money,
    },
    #[serde(rename_all = "camelCase")]
    Rejected {
        reward_id: String,
        required: u32,
        available: u32,
    },
}

impl RedemptionOutcome {
    /// The user-facing error for a rejected redemption.
    pub fn error(&self) -> Option<CoreError> {
        match self {
            RedemptionOutcome::Rejected {
                reward_id,
                required,
                available,
            } => Some(CoreError::InsufficientPoints {
                reward_id: reward_id.clone(),
                required: *required,
                available: *available,
            }),
            _ => None,
        }
    }

    /// Points spent if the booking is confirmed.
    pub fn points_spent(&self) -> u32 {
        match self {
            RedemptionOutcome::Applied { points_cost, .. } => *points_cost,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountResult {
    pub claimed_amount: Money,
    pub redeemed_amount: Money,
    /// `min(subtotal, claimed_amount + redeemed_amount)`
    pub total_discount: Money,
    /// Redemption first, then claimed rewards in order. Line amounts sum
    /// to `total_discount`.
    pub applied: Vec<AppliedDiscount>,
    pub redemption: RedemptionOutcome,
}

/// Computes the combined, clamped discount for a booking.
///
/// ```rust
/// use chairside_core::catalog::ServiceCatalog;
/// use chairside_core::money::Money;
/// use chairside_core::pricing::price;
/// use chairside_core::rewards::{compute_discount, RewardCatalog};
/// use chairside_core::types::SelectedService;
///
/// let priced = price(
///     &[SelectedService::new("beard", "Beard Trim")],
///     &ServiceCatalog::standard(),
/// );
/// let rewards = RewardCatalog::standard();
/// let five_off = rewards.get("five_off").unwrap();
/// let result = compute_discount(&[], Some(five_off), &priced.line_items, priced.subtotal, 1250);
/// assert_eq!(result.total_discount, Money::from_dollars(5));
/// ```
pub fn compute_discount(
    claimed: &[ClaimedReward],
    redemption: Option<&RedeemableRewardOption>,
    booked: &[LineItem],
    subtotal: Money,
    current_points: u32,
) -> DiscountResult {
    let mut applied = Vec::with_capacity(claimed.len() + 1);

    let (redeemed_amount, outcome) = match redemption {
        None => (Money::zero(), RedemptionOutcome::NotRequested),
        Some(option) if option.is_affordable(current_points) => {
            let value = Money::zero().max(option.discount_value);
            applied.push(AppliedDiscount {
                source: DiscountSource::Redeemed,
                reward_id: option.id.clone(),
                title: option.title.clone(),
                nominal_amount: value,
                amount: value,
            });
            (
                value,
                RedemptionOutcome::Applied {
                    reward_id: option.id.clone(),
                    points_cost: option.points_cost,
                    amount: value,
                },
            )
        }
        Some(option) => {
            info!(
                reward_id = %option.id,
                required = option.points_cost,
                available = current_points,
                "Redemption rejected: insufficient points"
            );
            (
                Money::zero(),
                RedemptionOutcome::Rejected {
                    reward_id: option.id.clone(),
                    required: option.points_cost,
                    available: current_points,
                },
            )
        }
    };

    let mut claimed_amount = Money::zero();
    for reward in claimed {
        let amount = reward.amount(booked, subtotal);
        claimed_amount += amount;
        applied.push(AppliedDiscount {
            source: DiscountSource::Claimed,
            reward_id: reward.id.clone(),
            title: reward.title.clone(),
            nominal_amount: amount,
            amount,
        });
    }

    let requested = claimed_amount + redeemed_amount;
    let total_discount = requested.min(Money::zero().max(subtotal));

    if total_discount < requested {
        debug!(%requested, %total_discount, "Discount saturated at subtotal");
    }

    let mut remaining = total_discount;
    for line in &mut applied {
        line.amount = line.nominal_amount.min(remaining);
        remaining = remaining.saturating_sub(line.amount);
    }

    DiscountResult {
        claimed_amount,
        redeemed_amount,
        total_discount,
        applied,
        redemption: outcome,
    }
}

/// Checks a reward value before it is granted to a wallet.
pub fn validate_reward_value(value: &RewardValue) -> ValidationResult<()> {
    match value {
        RewardValue::Fixed { amount } => validate_price("amount", *amount),
        RewardValue::FreeService { service_key } => validate_service_key(service_key),
        RewardValue::PercentOff { rate, service_key } => {
            validate_rate_bps("rate", rate.bps())?;
            if let Some(key) = service_key {
                validate_service_key(key)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ServiceCatalog;
    use crate::pricing::{price, PricedSelection};
    use crate::types::SelectedService;
    use chrono::TimeZone;

    fn claimed(id: &str, title: &str, value: RewardValue) -> ClaimedReward {
        ClaimedReward {
            id: id.to_string(),
            title: title.to_string(),
            value,
            claimed_at: Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap(),
        }
    }

    fn free_haircut(id: &str) -> ClaimedReward {
        claimed(
            id,
            "Free Haircut",
            RewardValue::FreeService {
                service_key: "hair".to_string(),
            },
        )
    }

    fn booked(keys: &[&str]) -> PricedSelection {
        let selected: Vec<SelectedService> =
            keys.iter().map(|k| SelectedService::new(*k, *k)).collect();
        price(&selected, &ServiceCatalog::standard())
    }

    #[test]
    fn test_free_service_is_worth_booked_price() {
        let hair = booked(&["hair", "beard"]);
        let amount = free_haircut("c").amount(&hair.line_items, hair.subtotal);
        assert_eq!(amount.cents(), 3500);
    }

    #[test]
    fn test_keyed_reward_is_worthless_when_service_not_booked() {
        let beard_only = booked(&["beard"]);
        let amount = free_haircut("c").amount(&beard_only.line_items, beard_only.subtotal);
        assert_eq!(amount, Money::zero());

        let result = compute_discount(
            &[free_haircut("c")],
            None,
            &beard_only.line_items,
            beard_only.subtotal,
            0,
        );
        assert_eq!(result.total_discount, Money::zero());
        assert_eq!(result.applied[0].amount, Money::zero());
    }

    #[test]
    fn test_percent_off_service_and_subtotal() {
        let both = booked(&["hair", "beard"]);
        let beard_half = claimed(
            "c",
            "50% Off Beard Trim",
            RewardValue::PercentOff {
                rate: Rate::from_bps(5000),
                service_key: Some("beard".to_string()),
            },
        );
        assert_eq!(beard_half.amount(&both.line_items, both.subtotal).cents(), 750);

        let hair_only = booked(&["hair"]);
        assert_eq!(
            beard_half.amount(&hair_only.line_items, hair_only.subtotal),
            Money::zero()
        );

        let ten_pct = claimed(
            "c",
            "10% Off",
            RewardValue::PercentOff {
                rate: Rate::from_bps(1000),
                service_key: None,
            },
        );
        assert_eq!(ten_pct.amount(&[], Money::from_dollars(50)).cents(), 500);
    }

    #[test]
    fn test_negative_fixed_amount_counts_as_zero() {
        let odd = claimed(
            "c",
            "Broken",
            RewardValue::Fixed {
                amount: Money::from_cents(-500),
            },
        );
        assert_eq!(odd.amount(&[], Money::from_dollars(10)), Money::zero());
    }

    #[test]
    fn test_huge_fixed_rewards_do_not_overflow() {
        let hair = booked(&["hair"]);
        let huge = claimed(
            "huge",
            "Jackpot",
            RewardValue::Fixed {
                amount: Money::from_cents(i64::MAX),
            },
        );
        let penny = claimed(
            "penny",
            "Penny",
            RewardValue::Fixed {
                amount: Money::from_cents(1),
            },
        );

        let result = compute_discount(&[huge, penny], None, &hair.line_items, hair.subtotal, 0);

        assert_eq!(result.claimed_amount, Money::from_cents(i64::MAX));
        assert_eq!(result.total_discount, hair.subtotal);
        assert_eq!(result.applied[0].amount, hair.subtotal);
        assert_eq!(result.applied[1].amount, Money::zero());
    }

    #[test]
    fn test_claimed_discount_saturates_at_subtotal() {
        let hair = booked(&["hair"]);
        let result = compute_discount(
            &[free_haircut("claim-1"), free_haircut("claim-2")],
            None,
            &hair.line_items,
            hair.subtotal,
            0,
        );

        assert_eq!(result.claimed_amount.cents(), 7000);
        assert_eq!(result.total_discount.cents(), 3500);
        assert_eq!(result.redemption, RedemptionOutcome::NotRequested);

        let amounts: Vec<i64> = result.applied.iter().map(|a| a.amount.cents()).collect();
        assert_eq!(amounts, vec![3500, 0]);
        assert_eq!(result.applied[1].nominal_amount.cents(), 3500);
    }

    #[test]
    fn test_redemption_takes_its_share_before_claimed_rewards() {
        let beard = booked(&["beard"]);
        let rewards = RewardCatalog::standard();
        let ten_off = claimed(
            "c",
            "Welcome $10",
            RewardValue::Fixed {
                amount: Money::from_dollars(10),
            },
        );

        let result = compute_discount(
            &[ten_off],
            rewards.get("ten_off").ok(),
            &beard.line_items,
            beard.subtotal,
            900,
        );

        assert_eq!(result.total_discount.cents(), 1500);
        assert_eq!(result.applied[0].source, DiscountSource::Redeemed);
        assert_eq!(result.applied[0].amount.cents(), 1000);
        assert_eq!(result.applied[1].source, DiscountSource::Claimed);
        assert_eq!(result.applied[1].amount.cents(), 500);
    }

    #[test]
    fn test_redemption_applied_when_affordable() {
        let beard = booked(&["beard"]);
        let rewards = RewardCatalog::standard();
        let option = rewards.get("five_off").unwrap();

        let result =
            compute_discount(&[], Some(option), &beard.line_items, beard.subtotal, 1250);

        assert_eq!(result.redeemed_amount.cents(), 500);
        assert_eq!(result.total_discount.cents(), 500);
        assert_eq!(result.redemption.points_spent(), 500);
        assert!(result.redemption.error().is_none());
    }

    #[test]
    fn test_negative_redemption_value_counts_as_zero() {
        let beard = booked(&["beard"]);
        let odd = RedeemableRewardOption::new("odd", "Odd", 0, Money::from_cents(-500));

        let result = compute_discount(&[], Some(&odd), &beard.line_items, beard.subtotal, 0);

        assert_eq!(result.redeemed_amount, Money::zero());
        assert_eq!(result.total_discount, Money::zero());
        assert_eq!(result.applied[0].amount, Money::zero());
    }

    #[test]
    fn test_redemption_rejected_when_unaffordable() {
        let hair = booked(&["hair"]);
        let rewards = RewardCatalog::standard();
        let option = rewards.get("ten_off").unwrap();

        let result = compute_discount(&[], Some(option), &hair.line_items, hair.subtotal, 650);

        assert_eq!(result.redeemed_amount, Money::zero());
        assert_eq!(result.total_discount, Money::zero());
        assert!(result.applied.is_empty());
        assert_eq!(result.redemption.points_spent(), 0);
        assert_eq!(
            result.redemption.error(),
            Some(CoreError::InsufficientPoints {
                reward_id: "ten_off".to_string(),
                required: 900,
                available: 650,
            })
        );
    }

    #[test]
    fn test_exact_points_balance_is_enough() {
        let option = RedeemableRewardOption::new("five_off", "$5 Off", 500, Money::from_dollars(5));
        assert!(option.is_affordable(500));
        assert!(!option.is_affordable(499));
    }

    #[test]
    fn test_claimed_and_redeemed_combine() {
        let rewards = RewardCatalog::standard();
        let fixed = claimed(
            "c",
            "Welcome $3",
            RewardValue::Fixed {
                amount: Money::from_dollars(3),
            },
        );
        let result = compute_discount(
            &[fixed],
            rewards.get("five_off").ok(),
            &[],
            Money::from_dollars(50),
            600,
        );
        assert_eq!(result.claimed_amount.cents(), 300);
        assert_eq!(result.redeemed_amount.cents(), 500);
        assert_eq!(result.total_discount.cents(), 800);
    }

    #[test]
    fn test_zero_subtotal_means_zero_discount() {
        let result = compute_discount(&[free_haircut("c")], None, &[], Money::zero(), 0);
        assert_eq!(result.total_discount, Money::zero());
    }

    #[test]
    fn test_toggle_same_option_twice_returns_to_none() {
        let state = RedemptionSelection::default()
            .toggle("five_off")
            .toggle("five_off");
        assert_eq!(state, RedemptionSelection::NoneSelected);
    }

    #[test]
    fn test_toggle_switches_selection() {
        let state = RedemptionSelection::default()
            .toggle("five_off")
            .toggle("ten_off");
        assert_eq!(state, RedemptionSelection::Selected("ten_off".to_string()));
        assert!(state.is_selected("ten_off"));
        assert!(!state.is_selected("five_off"));
    }

    #[test]
    fn test_consume_resets() {
        let mut state = RedemptionSelection::Selected("five_off".to_string());
        assert_eq!(state.consume(), Some("five_off".to_string()));
        assert_eq!(state, RedemptionSelection::NoneSelected);
        assert_eq!(state.consume(), None);
    }

    #[test]
    fn test_reward_catalog_lookup() {
        let rewards = RewardCatalog::standard();
        assert_eq!(rewards.get("ten_off").unwrap().points_cost, 900);
        assert_eq!(
            rewards.get("nope").unwrap_err(),
            CoreError::UnknownReward("nope".to_string())
        );
        assert_eq!(rewards.affordable(600).len(), 1);
    }

    #[test]
    fn test_reward_catalog_rejects_duplicates() {
        let option = RedeemableRewardOption::new("five_off", "$5 Off", 500, Money::from_dollars(5));
        assert!(RewardCatalog::from_options(vec![option.clone(), option]).is_err());
    }

    #[test]
    fn test_validate_reward_value() {
        assert!(validate_reward_value(&RewardValue::PercentOff {
            rate: Rate::from_bps(2500),
            service_key: None,
        })
        .is_ok());
        assert!(validate_reward_value(&RewardValue::PercentOff {
            rate: Rate::from_bps(20000),
            service_key: None,
        })
        .is_err());
    }

    #[test]
    fn test_reward_value_json_shape() {
        let value: RewardValue =
            serde_json::from_str(r#"{"type":"free_service","serviceKey":"hair"}"#).unwrap();
        assert_eq!(
            value,
            RewardValue::FreeService {
                service_key: "hair".to_string()
            }
        );
    }
}
