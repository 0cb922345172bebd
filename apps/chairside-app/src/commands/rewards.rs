//! # Rewards Commands
//!
//! The points wallet and the "use points" toggle on the confirmation screen.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  USE YOUR POINTS                                     1,250 pts          │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  [✓] $5 Off           500 pts                                  │    │
//! │  │  [ ] $10 Off          900 pts                                  │    │
//! │  │  [ ] Free Beard Trim  1500 pts     (not enough points)         │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │                                                                         │
//! │  Tap again to deselect. Only one reward per booking.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chairside_core::{ClaimedReward, RedeemableRewardOption, RedemptionSelection};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{CatalogState, RedemptionState, Wallet, WalletState};

/// One row of the rewards picker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardOptionDto {
    #[serde(flatten)]
    pub option: RedeemableRewardOption,
    pub affordable: bool,
    pub selected: bool,
}

/// Lists redeemable rewards with affordability against the current wallet.
///
/// Unaffordable options are still listed; the UI greys them out. Selecting
/// one anyway is allowed and surfaces `INSUFFICIENT_POINTS` at quote time.
pub fn list_reward_options(
    catalog: &CatalogState,
    wallet: &WalletState,
    redemption: &RedemptionState,
) -> Result<Vec<RewardOptionDto>, ApiError> {
    debug!("list_reward_options command");

    let points = wallet.lock()?.points;
    let current = redemption.current()?;

    Ok(catalog
        .rewards
        .options()
        .iter()
        .map(|option| RewardOptionDto {
            affordable: option.is_affordable(points),
            selected: current.is_selected(&option.id),
            option: option.clone(),
        })
        .collect())
}

/// Selects a reward, switches to it, or deselects it when tapped again.
pub fn toggle_redemption(
    catalog: &CatalogState,
    redemption: &RedemptionState,
    option_id: &str,
) -> Result<RedemptionSelection, ApiError> {
    debug!(option_id, "toggle_redemption command");

    catalog.rewards.get(option_id)?;
    redemption.toggle(option_id)
}

pub fn get_wallet(wallet: &WalletState) -> Result<Wallet, ApiError> {
    debug!("get_wallet command");
    wallet.snapshot()
}

/// Adds a reward the customer claimed elsewhere (promo, referral).
pub fn claim_reward(wallet: &WalletState, reward: ClaimedReward) -> Result<Wallet, ApiError> {
    debug!(reward_id = %reward.id, "claim_reward command");

    let mut guard = wallet.lock()?;
    guard.grant(reward)?;

    info!(rewards = guard.claimed_rewards.len(), "Reward claimed");
    Ok(guard.clone())
}
