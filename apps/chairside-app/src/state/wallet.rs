//! # Wallet State
//!
//! The customer's points balance and the rewards they have claimed but not
//! yet used. Claimed rewards are spent by the booking they discount.

use std::sync::{Arc, Mutex, MutexGuard};

use chairside_core::{ClaimedReward, Receipt, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub points: u32,
    pub claimed_rewards: Vec<ClaimedReward>,
}

impl Wallet {
    pub fn new(points: u32) -> Self {
        Wallet {
            points,
            claimed_rewards: Vec::new(),
        }
    }

    /// Adds a claimed reward. Ids must be unique within the wallet.
    pub fn grant(&mut self, reward: ClaimedReward) -> Result<(), ValidationError> {
        reward.validate()?;
        if self.claimed_rewards.iter().any(|r| r.id == reward.id) {
            return Err(ValidationError::Duplicate {
                field: "reward_id".to_string(),
                value: reward.id,
            });
        }
        self.claimed_rewards.push(reward);
        Ok(())
    }

    /// Settles a confirmed booking against the wallet.
    ///
    /// Redeemed points go out and earned points come in. A claimed reward
    /// is used up only when its share of the clamped discount is positive.
    /// A free beard trim on a haircut-only booking stays in the wallet, and
    /// so does a second free haircut once the first has zeroed the bill.
    pub fn settle(&mut self, receipt: &Receipt) {
        let before = self.points;
        self.points = receipt.balance_after(before);
        self.claimed_rewards.retain(|r| {
            !receipt
                .discounts
                .claimed
                .iter()
                .any(|d| d.reward_id == r.id && d.amount.is_positive())
        });

        debug!(
            before,
            after = self.points,
            redeemed = receipt.points_redeemed,
            earned = receipt.points_earned,
            "Wallet settled"
        );
    }
}

/// Managed wallet state.
#[derive(Debug, Clone, Default)]
pub struct WalletState {
    wallet: Arc<Mutex<Wallet>>,
}

impl WalletState {
    pub fn new(wallet: Wallet) -> Self {
        WalletState {
            wallet: Arc::new(Mutex::new(wallet)),
        }
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, Wallet>, ApiError> {
        Ok(self.wallet.lock()?)
    }

    pub fn snapshot(&self) -> Result<Wallet, ApiError> {
        Ok(self.lock()?.clone())
    }
}
