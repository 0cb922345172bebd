//! # chairside-core: Booking Price & Rewards Engine
//!
//! This crate is the only part of Chairside with real arithmetic in it.
//! Everything else (screens, salon directories, slot availability) lives
//! in the mobile app and its providers; this crate takes the raw selection
//! inputs from the confirmation step and returns a priced,
//! reward-adjusted receipt.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Chairside Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile UI                                    │   │
//! │  │   Salons ──► Services ──► Time Slot ──► Confirm ──► Receipt     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    chairside-app (state + commands)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ explicit values in                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ chairside-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   catalog ─► selection ─► pricing ─► rewards ─► totals          │   │
//! │  │                                 └──► loyalty                    │   │
//! │  │                         checkout ─► Receipt                     │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO SHARED STATE • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Service lookup table with fallback synthesis
//! - [`selection`] - Precedence resolution across the three selection sources
//! - [`pricing`] - Line items and subtotal
//! - [`rewards`] - Claimed rewards, redemption toggle, clamped discount
//! - [`totals`] - Tax on the discounted subtotal
//! - [`loyalty`] - Points on gross spend with the evening multiplier
//! - [`checkout`] - Quote and receipt
//! - [`money`] - Integer-cent money
//! - [`types`] - Rates, selections, appointment details, pricing policy
//! - [`validation`] - Catalog and policy rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chairside_core::checkout::{quote, QuoteRequest};
//! use chairside_core::selection::SelectionInputBundle;
//! use chairside_core::{PricingPolicy, RewardCatalog, SelectedService, ServiceCatalog};
//!
//! let request = QuoteRequest {
//!     selections: SelectionInputBundle {
//!         context_selections: vec![SelectedService::new("beard", "Beard Trim")],
//!         ..Default::default()
//!     },
//!     redemption_id: Some("five_off".to_string()),
//!     current_points: 1250,
//!     ..Default::default()
//! };
//!
//! let quote = quote(
//!     &request,
//!     &ServiceCatalog::standard(),
//!     &RewardCatalog::standard(),
//!     &PricingPolicy::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(quote.totals.total.cents(), 1080); // $15 - $5 + 8% tax
//! ```

pub mod catalog;
pub mod checkout;
pub mod error;
pub mod loyalty;
pub mod money;
pub mod pricing;
pub mod rewards;
pub mod selection;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{ServiceCatalog, ServiceDefinition};
pub use checkout::{BookingQuote, QuoteRequest, Receipt};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use rewards::{ClaimedReward, RedeemableRewardOption, RedemptionSelection, RewardCatalog};
pub use types::*;

/// Maximum services on one booking.
///
/// Guards the in-app multi-select; a chair can't fit more than this into a
/// single appointment anyway.
pub const MAX_SERVICES_PER_BOOKING: usize = 8;
