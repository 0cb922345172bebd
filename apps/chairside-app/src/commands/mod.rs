//! # Commands Module
//!
//! All commands exposed to the mobile bridge.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── selection.rs  ◄─── Service menu and multi-select
//! ├── rewards.rs    ◄─── Redeemable rewards, toggle, wallet
//! ├── checkout.rs   ◄─── Quote, confirm, receipts
//! └── config.rs     ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! fn list_services(catalog: &CatalogState)
//!
//! // Needs the catalog and the selection
//! fn toggle_service(catalog: &CatalogState, selection: &SelectionState, key: &str)
//!
//! // Needs everything a booking touches
//! fn confirm_booking(catalog, config, selection, redemption, wallet, bookings, params)
//! ```

pub mod checkout;
pub mod config;
pub mod rewards;
pub mod selection;

pub use checkout::*;
pub use config::*;
pub use rewards::*;
pub use selection::*;
