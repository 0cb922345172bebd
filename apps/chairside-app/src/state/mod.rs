//! # State Module
//!
//! Manages the booking-side application state for the mobile host.
//!
//! Instead of a single `AppState` struct containing everything, we use
//! separate state types. Each command declares exactly the state it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐                  │
//! │  │ Selection    │  │ Redemption   │  │ Wallet       │                  │
//! │  │ State        │  │ State        │  │ State        │                  │
//! │  │ Arc<Mutex<   │  │ Arc<Mutex<   │  │ Arc<Mutex<   │                  │
//! │  │  Service     │  │  Redemption  │  │  Wallet      │                  │
//! │  │  Selection>> │  │  Selection>> │  │  >>          │                  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘                  │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐                  │
//! │  │ Bookings     │  │ Catalog      │  │ Config       │                  │
//! │  │ State        │  │ State        │  │ State        │                  │
//! │  │ Arc<Mutex<   │  │ services     │  │ salon name   │                  │
//! │  │  Vec<Receipt>│  │ rewards      │  │ pricing      │                  │
//! │  │  >>          │  │ (read-only)  │  │ (read-only)  │                  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘                  │
//! │                                                                         │
//! │  LOCK ORDER (multi-state commands):                                     │
//! │  selection → redemption → wallet → bookings                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod bookings;
mod catalog;
mod config;
mod selection;
mod wallet;

pub use bookings::BookingsState;
pub use catalog::CatalogState;
pub use config::ConfigState;
pub use selection::{RedemptionState, SelectionState, ServiceSelection};
pub use wallet::{Wallet, WalletState};
