//! # Chairside App Library
//!
//! Booking-side state and commands for the mobile host. The host (native
//! shell or bridge) owns the screens; this crate owns what the confirmation
//! step remembers between taps and hands every price question to
//! `chairside-core`.
//!
//! ## Module Organization
//! ```text
//! chairside_app/
//! ├── lib.rs            ◄─── You are here (logging, preview entry point)
//! ├── state/
//! │   ├── mod.rs        ◄─── State type exports
//! │   ├── selection.rs  ◄─── Multi-select and redemption toggle
//! │   ├── wallet.rs     ◄─── Points balance and claimed rewards
//! │   ├── bookings.rs   ◄─── Confirmed receipts
//! │   ├── catalog.rs    ◄─── Service and reward catalogs
//! │   └── config.rs     ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs        ◄─── Command exports
//! │   ├── selection.rs  ◄─── Service menu commands
//! │   ├── rewards.rs    ◄─── Wallet and redemption commands
//! │   ├── checkout.rs   ◄─── Quote and confirm commands
//! │   └── config.rs     ◄─── Configuration retrieval
//! └── error.rs          ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • Default: info,chairside=debug; override with RUST_LOG             │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • CHAIRSIDE_* environment variables over defaults                   │
//! │                                                                         │
//! │  3. Initialize State Objects ─────────────────────────────────────────► │
//! │     • CatalogState: standard menu and rewards                           │
//! │     • Selection / Redemption / Wallet / Bookings: empty                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::io::{Read, Write};

use chairside_core::QuoteRequest;
use tracing::info;
use tracing_subscriber::EnvFilter;

use state::{CatalogState, ConfigState};

/// Runs the quote preview: one `QuoteRequest` as JSON on stdin, one quote
/// response as JSON on stdout.
///
/// ```text
/// $ echo '{"selections":{"contextSelections":[{"key":"beard","label":"Beard Trim"}]},
///          "redemptionId":"five_off","currentPoints":1250}' | chairside-app
/// { "quote": { ... "totals": { "total": 1080 } }, "canConfirm": true, ... }
/// ```
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = ConfigState::from_env();
    let catalog = CatalogState::standard();

    info!(
        salon = %config.salon_name,
        services = catalog.services.len(),
        rewards = catalog.rewards.options().len(),
        "Chairside quote preview starting"
    );

    let mut raw = String::new();
    std::io::stdin().read_to_string(&mut raw)?;
    let request: QuoteRequest = if raw.trim().is_empty() {
        QuoteRequest::default()
    } else {
        serde_json::from_str(&raw).map_err(error::ApiError::from)?
    };

    let response = commands::preview_quote(&catalog, &config, &request)?;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &response)?;
    writeln!(stdout)?;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=chairside=trace` - Show trace for chairside crates only
/// - Default: `info,chairside=debug`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,chairside=debug"));

    // try_init: a second call (tests, embedding hosts) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
