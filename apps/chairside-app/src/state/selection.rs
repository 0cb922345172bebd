//! # Selection State
//!
//! The in-app multi-select list and the redemption toggle. Both are owned
//! here, by the app; the core only ever sees a snapshot of them.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Tap service ──────────► toggle_service() ────► items push / remove    │
//! │                                                                         │
//! │  Tap reward ───────────► toggle_redemption() ─► RedemptionSelection    │
//! │                                                     .toggle(id)         │
//! │                                                                         │
//! │  Confirm ──────────────► confirm_booking() ───► snapshot, then clear   │
//! │                                                                         │
//! │  Leave screen ─────────► (nothing)            next quote re-derives     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use chairside_core::{
    RedemptionSelection, SelectedService, ValidationError, MAX_SERVICES_PER_BOOKING,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// The user's current multi-select, in the order services were tapped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSelection {
    pub items: Vec<SelectedService>,
}

impl ServiceSelection {
    /// Adds the service, or removes it when its key is already selected.
    ///
    /// Returns whether the service is selected afterwards.
    pub fn toggle(&mut self, service: SelectedService) -> Result<bool, ValidationError> {
        let before = self.items.len();
        self.items.retain(|s| s.key != service.key);
        if self.items.len() != before {
            return Ok(false);
        }

        if self.items.len() >= MAX_SERVICES_PER_BOOKING {
            return Err(ValidationError::OutOfRange {
                field: "services".to_string(),
                min: 1,
                max: MAX_SERVICES_PER_BOOKING as i64,
            });
        }

        self.items.push(service);
        Ok(true)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.iter().any(|s| s.key == key)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Managed State
// =============================================================================

/// Managed multi-select state.
///
/// `Arc<Mutex<_>>` so the host can hand clones to several threads; every
/// read or write takes the lock briefly.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selection: Arc<Mutex<ServiceSelection>>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Holds the lock across a multi-state operation (see `confirm_booking`).
    pub fn lock(&self) -> Result<MutexGuard<'_, ServiceSelection>, ApiError> {
        Ok(self.selection.lock()?)
    }

    pub fn with_selection<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&ServiceSelection) -> R,
    {
        let selection = self.lock()?;
        Ok(f(&selection))
    }

    pub fn with_selection_mut<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&mut ServiceSelection) -> R,
    {
        let mut selection = self.lock()?;
        Ok(f(&mut selection))
    }

    pub fn snapshot(&self) -> Result<Vec<SelectedService>, ApiError> {
        self.with_selection(|s| s.items.clone())
    }
}

/// Managed redemption toggle.
#[derive(Debug, Clone, Default)]
pub struct RedemptionState {
    selection: Arc<Mutex<RedemptionSelection>>,
}

impl RedemptionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, RedemptionSelection>, ApiError> {
        Ok(self.selection.lock()?)
    }

    pub fn current(&self) -> Result<RedemptionSelection, ApiError> {
        Ok(self.lock()?.clone())
    }

    /// Applies the toggle and returns the new state.
    pub fn toggle(&self, option_id: &str) -> Result<RedemptionSelection, ApiError> {
        let mut guard = self.lock()?;
        let next = std::mem::take(&mut *guard).toggle(option_id);
        *guard = next.clone();
        Ok(next)
    }
}
