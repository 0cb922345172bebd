//! # Bookings State
//!
//! Confirmed receipts, newest last. Receipts are only ever appended and
//! handed out as clones, never mutated in place.

use std::sync::{Arc, Mutex, MutexGuard};

use chairside_core::Receipt;

use crate::error::ApiError;

#[derive(Debug, Clone, Default)]
pub struct BookingsState {
    receipts: Arc<Mutex<Vec<Receipt>>>,
}

impl BookingsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, Vec<Receipt>>, ApiError> {
        Ok(self.receipts.lock()?)
    }

    pub fn all(&self) -> Result<Vec<Receipt>, ApiError> {
        Ok(self.lock()?.clone())
    }

    pub fn find(&self, booking_id: &str) -> Result<Receipt, ApiError> {
        self.lock()?
            .iter()
            .find(|r| r.booking_id == booking_id || r.booking_reference == booking_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Booking", booking_id))
    }
}
