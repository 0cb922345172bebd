//! # API Error Type
//!
//! Unified error type for commands called by the mobile bridge.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Mobile UI                        Rust                                  │
//! │  ─────────                        ────                                  │
//! │  confirmBooking()                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function  ──►  Result<T, ApiError>                      │  │
//! │  │         │                                                        │  │
//! │  │  CoreError::InsufficientPoints ──► INSUFFICIENT_POINTS ─────────►│  │
//! │  │  CoreError::NoServicesSelected ──► NO_SERVICES_SELECTED ────────►│  │
//! │  │  Poisoned state lock ────────────► INTERNAL ────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "INSUFFICIENT_POINTS",                                       │
//! │    "message": "You need 900 points to redeem $10 Off ..." }             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Malformed selections and unknown service keys never reach this type;
//! the core recovers from both on its own.

use std::sync::PoisonError;

use chairside_core::{CoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;

/// Error returned from commands.
///
/// ```json
/// { "code": "NO_SERVICES_SELECTED", "message": "Select at least one service to book" }
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown reward or booking id
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Confirmation blocked until a service is chosen
    NoServicesSelected,

    /// Redemption costs more points than the wallet holds
    InsufficientPoints,

    /// Internal error (poisoned state, serialization)
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoServicesSelected => ApiError::new(
                ErrorCode::NoServicesSelected,
                "Select at least one service to book",
            ),
            CoreError::InsufficientPoints {
                reward_id,
                required,
                available,
            } => ApiError::new(
                ErrorCode::InsufficientPoints,
                format!(
                    "You need {} points to redeem {}, you have {}",
                    required, reward_id, available
                ),
            ),
            CoreError::UnknownReward(id) => ApiError::not_found("Reward", &id),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::validation(format!("Invalid request payload: {}", err))
    }
}

impl<T> From<PoisonError<T>> for ApiError {
    fn from(_: PoisonError<T>) -> Self {
        tracing::error!("State lock poisoned");
        ApiError::internal("Booking state is unavailable")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_points_maps_to_code() {
        let err: ApiError = CoreError::InsufficientPoints {
            reward_id: "ten_off".to_string(),
            required: 900,
            available: 650,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientPoints);
        assert!(err.message.contains("900"));
    }

    #[test]
    fn test_serializes_screaming_code() {
        let err: ApiError = CoreError::NoServicesSelected.into();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NO_SERVICES_SELECTED");
    }

    #[test]
    fn test_unknown_reward_is_not_found() {
        let err: ApiError = CoreError::UnknownReward("gold".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Reward not found: gold");
    }
}
