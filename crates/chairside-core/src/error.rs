//! # Error Types
//!
//! Domain-specific error types for chairside-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  chairside-core errors (this file)                                     │
//! │  ├── CoreError        - User-facing booking failures                   │
//! │  └── ValidationError  - Catalog / policy input failures                │
//! │                                                                         │
//! │  chairside-app errors                                                  │
//! │  └── ApiError         - What the mobile UI sees (serialized)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What is NOT an error
//! Malformed serialized selections and unknown service keys never surface
//! here. The resolver falls through to the next source and the catalog
//! synthesizes a fallback definition.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Booking failures the user must act on.
///
/// None of these are fatal: the UI shows the message and the user either
/// changes the selection or drops the redemption.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Confirmation attempted with no priced services.
    ///
    /// ## When This Occurs
    /// - A custom default selection was configured empty
    /// - A caller priced an empty list directly and tried to confirm it
    #[error("No services selected")]
    NoServicesSelected,

    /// Not enough loyalty points for the selected redemption.
    ///
    /// ## User Workflow
    /// ```text
    /// Select "$10 Off" (900 pts)
    ///      │
    ///      ▼
    /// Wallet: 650 pts
    ///      │
    ///      ▼
    /// InsufficientPoints { reward_id: "ten_off", required: 900, available: 650 }
    ///      │
    ///      ▼
    /// UI shows: "You need 900 points to redeem this reward"
    /// ```
    #[error("Insufficient points for {reward_id}: requires {required}, available {available}")]
    InsufficientPoints {
        reward_id: String,
        required: u32,
        available: u32,
    },

    /// The selected redemption id is not in the reward catalog.
    #[error("Reward not found: {0}")]
    UnknownReward(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for catalogs and policies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. a key with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. duplicate service key).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
