//! # Validation Module
//!
//! Rule checks for data that is configured rather than computed: catalog
//! entries, reward options and the pricing policy.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ServiceCatalog::from_definitions ──► validate_service_key             │
//! │                                      validate_display_name             │
//! │                                      validate_price                    │
//! │                                                                         │
//! │  RewardCatalog::from_options ───────► validate_service_key (id)        │
//! │                                      validate_display_name (title)     │
//! │                                      validate_price (discount)         │
//! │                                                                         │
//! │  PricingPolicy::validate ───────────► validate_rate_bps                │
//! │                                      validate_multiplier               │
//! │                                      validate_clock_hour               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! User selections are NOT validated here: unknown or odd keys are priced
//! through the catalog fallback instead of being rejected.

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted catalog key.
pub const MAX_KEY_LEN: usize = 50;

/// Longest accepted display name.
pub const MAX_NAME_LEN: usize = 120;

/// Upper bound for the evening points multiplier.
pub const MAX_MULTIPLIER: u32 = 10;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog key (service key or reward id).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Letters, numbers, hyphens and underscores only
///
/// ```rust
/// use chairside_core::validation::validate_service_key;
///
/// assert!(validate_service_key("hair").is_ok());
/// assert!(validate_service_key("hot_towel-shave").is_ok());
/// assert!(validate_service_key("").is_err());
/// assert!(validate_service_key("hair cut").is_err());
/// ```
pub fn validate_service_key(key: &str) -> ValidationResult<()> {
    let key = key.trim();

    if key.is_empty() {
        return Err(ValidationError::Required {
            field: "key".to_string(),
        });
    }

    if key.len() > MAX_KEY_LEN {
        return Err(ValidationError::TooLong {
            field: "key".to_string(),
            max: MAX_KEY_LEN,
        });
    }

    if !key
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "key".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a display name (service name or reward title).
pub fn validate_display_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a catalog price. Zero is allowed (complimentary services).
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a rate in basis points (0% to 100%).
pub fn validate_rate_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

/// Validates the evening points multiplier (1 to 10).
pub fn validate_multiplier(multiplier: u32) -> ValidationResult<()> {
    if multiplier == 0 || multiplier > MAX_MULTIPLIER {
        return Err(ValidationError::OutOfRange {
            field: "evening_multiplier".to_string(),
            min: 1,
            max: MAX_MULTIPLIER as i64,
        });
    }

    Ok(())
}

/// Validates a 24-hour clock hour.
/// An hour as printed on a 12-hour clock face.
pub fn validate_clock_hour(field: &str, hour: u32) -> ValidationResult<()> {
    if !(1..=12).contains(&hour) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: 12,
        });
    }

    Ok(())
}
