//! # Validation Module
//!
//! Write-time validation for group-buy items and participation requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Admin form / client                                          │
//! │  └── Immediate feedback on empty or obviously wrong fields             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: HTTP handler (Rust)                                          │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: rejects bad configuration with typed errors          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine (read time)                                   │
//! │  └── Clamps whatever is stored, so legacy rows still price sanely      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nestling_core::money::Money;
//! use nestling_core::pricing::PricingParameters;
//! use nestling_core::validation::validate_pricing_parameters;
//!
//! let params = PricingParameters {
//!     base_price: Money::from_units(10000),
//!     min_price: Money::from_units(7000),
//!     discount_step_every: 10,
//!     discount_step_percent: 1.0,
//!     max_discount_percent: 30.0,
//! };
//! assert!(validate_pricing_parameters(&params).is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::pricing::{PricingParameters, MAX_STEP_PERCENT, MIN_STEP_PERCENT};
use crate::{MAX_TITLE_LENGTH, MAX_USER_ID_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a team item title.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LENGTH,
        });
    }

    Ok(())
}

/// Validates the user identifier on a participation request.
///
/// The identifier comes from the external auth service and is otherwise
/// opaque here.
pub fn validate_user_id(user_id: &str) -> ValidationResult<()> {
    let user_id = user_id.trim();

    if user_id.is_empty() {
        return Err(ValidationError::Required {
            field: "userId".to_string(),
        });
    }

    if user_id.len() > MAX_USER_ID_LENGTH {
        return Err(ValidationError::TooLong {
            field: "userId".to_string(),
            max: MAX_USER_ID_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Pricing Validators
// =============================================================================

/// Validates a price.
///
/// Zero is allowed (free sample items).
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

/// Validates an item's pricing configuration before it is stored.
///
/// ## Rules
/// ```text
/// basePrice            >= 0
/// minPrice             >= 0 and <= basePrice
/// discountStepEvery    >= 1
/// discountStepPercent  in [1, 3]
/// maxDiscountPercent   in [0, 100]
/// ```
/// The engine would silently clamp each of these; rejecting them here keeps
/// what admins see in the form equal to what customers are charged.
pub fn validate_pricing_parameters(params: &PricingParameters) -> ValidationResult<()> {
    validate_price("basePrice", params.base_price)?;
    validate_price("minPrice", params.min_price)?;

    if params.min_price > params.base_price {
        return Err(ValidationError::FloorAboveBase {
            min_price: params.min_price.units(),
            base_price: params.base_price.units(),
        });
    }

    if params.discount_step_every < 1 {
        return Err(ValidationError::OutOfRange {
            field: "discountStepEvery".to_string(),
            min: 1,
            max: i64::MAX,
        });
    }

    let (step_min, step_max) = (MIN_STEP_PERCENT, MAX_STEP_PERCENT);
    if !(step_min..=step_max).contains(&params.discount_step_percent) {
        return Err(ValidationError::PercentOutOfRange {
            field: "discountStepPercent".to_string(),
            min: step_min,
            max: step_max,
        });
    }

    if !(0.0..=100.0).contains(&params.max_discount_percent) {
        return Err(ValidationError::PercentOutOfRange {
            field: "maxDiscountPercent".to_string(),
            min: 0.0,
            max: 100.0,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
