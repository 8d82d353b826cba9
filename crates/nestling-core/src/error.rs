//! # Error Types
//!
//! Domain-specific error types for nestling-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  nestling-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Write-time configuration/input failures        │
//! │                                                                         │
//! │  nestling-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  HTTP errors (apps/api)                                                │
//! │  └── ApiError         - What clients see (code + message)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → JSON response          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing engine itself never returns an error: it coerces malformed
//! parameters. These types cover the writes and lookups around it.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Team item cannot be found.
    #[error("Team item not found: {0}")]
    TeamItemNotFound(String),

    /// Team item is no longer open for participation.
    ///
    /// ## When This Occurs
    /// - Item was soft-deleted by an admin
    /// - A client polled an old detail page and tried to join
    #[error("Team item {0} is closed")]
    TeamItemClosed(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when an admin saves an item or a client submits a request. Stored
/// rows that predate these checks are still priced through the engine's
/// read-time coercions.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Integer value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Percentage value is out of range.
    #[error("{field} must be between {min}% and {max}%")]
    PercentOutOfRange { field: String, min: f64, max: f64 },

    /// The price floor sits above the base price, which would cancel every
    /// discount.
    #[error("min price {min_price} must not exceed base price {base_price}")]
    FloorAboveBase { min_price: i64, base_price: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::TeamItemClosed("abc".to_string());
        assert_eq!(err.to_string(), "Team item abc is closed");

        let err = CoreError::TeamItemNotFound("abc".to_string());
        assert_eq!(err.to_string(), "Team item not found: abc");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "title".to_string(),
        };
        assert_eq!(err.to_string(), "title is required");

        let err = ValidationError::FloorAboveBase {
            min_price: 12000,
            base_price: 10000,
        };
        assert_eq!(
            err.to_string(),
            "min price 12000 must not exceed base price 10000"
        );

        let err = ValidationError::PercentOutOfRange {
            field: "discountStepPercent".to_string(),
            min: 1.0,
            max: 3.0,
        };
        assert_eq!(err.to_string(), "discountStepPercent must be between 1% and 3%");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "title".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
