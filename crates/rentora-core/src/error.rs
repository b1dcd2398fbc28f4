//! # Error Types
//!
//! Domain-specific error types for rentora-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rentora-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Checkout input validation failures             │
//! │                                                                         │
//! │  rentora-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (in app)                                                   │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Frontend     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, id, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// These errors represent business rule violations raised while assembling
/// a rental order. They should be caught and translated to user-facing
/// messages at the API boundary.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A pickup or drop-off location does not name a known city.
    ///
    /// ## When This Occurs
    /// - The checkout form was submitted with a location id that is not in
    ///   the city list the form was offered
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Checkout input validation errors.
///
/// These errors occur when user input doesn't meet the form requirements.
/// Used for early validation before an order is assembled.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value must have an exact length.
    #[error("{field} must be {len} characters")]
    ExactLength { field: String, len: usize },

    /// Invalid format (e.g. non-digit phone number, malformed expiration).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
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
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooShort {
            field: "address".to_string(),
            min: 5,
        };
        assert_eq!(err.to_string(), "address must be at least 5 characters");

        let err = ValidationError::ExactLength {
            field: "cvc".to_string(),
            len: 3,
        };
        assert_eq!(err.to_string(), "cvc must be 3 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "city".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
