//! # Domain Error Types
//!
//! Typed errors for the pure discount logic.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Hierarchy                                 │
//! │                                                                         │
//! │  CoreError (this crate)                                                 │
//! │  ├── InvalidCart          ← Cart rejected at construction              │
//! │  ├── AmountOverflow       ← Decimal arithmetic left the safe range     │
//! │  └── Validation           ← Wraps ValidationError                      │
//! │                                                                         │
//! │  DbError (discount-db)    ← Storage failures, NotFound, DuplicateKey   │
//! │                                                                         │
//! │  ApiError (discount-api)  ← Serialized for HTTP clients                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "No applicable discount" is deliberately NOT an error: resolution returns
//! `Ok(None)` for it.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by the pure discount logic.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The cart cannot be evaluated.
    ///
    /// ## When This Occurs
    /// - Negative subtotal price
    #[error("Invalid cart: {reason}")]
    InvalidCart { reason: String },

    /// Decimal arithmetic overflowed while computing an amount.
    #[error("Amount overflow while computing {operation}")]
    AmountOverflow { operation: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an AmountOverflow error for the named operation.
    pub fn overflow(operation: impl Into<String>) -> Self {
        CoreError::AmountOverflow {
            operation: operation.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors raised at the create/update boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Field contains characters it may not carry.
    #[error("{field} must not contain control characters or '/'")]
    InvalidCharacters { field: String },

    /// Value collides with a route segment.
    #[error("{field} '{value}' is reserved")]
    Reserved { field: String, value: String },

    /// Path id and body id disagree on update.
    #[error("id mismatch: path '{path}' does not match body '{body}'")]
    IdMismatch { path: String, body: String },
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
        let err = CoreError::InvalidCart {
            reason: "price must not be negative".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid cart: price must not be negative");

        let err = CoreError::overflow("percentage discount");
        assert_eq!(
            err.to_string(),
            "Amount overflow while computing percentage discount"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "id".to_string(),
        };
        assert_eq!(err.to_string(), "id is required");

        let err = ValidationError::OutOfRange {
            field: "value".to_string(),
            min: 0,
            max: 100,
        };
        assert_eq!(err.to_string(), "value must be between 0 and 100");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBeNonNegative {
            field: "value".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
