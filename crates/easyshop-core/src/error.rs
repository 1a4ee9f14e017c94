//! # Error Types
//!
//! Domain-specific error types for easyshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  easyshop-core errors (this file)                                      │
//! │  ├── CoreError        - Scope violations, checkout rules               │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  easyshop-catalog errors (separate crate)                              │
//! │  └── CatalogError     - HTTP / decode failures                         │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! Adding a product that is already in the cart, updating the quantity of
//! an existing line, and removing an id that is not in the cart are all
//! defined behaviors. None of them produce a `CoreError`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A consumer tried to use a cart outside the scope that provides it.
    ///
    /// ## When This Occurs
    /// - A `CartHandle` is used after its owning `CartStore` was dropped
    ///   (the session that owned the cart logged out)
    /// - A view asks for the session cart while nobody is logged in
    ///
    /// ## Why It Is Loud
    /// ```text
    /// View (not wired to a session)
    ///      │
    ///      ▼
    /// cart.add_to_cart(&product)
    ///      │
    ///      ▼
    /// AccessOutsideScope  ◄── raised here, immediately
    ///      │
    ///      ✗  never: silently add to a throwaway empty cart
    /// ```
    #[error("Cart accessed outside of its provisioning scope")]
    AccessOutsideScope,

    /// Checkout was attempted with nothing in the cart.
    #[error("Cannot place an order with an empty cart")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email).
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
    fn test_error_messages() {
        assert_eq!(
            CoreError::AccessOutsideScope.to_string(),
            "Cart accessed outside of its provisioning scope"
        );
        assert_eq!(
            CoreError::EmptyCart.to_string(),
            "Cannot place an order with an empty cart"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "username".to_string(),
        };
        assert_eq!(err.to_string(), "username is required");

        let err = ValidationError::TooLong {
            field: "password".to_string(),
            max: 12,
        };
        assert_eq!(err.to_string(), "password must be at most 12 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "email".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
