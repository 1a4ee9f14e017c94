//! # Validation Module
//!
//! Input validation utilities for EasyShop.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend forms                                               │
//! │  ├── Immediate feedback (empty fields, length)                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: storefront commands                                          │
//! │  └── THIS MODULE: login, checkout and quantity-input rules             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog API                                                  │
//! │  └── Rejects bad credentials, unknown product ids                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart operations themselves are never validated here: the store accepts
//! any product the catalog hands it.

use crate::error::ValidationError;
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Shortest username or password the login form accepts.
pub const CREDENTIAL_MIN_LEN: usize = 2;

/// Longest username or password the login form accepts.
pub const CREDENTIAL_MAX_LEN: usize = 12;

const SEARCH_QUERY_MAX_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Checks that `value` is present after trimming.
///
/// ```rust
/// use easyshop_core::validation::validate_required;
///
/// assert!(validate_required("city", "Pune").is_ok());
/// assert!(validate_required("city", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a login username or password.
///
/// ## Rules
/// - Must not be empty
/// - 2 to 12 characters after trimming
///
/// Returns the trimmed value.
pub fn validate_credential(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    validate_required(field, value)?;

    let len = value.chars().count();
    if len < CREDENTIAL_MIN_LEN {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min: CREDENTIAL_MIN_LEN,
        });
    }

    if len > CREDENTIAL_MAX_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: CREDENTIAL_MAX_LEN,
        });
    }

    Ok(value.to_string())
}

/// Validates a catalog search query.
///
/// ## Rules
/// - Can be empty (plain listing)
/// - Maximum 100 characters
///
/// Returns the trimmed query, or `None` when it is empty.
pub fn validate_search_query(query: &str) -> ValidationResult<Option<String>> {
    let query = query.trim();

    if query.chars().count() > SEARCH_QUERY_MAX_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: SEARCH_QUERY_MAX_LEN,
        });
    }

    Ok((!query.is_empty()).then(|| query.to_string()))
}

/// Loose email shape check: `local@domain` with a dot in the domain.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    validate_required("email", email)?;

    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity typed into the cart page.
///
/// ## Rules
/// - Must not be negative (0 means "remove")
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ```text
/// User types quantity
///       │
///       ▼
/// validate_quantity_input(n) ← THIS FUNCTION
///       │
///       ├── n < 0?   → Error: "quantity must be positive"
///       ├── n > 999? → Error: "quantity must be between 0 and 999"
///       └── OK       → update_quantity(id, n)
/// ```
pub fn validate_quantity_input(qty: i64) -> ValidationResult<u32> {
    if qty < 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        });
    }

    // Bounded by MAX_ITEM_QUANTITY above.
    Ok(qty as u32)
}

/// Validates a price in minor units.
///
/// ```rust
/// use easyshop_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());
/// assert!(validate_price_cents(0).is_ok());     // Free item
/// assert!(validate_price_cents(-100).is_err());
/// assert!(validate_price_cents(i64::MAX).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a page size for catalog listings.
pub fn validate_page_size(limit: u32) -> ValidationResult<()> {
    if limit == 0 || limit > 100 {
        return Err(ValidationError::OutOfRange {
            field: "limit".to_string(),
            min: 1,
            max: 100,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points (0% to 100%).
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
