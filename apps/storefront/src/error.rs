//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in EasyShop                               │
//! │                                                                         │
//! │  View                        Storefront                                 │
//! │  ────                        ──────────                                 │
//! │                                                                         │
//! │  add_to_cart(...)                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  No session? ───── CoreError::AccessOutsideScope ──┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Catalog down? ─── CatalogError::Http ─────────── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "OUT_OF_SCOPE", "message": "Cart accessed outside ..." }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Upstream details (HTTP bodies, decode failures) are logged and replaced
//! by a generic message.

use easyshop_catalog::CatalogError;
use easyshop_core::{CoreError, ValidationError};
use serde::Serialize;

/// API error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Login required or refused
    Unauthorized,

    /// Cart used outside an active session
    OutOfScope,

    /// Cart operation failed (e.g. checkout of an empty cart)
    CartError,

    /// Catalog API unavailable or misbehaving
    CatalogError,

    /// Internal error
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

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AccessOutsideScope => ApiError::new(ErrorCode::OutOfScope, err.to_string()),
            CoreError::EmptyCart => ApiError::new(ErrorCode::CartError, err.to_string()),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts catalog errors to API errors.
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => ApiError::not_found("Product", &id),
            CatalogError::UserNotFound(id) => ApiError::not_found("User", &id.to_string()),
            CatalogError::InvalidCredentials => ApiError::unauthorized("Invalid username or password"),
            CatalogError::Validation(e) => ApiError::from(e),
            CatalogError::Api { status: 401 | 403, .. } => {
                tracing::warn!("Catalog rejected the session token");
                ApiError::unauthorized("Session expired, please log in again")
            }
            CatalogError::Http(e) => {
                tracing::error!("Catalog request failed: {}", e);
                ApiError::new(ErrorCode::CatalogError, "Catalog service unavailable")
            }
            CatalogError::Api { status, message } => {
                tracing::error!(status, "Catalog API error: {}", message);
                ApiError::new(ErrorCode::CatalogError, "Catalog service returned an error")
            }
            CatalogError::Decode(e) => {
                tracing::error!("Catalog response could not be decoded: {}", e);
                ApiError::new(ErrorCode::CatalogError, "Catalog service returned an error")
            }
            CatalogError::InvalidBaseUrl(url) => {
                tracing::error!(%url, "Invalid catalog base URL");
                ApiError::internal("Catalog is misconfigured")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
