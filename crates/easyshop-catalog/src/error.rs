//! # Catalog Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  reqwest::Error / non-2xx status / bad JSON                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module) ← Adds context and categorization          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (storefront app) ← Serialized for the UI                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use easyshop_core::ValidationError;
use thiserror::Error;

/// Errors from the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure (DNS, TLS, timeout, connection reset).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The requested product does not exist.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The requested user does not exist.
    #[error("User not found: {0}")]
    UserNotFound(u64),

    /// Login was refused.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The configured base URL is unusable.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Request parameters failed validation before sending.
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),
}

/// Convenience type alias for Results with CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;
