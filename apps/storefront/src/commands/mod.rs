//! # Commands Module
//!
//! All operations the storefront views invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── auth.rs      ◄─── Login, logout, current user
//! ├── catalog.rs   ◄─── Product listing and detail (login required)
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── checkout.rs  ◄─── Order summary and placement
//! ├── config.rs    ◄─── Configuration retrieval
//! └── users.rs     ◄─── User table admin (login required)
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  View event (click "+", submit checkout, ...)                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  fn increment_item(                                                     │
//! │      cart: &CartHandle,       ◄── Passed in explicitly                 │
//! │      product_id: &ProductId,  ◄── From the view                        │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  View re-renders from CartResponse                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the cart
//! fn get_cart(cart: &CartHandle)
//!
//! // Needs the catalog and the session token
//! async fn list_products(catalog: &S, session: &SessionState, ...)
//!
//! // Needs the cart and checkout settings
//! async fn place_order(cart: &CartHandle, config: &ConfigState, ...)
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod users;
