//! # easyshop-core: Pure Business Logic for EasyShop
//!
//! This crate holds the storefront's cart and checkout logic as pure,
//! synchronous code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        EasyShop Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web Frontend                                 │   │
//! │  │   Listing ──► Product Detail ──► Cart Page ──► Checkout         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront commands (apps/)                     │   │
//! │  │    login, list_products, add_to_cart, place_order, etc.         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ easyshop-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌──────────┐ ┌────────┐ │   │
//! │  │   │  types  │ │  money  │ │ cart +   │ │ checkout │ │validate│ │   │
//! │  │   │ Product │ │  Money  │ │  store   │ │ Summary  │ │ rules  │ │   │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └──────────┘ └────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO PERSISTENCE                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductId, TaxRate)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart value: line items, quantities, derived totals
//! - [`store`] - Shared cart ownership and scoped consumer handles
//! - [`checkout`] - Shipping, tax and simulated order placement
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use easyshop_core::{CartStore, Money, Product};
//!
//! let store = CartStore::new();
//! let cart = store.handle();
//!
//! let tee = Product::new(1u64, "T-Shirt", Money::from_major_minor(20, 0));
//! cart.add_to_cart(&tee).unwrap();
//! cart.add_to_cart(&tee).unwrap();
//!
//! assert_eq!(cart.total().unwrap(), Money::from_major_minor(40, 0));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use easyshop_core::Money` instead of
// `use easyshop_core::money::Money`

pub use cart::{Cart, CartLineItem, CartSnapshot};
pub use checkout::{BillingInfo, CheckoutPolicy, CheckoutSummary, OrderConfirmation, PaymentInfo};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use store::{CartHandle, CartStore};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest quantity a shopper may type into a cart quantity field.
///
/// ## Business Reason
/// Catches typos like 1000 instead of 10. This bounds user input only;
/// repeated "Add to cart" clicks are never capped by the store.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest unit price accepted from the catalog (₹1,000 crore, in paise).
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000_000;

/// Subtotal above which shipping is free (₹2000.00, in paise).
pub const DEFAULT_FREE_SHIPPING_THRESHOLD_CENTS: i64 = 200_000;

/// Flat shipping fee below the free-shipping threshold (₹99.00).
pub const DEFAULT_FLAT_SHIPPING_CENTS: i64 = 9_900;

/// Default tax rate in basis points (18% GST).
pub const DEFAULT_TAX_RATE_BPS: u32 = 1_800;
