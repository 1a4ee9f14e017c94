//! # Cart Commands
//!
//! Cart manipulation for the product cards and the cart page.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Login   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │ (empty)  │     │          │     │   Form   │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                  │             │
//! │                   add_to_cart                        cart cleared       │
//! │                   increment_item / decrement_item                       │
//! │                   update_cart_item / remove_from_cart                   │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────► (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command takes the session's [`CartHandle`] explicitly and returns
//! the fresh cart so the view can re-render.

use easyshop_core::validation::validate_quantity_input;
use easyshop_core::{CartHandle, CartLineItem, CartSnapshot, Money, Product, ProductId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    pub totals: CartTotals,
}

/// Figures for the cart badge and the cart page footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct products
    pub item_count: usize,
    /// Sum of quantities (the header badge)
    pub total_quantity: u64,
    pub total: Money,
}

impl From<CartSnapshot> for CartResponse {
    fn from(snapshot: CartSnapshot) -> Self {
        CartResponse {
            totals: CartTotals {
                item_count: snapshot.item_count,
                total_quantity: snapshot.total_quantity,
                total: snapshot.total,
            },
            items: snapshot.items,
        }
    }
}

impl CartResponse {
    /// Quantity of `id` in the cart, 0 when absent.
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.items
            .iter()
            .find(|item| &item.id == id)
            .map_or(0, |item| item.quantity)
    }
}

fn respond(cart: &CartHandle) -> Result<CartResponse, ApiError> {
    Ok(CartResponse::from(cart.snapshot()?))
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartHandle) -> Result<CartResponse, ApiError> {
    debug!("get_cart command");
    respond(cart)
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Already in cart: quantity increases by one
/// - Not in cart: appended with quantity 1, product fields copied in
pub fn add_to_cart(cart: &CartHandle, product: &Product) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product.id, "add_to_cart command");
    let quantity = cart.add_to_cart(product)?;
    debug!(product_id = %product.id, quantity, "item added");
    respond(cart)
}

/// Sets the quantity of an item from the quantity input.
///
/// ## Behavior
/// - Quantity 0: removes the item
/// - Negative or above the input maximum: validation error, cart untouched
/// - Item not in cart: no change
pub fn update_cart_item(
    cart: &CartHandle,
    product_id: &ProductId,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(%product_id, quantity, "update_cart_item command");

    let quantity = validate_quantity_input(quantity)?;
    if !cart.update_quantity(product_id, quantity)? {
        debug!(%product_id, "update ignored, item not in cart");
    }
    respond(cart)
}

/// The "+" button.
pub fn increment_item(cart: &CartHandle, product_id: &ProductId) -> Result<CartResponse, ApiError> {
    debug!(%product_id, "increment_item command");
    cart.increment(product_id)?;
    respond(cart)
}

/// The "-" button. At quantity 1 the item is removed.
pub fn decrement_item(cart: &CartHandle, product_id: &ProductId) -> Result<CartResponse, ApiError> {
    debug!(%product_id, "decrement_item command");
    cart.decrement(product_id)?;
    respond(cart)
}

/// Removes an item. Removing an absent item is a no-op.
pub fn remove_from_cart(cart: &CartHandle, product_id: &ProductId) -> Result<CartResponse, ApiError> {
    debug!(%product_id, "remove_from_cart command");
    cart.remove_from_cart(product_id)?;
    respond(cart)
}

/// Clears all items from the cart.
pub fn clear_cart(cart: &CartHandle) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");
    cart.clear()?;
    respond(cart)
}
