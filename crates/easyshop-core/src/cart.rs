//! # Cart
//!
//! The cart value itself: an ordered list of line items with derived
//! totals. [`crate::store`] wraps it for sharing between views.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Operations                                 │
//! │                                                                         │
//! │  UI Action             Cart Method             Line Items              │
//! │  ─────────             ───────────             ──────────              │
//! │                                                                         │
//! │  "Add to cart" ──────► add(product) ─────────► qty += 1 or push(qty 1) │
//! │                                                                         │
//! │  Type quantity ──────► update_quantity(id, n) ► qty = n (0 removes)    │
//! │                                                                         │
//! │  Click + ────────────► increment(id) ─────────► qty += 1               │
//! │                                                                         │
//! │  Click − ────────────► decrement(id) ─────────► qty -= 1 (1 removes)   │
//! │                                                                         │
//! │  Click Remove ───────► remove(id) ────────────► retain(id != x)        │
//! │                                                                         │
//! │  Order placed ───────► clear() ───────────────► []                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line item per product id
//! - Every line item has quantity ≥ 1
//! - Line items keep the order in which their product was first added
//! - Totals are computed from the line items on every read

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Product, ProductId};

// =============================================================================
// Line Item
// =============================================================================

/// One product-plus-quantity entry in the cart.
///
/// Product fields are copied in when the line is created; later catalog
/// changes do not reach an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineItem {
    pub id: ProductId,
    pub title: String,
    pub unit_price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Always ≥ 1 while the line is in a cart.
    pub quantity: u32,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLineItem {
    fn from_product(product: &Product) -> Self {
        CartLineItem {
            id: product.id.clone(),
            title: product.title.clone(),
            unit_price: product.price,
            thumbnail: product.thumbnail.clone(),
            description: product.description.clone(),
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Unit price × quantity.
    pub fn subtotal(&self) -> Money {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of `product`.
    ///
    /// If a line with the same id exists its quantity grows by one and it
    /// keeps its position; otherwise a new line is appended. Returns the
    /// line's quantity after the add.
    pub fn add(&mut self, product: &Product) -> u32 {
        if let Some(item) = self.find_mut(&product.id) {
            item.quantity = item.quantity.saturating_add(1);
            return item.quantity;
        }

        self.items.push(CartLineItem::from_product(product));
        1
    }

    /// Replaces the quantity of the line for `id`.
    ///
    /// A quantity of 0 removes the line. Returns `false` when no line
    /// matches, in which case the cart is unchanged.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(id).is_some();
        }

        match self.find_mut(id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Adds one to the line for `id`. Returns the new quantity, or `None`
    /// when the id is not in the cart.
    pub fn increment(&mut self, id: &ProductId) -> Option<u32> {
        let item = self.find_mut(id)?;
        item.quantity = item.quantity.saturating_add(1);
        Some(item.quantity)
    }

    /// Takes one from the line for `id`; a line at quantity 1 is removed.
    ///
    /// Returns the new quantity (0 when the line was removed), or `None`
    /// when the id is not in the cart.
    pub fn decrement(&mut self, id: &ProductId) -> Option<u32> {
        let current = self.get(id)?.quantity;
        if current <= 1 {
            self.remove(id);
            return Some(0);
        }

        let next = current - 1;
        self.update_quantity(id, next);
        Some(next)
    }

    /// Removes the line for `id`, returning it. Absent ids are a no-op.
    pub fn remove(&mut self, id: &ProductId) -> Option<CartLineItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Takes ordered quantities out of the cart after checkout.
    ///
    /// Each ordered line's quantity is subtracted from the matching live
    /// line; lines that reach 0 are removed. Lines added or increased
    /// since the order snapshot keep the difference.
    pub fn settle(&mut self, ordered: &[CartLineItem]) {
        for line in ordered {
            let Some(item) = self.find_mut(&line.id) else {
                continue;
            };
            if item.quantity > line.quantity {
                item.quantity -= line.quantity;
            } else {
                self.remove(&line.id);
            }
        }
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Line items in display order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct line items.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Σ unit price × quantity, recomputed on each call.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartLineItem::subtotal).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Copies the current state out for rendering.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            total: self.total(),
            item_count: self.line_count(),
            total_quantity: self.total_quantity(),
        }
    }

    fn find_mut(&mut self, id: &ProductId) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Read-only copy of the cart at one instant.
///
/// Product cards, the cart page and the checkout page all render from a
/// snapshot; none of them can reach the live line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    pub items: Vec<CartLineItem>,
    pub total: Money,
    pub item_count: usize,
    #[ts(type = "number")]
    pub total_quantity: u64,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| &item.id == id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
