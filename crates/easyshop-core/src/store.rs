//! # Cart Store
//!
//! Shares one [`Cart`] between every view of a session.
//!
//! ## Ownership Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Ownership                                 │
//! │                                                                         │
//! │   Session ──owns──► CartStore ── Arc<Mutex<Cart>>                      │
//! │                          │                                              │
//! │                     handle() (Weak)                                     │
//! │          ┌───────────────┼───────────────┬───────────────┐             │
//! │          ▼               ▼               ▼               ▼             │
//! │   Product cards   Product detail     Cart page       Checkout          │
//! │   CartHandle      CartHandle         CartHandle      CartHandle        │
//! │                                                                         │
//! │   Session ends ──► CartStore dropped ──► every handle now returns      │
//! │                                          CoreError::AccessOutsideScope │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Single-Writer API
//! The cart is only ever changed through the named operations below. Reads
//! hand back owned copies ([`CartSnapshot`], [`Money`]); no `&mut Cart`
//! leaves this module.
//!
//! ## Thread Safety
//! Each operation locks the mutex, applies one complete transition derived
//! from the current state, and unlocks. Two rapid "+1" clicks therefore
//! always land as +2. No lock is held across an `.await` because nothing
//! in here is async.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::cart::{Cart, CartLineItem, CartSnapshot};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, ProductId};

// =============================================================================
// Store (owner)
// =============================================================================

/// Owner of a session's cart.
///
/// Dropping the store ends the provisioning scope: handles created from it
/// stop working.
#[derive(Debug, Default)]
pub struct CartStore {
    cart: Arc<Mutex<Cart>>,
}

impl CartStore {
    /// Creates a store holding an empty cart.
    pub fn new() -> Self {
        CartStore::default()
    }

    /// Creates a consumer handle scoped to this store.
    pub fn handle(&self) -> CartHandle {
        CartHandle {
            cart: Arc::downgrade(&self.cart),
        }
    }

    pub fn add_to_cart(&self, product: &Product) -> u32 {
        lock(&self.cart).add(product)
    }

    pub fn update_quantity(&self, id: &ProductId, quantity: u32) -> bool {
        lock(&self.cart).update_quantity(id, quantity)
    }

    pub fn remove_from_cart(&self, id: &ProductId) -> bool {
        lock(&self.cart).remove(id).is_some()
    }

    pub fn clear(&self) {
        lock(&self.cart).clear();
    }

    pub fn snapshot(&self) -> CartSnapshot {
        lock(&self.cart).snapshot()
    }

    pub fn total(&self) -> Money {
        lock(&self.cart).total()
    }
}

// =============================================================================
// Handle (consumer)
// =============================================================================

/// A view's access to the session cart.
///
/// Cheap to clone. Every method fails with
/// [`CoreError::AccessOutsideScope`] once the owning [`CartStore`] is gone;
/// while it lives, none of them fail.
#[derive(Debug, Clone)]
pub struct CartHandle {
    cart: Weak<Mutex<Cart>>,
}

impl CartHandle {
    /// Adds one unit of `product`. Returns the line's new quantity.
    pub fn add_to_cart(&self, product: &Product) -> CoreResult<u32> {
        self.with_cart(|cart| cart.add(product))
    }

    /// Sets the quantity for `id`; 0 removes the line. Returns whether a
    /// line matched.
    pub fn update_quantity(&self, id: &ProductId, quantity: u32) -> CoreResult<bool> {
        self.with_cart(|cart| cart.update_quantity(id, quantity))
    }

    /// Cart page "+" button.
    pub fn increment(&self, id: &ProductId) -> CoreResult<Option<u32>> {
        self.with_cart(|cart| cart.increment(id))
    }

    /// Cart page "−" button; removes the line when it would drop below 1.
    pub fn decrement(&self, id: &ProductId) -> CoreResult<Option<u32>> {
        self.with_cart(|cart| cart.decrement(id))
    }

    /// Removes the line for `id`. Returns whether anything was removed.
    pub fn remove_from_cart(&self, id: &ProductId) -> CoreResult<bool> {
        self.with_cart(|cart| cart.remove(id).is_some())
    }

    pub fn clear(&self) -> CoreResult<()> {
        self.with_cart(Cart::clear)
    }

    /// Removes the quantities of a placed order, leaving anything added
    /// after the order's snapshot in place.
    pub fn settle_order(&self, ordered: &[CartLineItem]) -> CoreResult<()> {
        self.with_cart(|cart| cart.settle(ordered))
    }

    pub fn snapshot(&self) -> CoreResult<CartSnapshot> {
        self.with_cart(|cart| cart.snapshot())
    }

    /// Derived total, computed from the line items at call time.
    pub fn total(&self) -> CoreResult<Money> {
        self.with_cart(|cart| cart.total())
    }

    /// Whether `id` is in the cart (product card "added" badge).
    pub fn contains(&self, id: &ProductId) -> CoreResult<bool> {
        self.with_cart(|cart| cart.contains(id))
    }

    /// Whether the owning store still exists.
    pub fn is_in_scope(&self) -> bool {
        self.cart.strong_count() > 0
    }

    fn with_cart<F, R>(&self, f: F) -> CoreResult<R>
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let cart = self.cart.upgrade().ok_or(CoreError::AccessOutsideScope)?;
        let mut guard = lock(&cart);
        Ok(f(&mut guard))
    }
}

// Every cart transition completes before it could panic, so a poisoned
// lock still guards a consistent cart.
fn lock(cart: &Mutex<Cart>) -> MutexGuard<'_, Cart> {
    cart.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn product(id: u64, major: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_major_minor(major, 0))
    }

    #[test]
    fn test_handles_share_one_cart() {
        let store = CartStore::new();
        let listing = store.handle();
        let cart_page = store.handle();

        listing.add_to_cart(&product(1, 20)).unwrap();
        cart_page.add_to_cart(&product(1, 20)).unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].quantity, 2);
        assert_eq!(listing.total().unwrap(), Money::from_major_minor(40, 0));
    }

    #[test]
    fn test_handle_fails_after_store_dropped() {
        let store = CartStore::new();
        let handle = store.handle();
        handle.add_to_cart(&product(1, 20)).unwrap();
        assert!(handle.is_in_scope());

        drop(store);

        assert!(!handle.is_in_scope());
        assert!(matches!(
            handle.add_to_cart(&product(1, 20)),
            Err(CoreError::AccessOutsideScope)
        ));
        assert!(matches!(handle.snapshot(), Err(CoreError::AccessOutsideScope)));
        assert!(matches!(handle.total(), Err(CoreError::AccessOutsideScope)));
        assert!(matches!(
            handle.remove_from_cart(&ProductId::from(1u64)),
            Err(CoreError::AccessOutsideScope)
        ));
        assert!(matches!(
            handle.update_quantity(&ProductId::from(1u64), 3),
            Err(CoreError::AccessOutsideScope)
        ));
    }

    #[test]
    fn test_remove_absent_is_ok_false() {
        let store = CartStore::new();
        let handle = store.handle();
        handle.add_to_cart(&product(1, 20)).unwrap();
        let before = handle.snapshot().unwrap();

        assert!(!handle.remove_from_cart(&ProductId::from(2u64)).unwrap());
        assert_eq!(handle.snapshot().unwrap(), before);
    }

    #[test]
    fn test_snapshot_cannot_mutate_store() {
        let store = CartStore::new();
        let handle = store.handle();
        handle.add_to_cart(&product(1, 20)).unwrap();

        let mut snapshot = handle.snapshot().unwrap();
        snapshot.items[0].quantity = 50;
        snapshot.items.clear();

        assert_eq!(store.snapshot().items[0].quantity, 1);
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let store = CartStore::new();
        let p = product(1, 1);

        thread::scope(|scope| {
            for _ in 0..8 {
                let handle = store.handle();
                let p = &p;
                scope.spawn(move || {
                    for _ in 0..100 {
                        handle.add_to_cart(p).unwrap();
                    }
                });
            }
        });

        let snapshot = store.snapshot();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].quantity, 800);
    }

    #[test]
    fn test_huge_prices_saturate_instead_of_panicking() {
        let store = CartStore::new();
        let handle = store.handle();
        let yacht = Product::new(1u64, "Yacht", Money::from_cents(5_000_000_000_000_000_000));

        handle.add_to_cart(&yacht).unwrap();
        handle.add_to_cart(&yacht).unwrap();
        handle.add_to_cart(&product(2, 15)).unwrap();

        assert_eq!(handle.total().unwrap(), Money::from_cents(i64::MAX));
        assert_eq!(handle.snapshot().unwrap().items[0].quantity, 2);
        // The lock is still usable afterwards.
        assert!(handle.remove_from_cart(&yacht.id).unwrap());
        assert_eq!(handle.total().unwrap(), Money::from_major_minor(15, 0));
    }

    #[test]
    fn test_settle_order_through_handle() {
        let store = CartStore::new();
        let handle = store.handle();
        handle.add_to_cart(&product(1, 20)).unwrap();
        let ordered = handle.snapshot().unwrap().items;
        handle.add_to_cart(&product(2, 15)).unwrap();

        handle.settle_order(&ordered).unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].id, ProductId::from(2u64));

        drop(store);
        assert!(matches!(handle.settle_order(&ordered), Err(CoreError::AccessOutsideScope)));
    }

    #[test]
    fn test_clear_empties_cart() {
        let store = CartStore::new();
        store.add_to_cart(&product(1, 20));
        store.add_to_cart(&product(2, 15));

        store.clear();

        assert!(store.snapshot().is_empty());
        assert!(store.total().is_zero());
    }
}
