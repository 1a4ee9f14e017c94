//! End-to-end cart walkthrough across several views sharing one store.

use easyshop_core::{CartStore, CoreError, Money, Product, ProductId};

fn rupees(major: i64) -> Money {
    Money::from_major_minor(major, 0)
}

fn line(snapshot: &easyshop_core::CartSnapshot, index: usize) -> (ProductId, u32, Money) {
    let item = &snapshot.items[index];
    (item.id.clone(), item.quantity, item.subtotal())
}

#[test]
fn add_remove_update_walkthrough() {
    let store = CartStore::new();
    let listing = store.handle();
    let detail = store.handle();
    let cart_page = store.handle();

    let one = Product::new(1u64, "Essence Mascara", rupees(20));
    let two = Product::new(2u64, "Eyeshadow Palette", rupees(15));

    listing.add_to_cart(&one).unwrap();
    detail.add_to_cart(&two).unwrap();
    listing.add_to_cart(&one).unwrap();

    let snapshot = cart_page.snapshot().unwrap();
    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(line(&snapshot, 0), (ProductId::from(1u64), 2, rupees(40)));
    assert_eq!(line(&snapshot, 1), (ProductId::from(2u64), 1, rupees(15)));
    assert_eq!(snapshot.total, rupees(55));

    assert!(cart_page.remove_from_cart(&ProductId::from(2u64)).unwrap());
    let snapshot = cart_page.snapshot().unwrap();
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(line(&snapshot, 0), (ProductId::from(1u64), 2, rupees(40)));
    assert_eq!(snapshot.total, rupees(40));

    assert!(cart_page.update_quantity(&ProductId::from(1u64), 1).unwrap());
    assert_eq!(listing.total().unwrap(), rupees(20));
}

#[test]
fn decrement_past_one_removes_line() {
    let store = CartStore::new();
    let cart = store.handle();
    let id = ProductId::from("sku-7");

    cart.add_to_cart(&Product::new(id.clone(), "Lamp", rupees(5))).unwrap();
    cart.increment(&id).unwrap();

    assert_eq!(cart.decrement(&id).unwrap(), Some(1));
    assert_eq!(cart.decrement(&id).unwrap(), Some(0));
    assert!(!cart.contains(&id).unwrap());
    assert!(cart.snapshot().unwrap().is_empty());
}

#[test]
fn handle_outliving_session_fails_loudly() {
    let store = CartStore::new();
    let checkout = store.handle();
    checkout.add_to_cart(&Product::new(1u64, "Lamp", rupees(5))).unwrap();

    drop(store);

    let err = checkout.snapshot().unwrap_err();
    assert!(matches!(err, CoreError::AccessOutsideScope));
}
