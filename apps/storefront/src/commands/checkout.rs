//! # Checkout Commands
//!
//! Order summary and (simulated) order placement.
//!
//! ## Place Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit form                                                            │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  snapshot cart ──► validate form ──► wait (simulated payment) ──►      │
//! │                         │                          settle ordered lines │
//! │                         ▼                                      │        │
//! │                  VALIDATION_ERROR                              ▼        │
//! │                  CART_ERROR (empty)                  OrderConfirmation  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No payment is processed. The cart lock is never held across the wait,
//! so after it only the ordered quantities are taken out of the cart;
//! items added meanwhile stay.

use easyshop_core::checkout as order;
use easyshop_core::{BillingInfo, CartHandle, CartLineItem, CheckoutSummary, OrderConfirmation, PaymentInfo};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::ConfigState;

/// The checkout page's order panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutView {
    pub items: Vec<CartLineItem>,
    pub summary: CheckoutSummary,
    pub free_shipping: bool,
    pub display: SummaryDisplay,
}

/// Summary amounts formatted with the configured currency symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDisplay {
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub grand_total: String,
}

impl SummaryDisplay {
    fn new(summary: &CheckoutSummary, config: &ConfigState) -> Self {
        SummaryDisplay {
            subtotal: config.format_currency(summary.subtotal.cents()),
            shipping: config.format_currency(summary.shipping.cents()),
            tax: config.format_currency(summary.tax.cents()),
            grand_total: config.format_currency(summary.grand_total.cents()),
        }
    }
}

/// Subtotal, shipping, tax and grand total for the current cart.
pub fn get_checkout_summary(cart: &CartHandle, config: &ConfigState) -> Result<CheckoutView, ApiError> {
    debug!("get_checkout_summary command");

    let snapshot = cart.snapshot()?;
    let summary = CheckoutSummary::compute(&snapshot, &config.checkout_policy());

    Ok(CheckoutView {
        items: snapshot.items,
        free_shipping: summary.shipping.is_zero() && !summary.subtotal.is_zero(),
        display: SummaryDisplay::new(&summary, config),
        summary,
    })
}

/// Places the order.
///
/// ## Behavior
/// - Empty cart: `CART_ERROR`
/// - Missing billing/payment field: `VALIDATION_ERROR`, cart untouched
/// - Otherwise waits the configured delay, removes the ordered
///   quantities from the cart and returns the confirmation
pub async fn place_order(
    cart: &CartHandle,
    config: &ConfigState,
    billing: &BillingInfo,
    payment: &PaymentInfo,
) -> Result<OrderConfirmation, ApiError> {
    debug!(?payment, "place_order command");

    let snapshot = cart.snapshot()?;
    let confirmation = order::place_order(&snapshot, billing, payment, &config.checkout_policy())?;

    tokio::time::sleep(config.checkout_delay()).await;

    // The order stands even if the session ended during the wait.
    if let Err(e) = cart.settle_order(&confirmation.items) {
        warn!(order_id = %confirmation.order_id, "cart not settled after order: {}", e);
    }

    info!(
        order_id = %confirmation.order_id,
        items = confirmation.summary.total_items,
        grand_total = %confirmation.summary.grand_total,
        "order placed"
    );
    Ok(confirmation)
}
