//! # Checkout
//!
//! Shipping, tax and simulated order placement over a cart snapshot.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Flow                                        │
//! │                                                                         │
//! │  CartSnapshot ──► CheckoutSummary::compute(policy)                     │
//! │                        │                                                │
//! │                        │  subtotal   = cart total                       │
//! │                        │  shipping   = 0 if subtotal > threshold        │
//! │                        │               else flat fee                    │
//! │                        │  tax        = subtotal × rate                  │
//! │                        │  grand      = subtotal + shipping + tax        │
//! │                        ▼                                                │
//! │  BillingInfo + PaymentInfo ──► place_order() ──► OrderConfirmation     │
//! │                                      │                                  │
//! │                                      ├── empty cart?   → EmptyCart      │
//! │                                      └── missing field → Validation     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No payment is taken. Card details are only checked for presence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{CartLineItem, CartSnapshot};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::TaxRate;
use crate::validation::{validate_email, validate_required, ValidationResult};
use crate::{DEFAULT_FLAT_SHIPPING_CENTS, DEFAULT_FREE_SHIPPING_THRESHOLD_CENTS, DEFAULT_TAX_RATE_BPS};

// =============================================================================
// Policy
// =============================================================================

/// Shipping and tax rules applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPolicy {
    /// Shipping is free when the subtotal is strictly above this amount.
    pub free_shipping_threshold: Money,
    pub flat_shipping: Money,
    pub tax_rate: TaxRate,
}

impl Default for CheckoutPolicy {
    /// Free shipping over ₹2000, otherwise ₹99; 18% GST.
    fn default() -> Self {
        CheckoutPolicy {
            free_shipping_threshold: Money::from_cents(DEFAULT_FREE_SHIPPING_THRESHOLD_CENTS),
            flat_shipping: Money::from_cents(DEFAULT_FLAT_SHIPPING_CENTS),
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
        }
    }
}

impl CheckoutPolicy {
    /// Shipping charged for a given subtotal.
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if subtotal > self.free_shipping_threshold {
            Money::zero()
        } else {
            self.flat_shipping
        }
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Order totals shown beside the checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutSummary {
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub grand_total: Money,
    #[ts(type = "number")]
    pub total_items: u64,
}

impl CheckoutSummary {
    /// Derives the summary for `cart` under `policy`.
    ///
    /// ## Example
    /// ```rust
    /// use easyshop_core::{Cart, CheckoutPolicy, CheckoutSummary, Money, Product};
    ///
    /// let mut cart = Cart::new();
    /// cart.add(&Product::new(1u64, "Lamp", Money::from_major_minor(500, 0)));
    ///
    /// let summary = CheckoutSummary::compute(&cart.snapshot(), &CheckoutPolicy::default());
    /// assert_eq!(summary.shipping, Money::from_major_minor(99, 0));
    /// assert_eq!(summary.tax, Money::from_major_minor(90, 0));
    /// assert_eq!(summary.grand_total, Money::from_major_minor(689, 0));
    /// ```
    pub fn compute(cart: &CartSnapshot, policy: &CheckoutPolicy) -> Self {
        let subtotal = cart.total;
        let shipping = policy.shipping_for(subtotal);
        let tax = subtotal.calculate_tax(policy.tax_rate);

        CheckoutSummary {
            subtotal,
            shipping,
            tax,
            grand_total: subtotal + shipping + tax,
            total_items: cart.total_quantity,
        }
    }
}

// =============================================================================
// Checkout Form
// =============================================================================

/// Billing section of the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillingInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Optional.
    #[serde(default)]
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    "India".to_string()
}

impl Default for BillingInfo {
    fn default() -> Self {
        BillingInfo {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: default_country(),
        }
    }
}

impl BillingInfo {
    /// Every field except phone and country is required; email must be
    /// well formed.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_required("firstName", &self.first_name)?;
        validate_required("lastName", &self.last_name)?;
        validate_email(&self.email)?;
        validate_required("address", &self.address)?;
        validate_required("city", &self.city)?;
        validate_required("state", &self.state)?;
        validate_required("zipCode", &self.zip_code)?;
        Ok(())
    }
}

/// Payment section of the checkout form. Never charged.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentInfo {
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub card_name: String,
}

impl PaymentInfo {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_required("cardNumber", &self.card_number)?;
        validate_required("expiryDate", &self.expiry_date)?;
        validate_required("cvv", &self.cvv)?;
        validate_required("cardName", &self.card_name)?;
        Ok(())
    }

    /// Last four digits of the card number, for the confirmation screen.
    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().filter(char::is_ascii_digit).collect();
        let start = digits.len().saturating_sub(4);
        digits[start..].iter().collect()
    }
}

// Card details stay out of logs.
impl std::fmt::Debug for PaymentInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentInfo")
            .field("card_number", &format_args!("****{}", self.last_four()))
            .field("card_name", &self.card_name)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Order Placement
// =============================================================================

/// Result of a (simulated) successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderConfirmation {
    #[ts(as = "String")]
    pub order_id: Uuid,
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
    pub items: Vec<CartLineItem>,
    pub summary: CheckoutSummary,
    pub ship_to: String,
    pub card_last_four: String,
}

/// Validates the checkout form against `cart` and produces a confirmation.
///
/// The cart is not touched; the caller clears it once the confirmation is
/// accepted.
pub fn place_order(
    cart: &CartSnapshot,
    billing: &BillingInfo,
    payment: &PaymentInfo,
    policy: &CheckoutPolicy,
) -> CoreResult<OrderConfirmation> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    billing.validate()?;
    payment.validate()?;

    Ok(OrderConfirmation {
        order_id: Uuid::new_v4(),
        placed_at: Utc::now(),
        items: cart.items.clone(),
        summary: CheckoutSummary::compute(cart, policy),
        ship_to: format!(
            "{} {}, {}, {} {}, {}",
            billing.first_name.trim(),
            billing.last_name.trim(),
            billing.city.trim(),
            billing.state.trim(),
            billing.zip_code.trim(),
            billing.country.trim()
        ),
        card_last_four: payment.last_four(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::error::ValidationError;
    use crate::types::Product;

    fn cart_with(lines: &[(u64, i64, u32)]) -> CartSnapshot {
        let mut cart = Cart::new();
        for &(id, major, qty) in lines {
            let product = Product::new(id, format!("P{}", id), Money::from_major_minor(major, 0));
            cart.add(&product);
            cart.update_quantity(&product.id, qty);
        }
        cart.snapshot()
    }

    fn billing() -> BillingInfo {
        BillingInfo {
            first_name: "Emily".to_string(),
            last_name: "Johnson".to_string(),
            email: "emily@example.com".to_string(),
            address: "12 MG Road".to_string(),
            city: "Pune".to_string(),
            state: "MH".to_string(),
            zip_code: "411001".to_string(),
            ..BillingInfo::default()
        }
    }

    fn payment() -> PaymentInfo {
        PaymentInfo {
            card_number: "4111 1111 1111 1234".to_string(),
            expiry_date: "12/29".to_string(),
            cvv: "123".to_string(),
            card_name: "Emily Johnson".to_string(),
        }
    }

    #[test]
    fn test_shipping_charged_at_or_below_threshold() {
        let policy = CheckoutPolicy::default();
        let summary = CheckoutSummary::compute(&cart_with(&[(1, 2000, 1)]), &policy);

        assert_eq!(summary.shipping, Money::from_major_minor(99, 0));
    }

    #[test]
    fn test_shipping_free_above_threshold() {
        let policy = CheckoutPolicy::default();
        let summary = CheckoutSummary::compute(&cart_with(&[(1, 1000, 2), (2, 1, 1)]), &policy);

        assert_eq!(summary.subtotal, Money::from_major_minor(2001, 0));
        assert!(summary.shipping.is_zero());
        assert_eq!(summary.total_items, 3);
    }

    #[test]
    fn test_grand_total_adds_tax_and_shipping() {
        let policy = CheckoutPolicy::default();
        let summary = CheckoutSummary::compute(&cart_with(&[(1, 20, 2), (2, 15, 1)]), &policy);

        // 55 + 99 + 9.90
        assert_eq!(summary.subtotal, Money::from_major_minor(55, 0));
        assert_eq!(summary.tax, Money::from_major_minor(9, 90));
        assert_eq!(summary.grand_total, Money::from_major_minor(163, 90));
    }

    #[test]
    fn test_place_order_rejects_empty_cart() {
        let result = place_order(&Cart::new().snapshot(), &billing(), &payment(), &CheckoutPolicy::default());
        assert!(matches!(result, Err(CoreError::EmptyCart)));
    }

    #[test]
    fn test_place_order_requires_fields() {
        let cart = cart_with(&[(1, 20, 1)]);
        let mut incomplete = billing();
        incomplete.city = "  ".to_string();

        let result = place_order(&cart, &incomplete, &payment(), &CheckoutPolicy::default());
        match result {
            Err(CoreError::Validation(ValidationError::Required { field })) => assert_eq!(field, "city"),
            other => panic!("expected missing city, got {:?}", other),
        }

        let mut no_cvv = payment();
        no_cvv.cvv.clear();
        assert!(matches!(
            place_order(&cart, &billing(), &no_cvv, &CheckoutPolicy::default()),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_phone_is_optional() {
        let mut info = billing();
        info.phone.clear();
        assert!(info.validate().is_ok());
    }

    #[test]
    fn test_place_order_confirmation() {
        let cart = cart_with(&[(1, 20, 2)]);
        let confirmation = place_order(&cart, &billing(), &payment(), &CheckoutPolicy::default()).unwrap();

        assert_eq!(confirmation.items, cart.items);
        assert_eq!(confirmation.summary.subtotal, Money::from_major_minor(40, 0));
        assert_eq!(confirmation.card_last_four, "1234");
        assert_eq!(confirmation.ship_to, "Emily Johnson, Pune, MH 411001, India");
    }

    #[test]
    fn test_payment_debug_masks_card() {
        let rendered = format!("{:?}", payment());
        assert!(rendered.contains("****1234"));
        assert!(!rendered.contains("4111"));
        assert!(!rendered.contains("123\""));
    }

    #[test]
    fn test_billing_country_defaults_to_india() {
        let json = r#"{"firstName":"A","lastName":"B","email":"a@b.co","address":"x","city":"y","state":"z","zipCode":"1"}"#;
        let info: BillingInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.country, "India");
        assert!(info.phone.is_empty());
    }
}
