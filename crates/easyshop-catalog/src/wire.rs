//! # Wire Types
//!
//! JSON shapes returned by the catalog API and their conversion into
//! domain types. Prices arrive as decimal major units (`9.99`) and are
//! converted to integer minor units here, once.

use easyshop_core::validation::{validate_credential, validate_price_cents};
use easyshop_core::{Money, Product, ProductId, ValidationError};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::{CatalogError, CatalogResult};
use crate::query::ProductPage;

/// A product as the API sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct WireProduct {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<WireProduct> for Product {
    type Error = CatalogError;

    fn try_from(wire: WireProduct) -> CatalogResult<Self> {
        Ok(Product {
            price: price_to_money(wire.price)?,
            id: wire.id,
            title: wire.title,
            thumbnail: wire.thumbnail,
            description: wire.description,
        })
    }
}

/// Listing/search response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct WireProductPage {
    pub products: Vec<WireProduct>,
    pub total: u64,
}

impl WireProductPage {
    /// Converts to a [`ProductPage`] for the requested page/limit.
    pub fn into_page(self, page: u32, limit: u32) -> CatalogResult<ProductPage> {
        let products = self
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<CatalogResult<Vec<_>>>()?;

        Ok(ProductPage {
            products,
            total: self.total,
            page: page.max(1),
            limit,
        })
    }
}

/// Login response. Only the fields the storefront uses are read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireLogin {
    pub access_token: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
}

/// Converts a decimal major-unit price to minor units, rounding half up.
pub fn price_to_money(price: f64) -> CatalogResult<Money> {
    if !price.is_finite() {
        return Err(CatalogError::Decode(format!("price is not a number: {}", price)));
    }

    let cents = (price * 100.0).round() as i64;
    validate_price_cents(cents)?;
    Ok(Money::from_cents(cents))
}

// =============================================================================
// Login
// =============================================================================

/// Username and password from the login form.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    /// Validates and trims both fields (2-12 characters each).
    pub fn new(username: &str, password: &str) -> Result<Self, ValidationError> {
        let username = validate_credential("username", username)?;
        let password = validate_credential("password", password)?;

        Ok(Credentials {
            username,
            password: SecretString::from(password),
        })
    }

    pub(crate) fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "username": self.username,
            "password": self.password.expose_secret(),
        })
    }
}

/// A successful login.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub username: String,
    pub display_name: Option<String>,
    pub access_token: SecretString,
}

impl LoginSession {
    pub(crate) fn from_wire(wire: WireLogin, requested_username: &str) -> Self {
        LoginSession {
            username: wire.username.unwrap_or_else(|| requested_username.to_string()),
            display_name: wire.first_name,
            access_token: SecretString::from(wire.access_token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_conversion_rounds() {
        assert_eq!(price_to_money(9.99).unwrap().cents(), 999);
        assert_eq!(price_to_money(1899.0).unwrap().cents(), 189_900);
        assert_eq!(price_to_money(0.5).unwrap().cents(), 50);
        assert_eq!(price_to_money(0.0).unwrap().cents(), 0);
    }

    #[test]
    fn test_negative_or_nan_price_rejected() {
        assert!(matches!(price_to_money(-1.0), Err(CatalogError::Validation(_))));
        assert!(matches!(price_to_money(f64::NAN), Err(CatalogError::Decode(_))));
    }

    #[test]
    fn test_huge_price_rejected() {
        assert!(matches!(price_to_money(5e16), Err(CatalogError::Validation(_))));
        assert!(matches!(price_to_money(1e300), Err(CatalogError::Validation(_))));
        assert_eq!(price_to_money(10_000_000_000.0).unwrap(), Money::from_cents(1_000_000_000_000));
    }

    #[test]
    fn test_decode_listing_page() {
        let json = r#"{
            "products": [
                {"id": 1, "title": "Essence Mascara Lash Princess", "price": 9.99,
                 "thumbnail": "https://cdn.dummyjson.com/p/1/thumbnail.png"},
                {"id": 2, "title": "Eyeshadow Palette with Mirror", "price": 19.99}
            ],
            "total": 194, "skip": 0, "limit": 2
        }"#;

        let wire: WireProductPage = serde_json::from_str(json).unwrap();
        let page = wire.into_page(1, 2).unwrap();

        assert_eq!(page.total, 194);
        assert_eq!(page.products.len(), 2);
        assert_eq!(page.products[0].id, ProductId::Numeric(1));
        assert_eq!(page.products[0].price, Money::from_cents(999));
        assert!(page.products[0].thumbnail.is_some());
        assert!(page.products[1].thumbnail.is_none());
    }

    #[test]
    fn test_decode_login() {
        let json = r#"{"id":1,"username":"emilys","firstName":"Emily","accessToken":"abc.def.ghi","refreshToken":"x"}"#;
        let wire: WireLogin = serde_json::from_str(json).unwrap();
        let session = LoginSession::from_wire(wire, "emilys");

        assert_eq!(session.username, "emilys");
        assert_eq!(session.display_name.as_deref(), Some("Emily"));
        assert_eq!(session.access_token.expose_secret(), "abc.def.ghi");
    }

    #[test]
    fn test_credentials_validation() {
        assert!(Credentials::new("emilys", "emilyspass").is_ok());
        assert!(Credentials::new("e", "emilyspass").is_err());
        assert!(Credentials::new("emilys", "").is_err());
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("emilys", "emilyspass").unwrap();
        assert!(!format!("{:?}", creds).contains("emilyspass"));
        assert_eq!(creds.to_json()["password"], "emilyspass");
    }
}
