//! # Catalog Commands
//!
//! Product listing and detail. Both views sit behind login: without a
//! session they fail with `UNAUTHORIZED` and never reach the catalog.
//!
//! Each product card carries the quantity already in the cart so the view
//! can show "Add to cart" or the in-cart count.

use easyshop_catalog::{ProductPage, ProductQuery, ProductSource, SortOrder};
use easyshop_core::{CartSnapshot, Product, ProductId};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::{ConfigState, SessionState};

/// Listing page parameters from the view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsArgs {
    /// 1-based; defaults to the first page
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub order: Option<SortOrder>,
}

/// A product plus how many of it are in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    #[serde(flatten)]
    pub product: Product,
    pub quantity_in_cart: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<ProductCard>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl ProductListResponse {
    fn new(page: ProductPage, cart: &CartSnapshot) -> Self {
        ProductListResponse {
            total_pages: page.total_pages(),
            has_next: page.has_next(),
            has_previous: page.has_previous(),
            total: page.total,
            page: page.page,
            limit: page.limit,
            products: page
                .products
                .into_iter()
                .map(|product| card(product, cart))
                .collect(),
        }
    }
}

fn card(product: Product, cart: &CartSnapshot) -> ProductCard {
    let quantity_in_cart = cart.get(&product.id).map_or(0, |item| item.quantity);
    ProductCard {
        product,
        quantity_in_cart,
    }
}

/// Token and cart snapshot for a protected view.
fn require_session(session: &SessionState, view: &str) -> Result<(SecretString, CartSnapshot), ApiError> {
    let token = session.token();
    let cart = session.cart().and_then(|cart| cart.snapshot());

    match (token, cart) {
        (Some(token), Ok(cart)) => Ok((token, cart)),
        _ => {
            warn!(view, "protected view requested without a session");
            Err(ApiError::unauthorized("Please log in to continue"))
        }
    }
}

/// Lists one page of products, optionally filtered by a search term.
///
/// The page size comes from configuration.
pub async fn list_products<S: ProductSource>(
    catalog: &S,
    session: &SessionState,
    config: &ConfigState,
    args: ListProductsArgs,
) -> Result<ProductListResponse, ApiError> {
    debug!(page = ?args.page, search = ?args.search, "list_products command");
    let (token, cart) = require_session(session, "listing")?;

    let mut query = ProductQuery::page(args.page.unwrap_or(1), config.page_size);
    if let Some(search) = args.search {
        query = query.with_search(search);
    }
    if let Some(field) = args.sort_by {
        query = query.sorted_by(field, args.order.unwrap_or(SortOrder::Asc));
    }

    let page = catalog.fetch_products(&query, Some(&token)).await?;
    debug!(count = page.products.len(), total = page.total, "products listed");

    Ok(ProductListResponse::new(page, &cart))
}

/// Loads one product's detail page.
pub async fn get_product<S: ProductSource>(
    catalog: &S,
    session: &SessionState,
    product_id: &ProductId,
) -> Result<ProductCard, ApiError> {
    debug!(%product_id, "get_product command");
    let (token, cart) = require_session(session, "detail")?;

    let product = catalog.fetch_product(product_id, Some(&token)).await?;
    Ok(card(product, &cart))
}
