//! # EasyShop Storefront Library
//!
//! Session orchestration for the EasyShop storefront: configuration,
//! login, the session-scoped cart and the commands the views invoke.
//!
//! ## Module Organization
//! ```text
//! easyshop_storefront/
//! ├── lib.rs          ◄─── You are here (Storefront, logging, demo run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Configuration state
//! │   └── session.rs  ◄─── Authenticated session + cart scope
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── auth.rs     ◄─── Login / logout
//! │   ├── catalog.rs  ◄─── Listing and detail
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── checkout.rs ◄─── Summary and order placement
//! │   ├── config.rs   ◄─── Configuration retrieval
//! │   └── users.rs    ◄─── User table admin
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Cart Provisioning
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Storefront ── SessionState ── Session ── CartStore (owner)            │
//! │                     │                          │                        │
//! │                     │ cart()                   │ handle()               │
//! │                     ▼                          ▼                        │
//! │              CartHandle ──────────► cart commands, listing cards,      │
//! │                                     checkout                           │
//! │                                                                         │
//! │  Logged out: cart() fails, existing handles fail (OUT_OF_SCOPE).       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use easyshop_catalog::{CatalogClient, CatalogError, ProductSource};
use easyshop_core::{BillingInfo, CartHandle, PaymentInfo};
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::catalog::ListProductsArgs;
use error::ApiError;
use state::{ConfigState, SessionState};

/// Everything a view needs, bundled.
#[derive(Debug)]
pub struct Storefront<S> {
    pub config: ConfigState,
    pub session: SessionState,
    pub catalog: S,
}

impl Storefront<CatalogClient> {
    /// Builds a storefront backed by the HTTP catalog named in `config`.
    pub fn connect(config: ConfigState) -> Result<Self, CatalogError> {
        let catalog = CatalogClient::new(&config.api_base_url, config.request_timeout())?;
        info!(base_url = %catalog.base_url(), "catalog client ready");
        Ok(Storefront::new(config, catalog))
    }
}

impl<S: ProductSource> Storefront<S> {
    pub fn new(config: ConfigState, catalog: S) -> Self {
        Storefront {
            config,
            session: SessionState::new(),
            catalog,
        }
    }

    /// The logged-in user's cart.
    pub fn cart(&self) -> Result<CartHandle, ApiError> {
        Ok(self.session.cart()?)
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=easyshop=trace` - Show trace for easyshop crates only
/// - Default: INFO, DEBUG for easyshop crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,easyshop=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Runs a scripted shopping session.
///
/// ## Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Log in ───────────────────────────────────────────────────────────► │
/// │  2. List the first page of products ──────────────────────────────────► │
/// │  3. Add the first two products, bump the first one ───────────────────► │
/// │  4. Show the cart and the checkout summary ───────────────────────────► │
/// │  5. Place the order (simulated delay), cart is cleared ───────────────► │
/// │  6. Log out ──────────────────────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run_demo<S: ProductSource>(
    storefront: &Storefront<S>,
    username: &str,
    password: &str,
) -> Result<(), ApiError> {
    let user = commands::auth::login(&storefront.catalog, &storefront.session, username, password).await?;
    println!("Logged in as {}", user.display_name.as_deref().unwrap_or(&user.username));

    let listing = commands::catalog::list_products(
        &storefront.catalog,
        &storefront.session,
        &storefront.config,
        ListProductsArgs::default(),
    )
    .await?;
    println!(
        "Page {} of {} ({} products)",
        listing.page, listing.total_pages, listing.total
    );

    let cart = storefront.cart()?;
    for card in listing.products.iter().take(2) {
        commands::cart::add_to_cart(&cart, &card.product)?;
    }
    if let Some(first) = listing.products.first() {
        commands::cart::increment_item(&cart, &first.product.id)?;
    }

    let response = commands::cart::get_cart(&cart)?;
    for item in &response.items {
        println!("  {} x{}  {}", item.title, item.quantity, item.subtotal());
    }

    let view = commands::checkout::get_checkout_summary(&cart, &storefront.config)?;
    println!("Subtotal:    {}", view.display.subtotal);
    println!("Shipping:    {}", view.display.shipping);
    println!("Tax:         {}", view.display.tax);
    println!("Grand total: {}", view.display.grand_total);

    let confirmation = commands::checkout::place_order(
        &cart,
        &storefront.config,
        &demo_billing(&user.username),
        &demo_payment(),
    )
    .await?;
    println!("Order {} placed", confirmation.order_id);

    commands::auth::logout(&storefront.session);
    Ok(())
}

fn demo_billing(username: &str) -> BillingInfo {
    BillingInfo {
        first_name: username.to_string(),
        last_name: "Demo".to_string(),
        email: format!("{}@example.com", username),
        address: "1 Demo Street".to_string(),
        city: "Mumbai".to_string(),
        state: "MH".to_string(),
        zip_code: "400001".to_string(),
        ..BillingInfo::default()
    }
}

fn demo_payment() -> PaymentInfo {
    PaymentInfo {
        card_number: "4242 4242 4242 4242".to_string(),
        expiry_date: "12/30".to_string(),
        cvv: "123".to_string(),
        card_name: "Demo User".to_string(),
    }
}
