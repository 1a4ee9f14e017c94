//! # EasyShop Demo Entry Point
//!
//! Runs one scripted shopping session against the configured catalog.
//!
//! ## Startup Sequence
//! 1. Load `.env` (if present)
//! 2. Initialize tracing (logging)
//! 3. Load `ConfigState` from the environment
//! 4. Build the catalog client
//! 5. Log in with `EASYSHOP_USERNAME` / `EASYSHOP_PASSWORD`
//! 6. Browse, fill the cart, check out, log out

use std::process::ExitCode;

use easyshop_storefront::state::ConfigState;
use easyshop_storefront::{init_tracing, run_demo, Storefront};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = match ConfigState::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let storefront = match Storefront::connect(config) {
        Ok(storefront) => storefront,
        Err(e) => {
            error!("catalog client error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let username = std::env::var("EASYSHOP_USERNAME").unwrap_or_else(|_| "emilys".to_string());
    let password = std::env::var("EASYSHOP_PASSWORD").unwrap_or_else(|_| "emilyspass".to_string());

    match run_demo(&storefront, &username, &password).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("demo session failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
