//! # Config Commands

use tracing::debug;

use crate::state::ConfigState;

/// Gets the storefront configuration.
///
/// ## When Used
/// - App startup (page size, currency symbol)
/// - Checkout page (free shipping threshold hint)
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
