//! # easyshop-catalog: Product Catalog Client
//!
//! Talks to the mock REST API behind the storefront (DummyJSON-style):
//! paged product listings, search, product detail, login and the admin
//! user table.
//!
//! ## Module Organization
//! ```text
//! easyshop_catalog/
//! ├── lib.rs      ◄─── You are here (ProductSource, UserDirectory + exports)
//! ├── client.rs   ◄─── reqwest implementation
//! ├── query.rs    ◄─── ListQuery → path + query string
//! ├── users.rs    ◄─── User records, add form, partial edit
//! ├── wire.rs     ◄─── JSON shapes and conversion to domain types
//! ├── memory.rs   ◄─── In-memory source (offline runs, tests)
//! └── error.rs    ◄─── CatalogError
//! ```
//!
//! ## Why a Trait?
//! The storefront only needs "something that yields products and tokens".
//! [`CatalogClient`] is the HTTP implementation; [`InMemoryCatalog`]
//! serves a fixed product list for offline runs and tests. The user table
//! sits behind its own trait, [`UserDirectory`], with the same two
//! implementations.

pub mod client;
pub mod error;
pub mod memory;
pub mod query;
pub mod users;
pub mod wire;

use std::future::Future;

use easyshop_core::{Product, ProductId};
use secrecy::SecretString;

pub use client::CatalogClient;
pub use error::{CatalogError, CatalogResult};
pub use memory::InMemoryCatalog;
pub use query::{ListQuery, ProductPage, ProductQuery, SortOrder, UserQuery};
pub use users::{User, UserDraft, UserPage, UserPatch};
pub use wire::{Credentials, LoginSession};

/// Default page size for product listings.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A source of catalog data and login tokens.
pub trait ProductSource: Send + Sync {
    /// Fetches one page of products, optionally filtered by a search term.
    fn fetch_products(
        &self,
        query: &ProductQuery,
        token: Option<&SecretString>,
    ) -> impl Future<Output = CatalogResult<ProductPage>> + Send;

    /// Fetches a single product's detail.
    fn fetch_product(
        &self,
        id: &ProductId,
        token: Option<&SecretString>,
    ) -> impl Future<Output = CatalogResult<Product>> + Send;

    /// Exchanges credentials for an access token.
    fn login(&self, credentials: &Credentials) -> impl Future<Output = CatalogResult<LoginSession>> + Send;
}

/// The admin user table's backing store.
///
/// Every call carries the session token; the storefront never reaches
/// this trait without one.
pub trait UserDirectory: Send + Sync {
    /// Fetches one page of users, optionally searched and sorted.
    fn fetch_users(
        &self,
        query: &UserQuery,
        token: Option<&SecretString>,
    ) -> impl Future<Output = CatalogResult<UserPage>> + Send;

    /// Creates a user from a validated draft.
    fn add_user(
        &self,
        draft: &UserDraft,
        token: Option<&SecretString>,
    ) -> impl Future<Output = CatalogResult<User>> + Send;

    /// Applies a partial edit and returns the updated record.
    fn update_user(
        &self,
        id: u64,
        patch: &UserPatch,
        token: Option<&SecretString>,
    ) -> impl Future<Output = CatalogResult<User>> + Send;

    /// Deletes a user and returns the removed record.
    fn delete_user(&self, id: u64, token: Option<&SecretString>) -> impl Future<Output = CatalogResult<User>> + Send;
}
