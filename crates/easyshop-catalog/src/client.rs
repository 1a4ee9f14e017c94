//! # Catalog HTTP Client
//!
//! reqwest implementation of [`ProductSource`].
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Method  Path                         Used by                          │
//! │  ──────  ───────────────────────────  ───────────────────────────────  │
//! │  GET     /products?limit&skip&select  Listing page                     │
//! │  GET     /products/search?q=...       Listing search box               │
//! │  GET     /products/{id}               Product detail page              │
//! │  POST    /auth/login                  Login form                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The user table endpoints are listed in [`crate::users`].
//!
//! When a session token is available it is sent as
//! `Authorization: Bearer <token>`.

use std::time::{Duration, Instant};

use easyshop_core::{Product, ProductId};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::query::{ProductPage, ProductQuery, UserQuery};
use crate::users::{User, UserDraft, UserPage, UserPatch, WireUserPage};
use crate::wire::{Credentials, LoginSession, WireLogin, WireProduct, WireProductPage};
use crate::{ProductSource, UserDirectory};

/// HTTP client for the catalog API.
///
/// ## Usage
/// ```rust,ignore
/// let client = CatalogClient::new("https://dummyjson.com", Duration::from_secs(10))?;
/// let page = client.fetch_products(&ProductQuery::page(1, 10), None).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBaseUrl`] for anything that is not an
    /// http(s) URL, or an HTTP error if the client fails to build.
    pub fn new(base_url: &str, timeout: Duration) -> CatalogResult<Self> {
        let base_url = normalize_base_url(base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(CatalogClient { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    fn authorize(request: RequestBuilder, token: Option<&SecretString>) -> RequestBuilder {
        match token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret())),
            None => request,
        }
    }
}

impl ProductSource for CatalogClient {
    async fn fetch_products(
        &self,
        query: &ProductQuery,
        token: Option<&SecretString>,
    ) -> CatalogResult<ProductPage> {
        let url = self.url(&query.path_and_query()?);
        debug!(%url, "fetching product page");
        let start = Instant::now();

        let response = Self::authorize(self.client.get(&url), token).send().await?;
        let wire: WireProductPage = read_json(response, None).await?;
        let page = wire.into_page(query.page, query.limit)?;

        debug!(
            count = page.products.len(),
            total = page.total,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "product page fetched"
        );
        Ok(page)
    }

    async fn fetch_product(&self, id: &ProductId, token: Option<&SecretString>) -> CatalogResult<Product> {
        let url = self.url(&format!("/products/{}", urlencoding::encode(&id.to_string())));
        debug!(%url, "fetching product detail");

        let response = Self::authorize(self.client.get(&url), token).send().await?;
        let wire: WireProduct = read_json(response, Some(CatalogError::NotFound(id.to_string()))).await?;
        Product::try_from(wire)
    }

    async fn login(&self, credentials: &Credentials) -> CatalogResult<LoginSession> {
        let url = self.url("/auth/login");
        debug!(username = %credentials.username, "logging in");

        let response = self.client.post(&url).json(&credentials.to_json()).send().await?;

        // The API answers bad credentials with 400 or 401.
        if matches!(response.status(), StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED) {
            warn!(username = %credentials.username, "login rejected");
            return Err(CatalogError::InvalidCredentials);
        }

        let wire: WireLogin = read_json(response, None).await?;
        info!(username = %credentials.username, "login accepted");
        Ok(LoginSession::from_wire(wire, &credentials.username))
    }
}

impl UserDirectory for CatalogClient {
    async fn fetch_users(&self, query: &UserQuery, token: Option<&SecretString>) -> CatalogResult<UserPage> {
        let url = self.url(&query.users_path_and_query()?);
        debug!(%url, "fetching user page");

        let response = Self::authorize(self.client.get(&url), token).send().await?;
        let wire: WireUserPage = read_json(response, None).await?;
        let page = wire.into_page(query.page, query.limit)?;

        debug!(count = page.users.len(), total = page.total, "user page fetched");
        Ok(page)
    }

    async fn add_user(&self, draft: &UserDraft, token: Option<&SecretString>) -> CatalogResult<User> {
        draft.validate()?;
        let url = self.url("/users/add");

        let response = Self::authorize(self.client.post(&url), token).json(draft).send().await?;
        let user: User = read_json(response, None).await?;
        info!(user_id = user.id, "user added");
        Ok(user)
    }

    async fn update_user(&self, id: u64, patch: &UserPatch, token: Option<&SecretString>) -> CatalogResult<User> {
        patch.validate()?;
        let url = self.url(&format!("/users/{}", id));

        let response = Self::authorize(self.client.put(&url), token).json(patch).send().await?;
        let user: User = read_json(response, Some(CatalogError::UserNotFound(id))).await?;
        info!(user_id = id, "user updated");
        Ok(user)
    }

    async fn delete_user(&self, id: u64, token: Option<&SecretString>) -> CatalogResult<User> {
        let url = self.url(&format!("/users/{}", id));

        let response = Self::authorize(self.client.delete(&url), token).send().await?;
        let user: User = read_json(response, Some(CatalogError::UserNotFound(id))).await?;
        info!(user_id = id, "user deleted");
        Ok(user)
    }
}

/// Checks the status and decodes the body.
///
/// On a 404, `not_found` names the missing resource; `None` falls through
/// to a plain [`CatalogError::Api`].
async fn read_json<T: DeserializeOwned>(response: Response, not_found: Option<CatalogError>) -> CatalogResult<T> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        if let Some(err) = not_found {
            return Err(err);
        }
    }

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        error!(status = status.as_u16(), %message, "catalog API error");
        return Err(CatalogError::Api {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| CatalogError::Decode(e.to_string()))
}

/// Trims whitespace and trailing slashes; requires an http(s) scheme.
pub fn normalize_base_url(raw: &str) -> CatalogResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');

    let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    let has_host = trimmed.split_once("://").is_some_and(|(_, rest)| !rest.is_empty());

    if !has_scheme || !has_host {
        return Err(CatalogError::InvalidBaseUrl(raw.to_string()));
    }

    Ok(trimmed.to_string())
}
