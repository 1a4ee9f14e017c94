//! # Listing Queries
//!
//! Builds listing/search URLs and describes the page that comes back.
//! Products and users share the same paging, search and sort parameters;
//! only the resource path and the selected fields differ.
//!
//! ```text
//! ProductQuery { page: 3, limit: 10, search: None }
//!      → /products?limit=10&skip=20&select=thumbnail,title,price
//!
//! ProductQuery { page: 1, limit: 10, search: Some("red lipstick") }
//!      → /products/search?q=red%20lipstick&limit=10&skip=0&select=thumbnail,title,price
//!
//! UserQuery { page: 2, limit: 10, sort_by: Some("age"), order: Some(Desc) }
//!      → /users?limit=10&skip=10&select=firstName,...,role&sortBy=age&order=desc
//! ```

use easyshop_core::validation::{validate_page_size, validate_search_query};
use easyshop_core::Product;
use serde::{Deserialize, Serialize};

use crate::error::CatalogResult;
use crate::DEFAULT_PAGE_SIZE;

/// Fields requested for listing cards.
const LISTING_FIELDS: &str = "thumbnail,title,price";

/// Fields requested for the user table.
const USER_FIELDS: &str = "firstName,lastName,email,age,gender,birthDate,role";

/// Sort direction for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Product listing request.
pub type ProductQuery = ListQuery;

/// User table request.
pub type UserQuery = ListQuery;

/// One listing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// 1-based page number. Page 0 is treated as page 1.
    pub page: u32,
    pub limit: u32,
    #[serde(default)]
    pub search: Option<String>,
    /// Field to sort by, e.g. `price`, `title` or `lastName`.
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub order: Option<SortOrder>,
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery::page(1, DEFAULT_PAGE_SIZE)
    }
}

impl ListQuery {
    /// A plain listing page.
    pub fn page(page: u32, limit: u32) -> Self {
        ListQuery {
            page,
            limit,
            search: None,
            sort_by: None,
            order: None,
        }
    }

    /// Filters by a free-text search term.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.order = Some(order);
        self
    }

    /// Number of rows skipped before this page.
    pub fn skip(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.limit)
    }

    /// Validates the query and renders the product listing path with its
    /// query string. A blank search term falls back to the plain listing.
    pub fn path_and_query(&self) -> CatalogResult<String> {
        self.render("/products", LISTING_FIELDS)
    }

    /// Same as [`ListQuery::path_and_query`] for the user table.
    pub fn users_path_and_query(&self) -> CatalogResult<String> {
        self.render("/users", USER_FIELDS)
    }

    /// The search term after validation, `None` when blank.
    pub(crate) fn search_term(&self) -> CatalogResult<Option<String>> {
        match &self.search {
            Some(raw) => Ok(validate_search_query(raw)?),
            None => Ok(None),
        }
    }

    /// The sort field, `None` when blank.
    pub(crate) fn sort_field(&self) -> Option<&str> {
        self.sort_by.as_deref().map(str::trim).filter(|f| !f.is_empty())
    }

    fn render(&self, resource: &str, select: &str) -> CatalogResult<String> {
        validate_page_size(self.limit)?;

        let mut url = match self.search_term()? {
            Some(term) => format!("{}/search?q={}&", resource, urlencoding::encode(&term)),
            None => format!("{}?", resource),
        };
        url.push_str(&format!("limit={}&skip={}&select={}", self.limit, self.skip(), select));

        if let Some(field) = self.sort_field() {
            url.push_str(&format!("&sortBy={}", urlencoding::encode(field)));
            url.push_str(&format!("&order={}", self.order.unwrap_or(SortOrder::Asc).as_str()));
        }

        Ok(url)
    }
}

/// A page of listing results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// Matching products across all pages.
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl ProductPage {
    pub fn total_pages(&self) -> u64 {
        page_count(self.total, self.limit)
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// `ceil(total / limit)`, 0 for a zero limit.
pub(crate) fn page_count(total: u64, limit: u32) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(u64::from(limit))
}
