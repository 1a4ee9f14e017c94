//! # In-Memory Catalog
//!
//! A [`ProductSource`] and [`UserDirectory`] backed by a fixed product
//! list, a set of login accounts and a mutable user table. Used for
//! offline runs and command tests; paging, search and sorting follow the
//! HTTP API's rules.
//!
//! Unlike the mock API, user writes stick. Clones share one user table.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use secrecy::{ExposeSecret, SecretString};

use easyshop_core::{Product, ProductId};

use crate::error::{CatalogError, CatalogResult};
use crate::query::{ListQuery, ProductPage, ProductQuery, SortOrder, UserQuery};
use crate::users::{User, UserDraft, UserPage, UserPatch};
use crate::wire::{Credentials, LoginSession};
use crate::{ProductSource, UserDirectory};

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
    accounts: Vec<(String, String)>,
    directory: Arc<Mutex<Vec<User>>>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        InMemoryCatalog {
            products,
            ..InMemoryCatalog::default()
        }
    }

    /// Registers an account that [`ProductSource::login`] will accept.
    pub fn with_user(mut self, username: &str, password: &str) -> Self {
        self.accounts.push((username.to_string(), password.to_string()));
        self
    }

    /// Seeds the user table.
    pub fn with_directory(self, users: Vec<User>) -> Self {
        *lock(&self.directory) = users;
        self
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Copy of the user table in insertion order.
    pub fn users(&self) -> Vec<User> {
        lock(&self.directory).clone()
    }

    fn matching(&self, query: &ProductQuery) -> CatalogResult<Vec<Product>> {
        // Same validation the HTTP client applies before sending.
        query.path_and_query()?;

        let term = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut matches: Vec<Product> = self
            .products
            .iter()
            .filter(|p| match &term {
                Some(term) => p.title.to_lowercase().contains(term),
                None => true,
            })
            .cloned()
            .collect();

        // Unknown or blank fields leave catalog order alone, whatever the order.
        let sorted = match query.sort_field() {
            Some("price") => {
                matches.sort_by_key(|p| p.price);
                true
            }
            Some("title") => {
                matches.sort_by(|a, b| a.title.cmp(&b.title));
                true
            }
            _ => false,
        };
        if sorted && query.order == Some(SortOrder::Desc) {
            matches.reverse();
        }

        Ok(matches)
    }
}

impl ProductSource for InMemoryCatalog {
    async fn fetch_products(
        &self,
        query: &ProductQuery,
        _token: Option<&SecretString>,
    ) -> CatalogResult<ProductPage> {
        let matches = self.matching(query)?;
        let total = matches.len() as u64;

        let products = page_of(matches, query);

        Ok(ProductPage {
            products,
            total,
            page: query.page.max(1),
            limit: query.limit,
        })
    }

    async fn fetch_product(&self, id: &ProductId, _token: Option<&SecretString>) -> CatalogResult<Product> {
        self.products
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    async fn login(&self, credentials: &Credentials) -> CatalogResult<LoginSession> {
        let known = self.accounts.iter().any(|(username, password)| {
            username == &credentials.username && password == credentials.password.expose_secret()
        });

        if !known {
            return Err(CatalogError::InvalidCredentials);
        }

        Ok(LoginSession {
            username: credentials.username.clone(),
            display_name: None,
            access_token: SecretString::from(format!("memory-{}", credentials.username)),
        })
    }
}

impl UserDirectory for InMemoryCatalog {
    async fn fetch_users(&self, query: &UserQuery, _token: Option<&SecretString>) -> CatalogResult<UserPage> {
        query.users_path_and_query()?;
        let term = query.search_term()?.map(|t| t.to_lowercase());

        let mut matches: Vec<User> = lock(&self.directory)
            .iter()
            .filter(|u| match &term {
                Some(term) => [&u.first_name, &u.last_name, &u.email]
                    .iter()
                    .any(|field| field.to_lowercase().contains(term)),
                None => true,
            })
            .cloned()
            .collect();

        let sorted = match query.sort_field() {
            Some("firstName") => sort_on(&mut matches, |u| u.first_name.clone()),
            Some("lastName") => sort_on(&mut matches, |u| u.last_name.clone()),
            Some("email") => sort_on(&mut matches, |u| u.email.clone()),
            Some("age") => sort_on(&mut matches, |u| u.age),
            Some("role") => sort_on(&mut matches, |u| u.role.clone()),
            _ => false,
        };
        if sorted && query.order == Some(SortOrder::Desc) {
            matches.reverse();
        }

        let total = matches.len() as u64;
        Ok(UserPage {
            users: page_of(matches, query),
            total,
            page: query.page.max(1),
            limit: query.limit,
        })
    }

    async fn add_user(&self, draft: &UserDraft, _token: Option<&SecretString>) -> CatalogResult<User> {
        draft.validate()?;

        let mut users = lock(&self.directory);
        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let user = draft.clone().into_user(id);
        users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: u64, patch: &UserPatch, _token: Option<&SecretString>) -> CatalogResult<User> {
        patch.validate()?;

        let mut users = lock(&self.directory);
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(CatalogError::UserNotFound(id))?;
        patch.apply(user);
        Ok(user.clone())
    }

    async fn delete_user(&self, id: u64, _token: Option<&SecretString>) -> CatalogResult<User> {
        let mut users = lock(&self.directory);
        let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or(CatalogError::UserNotFound(id))?;
        Ok(users.remove(index))
    }
}

fn sort_on<K: Ord>(users: &mut [User], key: impl FnMut(&User) -> K) -> bool {
    users.sort_by_key(key);
    true
}

fn page_of<T>(rows: Vec<T>, query: &ListQuery) -> Vec<T> {
    let skip = usize::try_from(query.skip()).unwrap_or(usize::MAX);
    rows.into_iter().skip(skip).take(query.limit as usize).collect()
}

// Each write completes before it could panic.
fn lock(users: &Mutex<Vec<User>>) -> MutexGuard<'_, Vec<User>> {
    users.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use easyshop_core::Money;

    fn user(id: u64, first: &str, last: &str, age: u32) -> User {
        User {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}.{}@x.dummyjson.com", first.to_lowercase(), last.to_lowercase()),
            age,
            gender: "female".to_string(),
            birth_date: "1990-1-1".to_string(),
            role: "user".to_string(),
        }
    }

    fn directory() -> InMemoryCatalog {
        InMemoryCatalog::default().with_directory(vec![
            user(1, "Emily", "Johnson", 28),
            user(2, "Michael", "Williams", 35),
            user(3, "Sophia", "Brown", 42),
            user(4, "James", "Davis", 45),
        ])
    }

    fn draft() -> UserDraft {
        UserDraft {
            first_name: "Ava".to_string(),
            last_name: "Taylor".to_string(),
            email: "ava.taylor@x.dummyjson.com".to_string(),
            age: 27,
            gender: "female".to_string(),
            birth_date: "1997-8-2".to_string(),
            role: "moderator".to_string(),
        }
    }

    fn catalog() -> InMemoryCatalog {
        let products = (1..=25u64)
            .map(|i| Product::new(i, format!("Item {:02}", i), Money::from_cents(i as i64 * 100)))
            .collect();
        InMemoryCatalog::new(products).with_user("emilys", "emilyspass")
    }

    #[tokio::test]
    async fn test_paging() {
        let page = catalog().fetch_products(&ProductQuery::page(3, 10), None).await.unwrap();
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.products.len(), 5);
        assert_eq!(page.products[0].id, ProductId::Numeric(21));
        assert!(!page.has_next());
    }

    #[tokio::test]
    async fn test_search_and_sort() {
        let query = ProductQuery::page(1, 10)
            .with_search("item 1")
            .sorted_by("price", SortOrder::Desc);
        let page = catalog().fetch_products(&query, None).await.unwrap();

        // Item 10..=19
        assert_eq!(page.total, 10);
        assert_eq!(page.products[0].id, ProductId::Numeric(19));
    }

    #[tokio::test]
    async fn test_unknown_sort_field_keeps_catalog_order() {
        let catalog = catalog();
        for field in ["rating", "   "] {
            let query = ProductQuery::page(1, 10).sorted_by(field, SortOrder::Desc);
            let page = catalog.fetch_products(&query, None).await.unwrap();
            assert_eq!(page.products[0].id, ProductId::Numeric(1), "sortBy={:?}", field);
        }
    }

    #[tokio::test]
    async fn test_detail_and_missing() {
        let catalog = catalog();
        let product = catalog.fetch_product(&ProductId::Numeric(7), None).await.unwrap();
        assert_eq!(product.title, "Item 07");

        let err = catalog.fetch_product(&ProductId::from("7"), None).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_user_paging_search_and_sort() {
        let users = directory();

        let page = users.fetch_users(&UserQuery::page(2, 3), None).await.unwrap();
        assert_eq!(page.total, 4);
        assert_eq!(page.users.len(), 1);
        assert_eq!(page.users[0].id, 4);

        let page = users
            .fetch_users(&UserQuery::page(1, 10).with_search("WILL"), None)
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.users[0].first_name, "Michael");

        let page = users
            .fetch_users(&UserQuery::page(1, 10).sorted_by("age", SortOrder::Desc), None)
            .await
            .unwrap();
        let ids: Vec<u64> = page.users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);

        let page = users
            .fetch_users(&UserQuery::page(1, 10).sorted_by("shoeSize", SortOrder::Desc), None)
            .await
            .unwrap();
        assert_eq!(page.users[0].id, 1);
    }

    #[tokio::test]
    async fn test_user_add_edit_delete() {
        let users = directory();

        let added = users.add_user(&draft(), None).await.unwrap();
        assert_eq!(added.id, 5);
        assert_eq!(users.users().len(), 5);

        let patch = UserPatch {
            role: Some("admin".to_string()),
            ..UserPatch::default()
        };
        let edited = users.update_user(5, &patch, None).await.unwrap();
        assert_eq!(edited.role, "admin");
        assert_eq!(edited.first_name, "Ava");

        let removed = users.delete_user(2, None).await.unwrap();
        assert_eq!(removed.first_name, "Michael");
        assert!(users.users().iter().all(|u| u.id != 2));

        let err = users.delete_user(2, None).await.unwrap_err();
        assert!(matches!(err, CatalogError::UserNotFound(2)));
        let err = users.update_user(99, &patch, None).await.unwrap_err();
        assert!(matches!(err, CatalogError::UserNotFound(99)));
    }

    #[tokio::test]
    async fn test_invalid_user_writes_leave_table_untouched() {
        let users = directory();

        let err = users
            .add_user(&UserDraft { gender: String::new(), ..draft() }, None)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        let err = users.update_user(1, &UserPatch::default(), None).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        assert_eq!(users.users(), directory().users());
    }

    #[tokio::test]
    async fn test_login() {
        let catalog = catalog();
        let ok = catalog
            .login(&Credentials::new("emilys", "emilyspass").unwrap())
            .await
            .unwrap();
        assert_eq!(ok.username, "emilys");

        let err = catalog
            .login(&Credentials::new("emilys", "wrong").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCredentials));
    }
}
