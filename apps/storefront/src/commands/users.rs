//! # User Admin Commands
//!
//! The user table page: list, search, sort by column, add, edit and
//! delete. Every command needs a logged-in session; without one it fails
//! with `UNAUTHORIZED` and never reaches the directory.
//!
//! ## Column Sort
//! ```text
//! click ──► asc ──► desc ──► unsorted ──► asc ...
//! ```
//! [`next_sort_order`] gives the step; the view sends the result back as
//! `sortBy`/`order` (or neither) in [`ListUsersArgs`].

use easyshop_catalog::{SortOrder, User, UserDirectory, UserDraft, UserPage, UserPatch, UserQuery};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::{ConfigState, SessionState};

/// User table parameters from the view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersArgs {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub order: Option<SortOrder>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListResponse {
    pub users: Vec<User>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl From<UserPage> for UserListResponse {
    fn from(page: UserPage) -> Self {
        UserListResponse {
            total_pages: page.total_pages(),
            has_next: page.has_next(),
            has_previous: page.has_previous(),
            total: page.total,
            page: page.page,
            limit: page.limit,
            users: page.users,
        }
    }
}

/// Next state of a column header click.
pub fn next_sort_order(current: Option<SortOrder>) -> Option<SortOrder> {
    match current {
        None => Some(SortOrder::Asc),
        Some(SortOrder::Asc) => Some(SortOrder::Desc),
        Some(SortOrder::Desc) => None,
    }
}

fn require_token(session: &SessionState, view: &str) -> Result<SecretString, ApiError> {
    session.token().ok_or_else(|| {
        warn!(view, "user admin requested without a session");
        ApiError::unauthorized("Please log in to continue")
    })
}

/// Lists one page of the user table.
pub async fn list_users<D: UserDirectory>(
    directory: &D,
    session: &SessionState,
    config: &ConfigState,
    args: ListUsersArgs,
) -> Result<UserListResponse, ApiError> {
    debug!(page = ?args.page, search = ?args.search, sort_by = ?args.sort_by, "list_users command");
    let token = require_token(session, "users")?;

    let mut query = UserQuery::page(args.page.unwrap_or(1), config.page_size);
    if let Some(search) = args.search {
        query = query.with_search(search);
    }
    if let Some(field) = args.sort_by {
        query = query.sorted_by(field, args.order.unwrap_or(SortOrder::Asc));
    }

    let page = directory.fetch_users(&query, Some(&token)).await?;
    Ok(page.into())
}

/// Adds a user. Every form field is required.
pub async fn add_user<D: UserDirectory>(
    directory: &D,
    session: &SessionState,
    draft: UserDraft,
) -> Result<User, ApiError> {
    debug!("add_user command");
    let token = require_token(session, "users")?;
    draft.validate()?;

    let user = directory.add_user(&draft, Some(&token)).await?;
    info!(user_id = user.id, "user added");
    Ok(user)
}

/// Edits the given fields of a user.
pub async fn edit_user<D: UserDirectory>(
    directory: &D,
    session: &SessionState,
    user_id: u64,
    patch: UserPatch,
) -> Result<User, ApiError> {
    debug!(user_id, "edit_user command");
    let token = require_token(session, "users")?;
    patch.validate()?;

    let user = directory.update_user(user_id, &patch, Some(&token)).await?;
    info!(user_id, "user edited");
    Ok(user)
}

pub async fn delete_user<D: UserDirectory>(
    directory: &D,
    session: &SessionState,
    user_id: u64,
) -> Result<User, ApiError> {
    debug!(user_id, "delete_user command");
    let token = require_token(session, "users")?;

    let user = directory.delete_user(user_id, Some(&token)).await?;
    info!(user_id, "user deleted");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use easyshop_catalog::{InMemoryCatalog, LoginSession};

    fn user(id: u64, first: &str, last: &str, age: u32) -> User {
        User {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@x.dummyjson.com", first.to_lowercase()),
            age,
            gender: "female".to_string(),
            birth_date: "1990-1-1".to_string(),
            role: "user".to_string(),
        }
    }

    fn directory() -> InMemoryCatalog {
        let users = (1..=12u64)
            .map(|i| user(i, &format!("User{:02}", i), "Doe", 20 + i as u32))
            .collect();
        InMemoryCatalog::default().with_directory(users)
    }

    fn logged_in() -> SessionState {
        let session = SessionState::new();
        session.begin(LoginSession {
            username: "emilys".to_string(),
            display_name: None,
            access_token: SecretString::from("t"),
        });
        session
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

    #[tokio::test]
    async fn test_user_admin_requires_login() {
        let directory = directory();
        let session = SessionState::new();

        let err = list_users(&directory, &session, &ConfigState::default(), ListUsersArgs::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        let err = add_user(&directory, &session, draft()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
        let err = delete_user(&directory, &session, 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        assert_eq!(directory.users().len(), 12);
    }

    #[tokio::test]
    async fn test_list_pages_and_sorts() {
        let directory = directory();
        let session = logged_in();

        let args = ListUsersArgs {
            page: Some(2),
            ..Default::default()
        };
        let response = list_users(&directory, &session, &ConfigState::default(), args)
            .await
            .unwrap();
        assert_eq!(response.total, 12);
        assert_eq!(response.total_pages, 2);
        assert_eq!(response.users.len(), 2);
        assert!(!response.has_next);

        let args = ListUsersArgs {
            sort_by: Some("age".to_string()),
            order: Some(SortOrder::Desc),
            ..Default::default()
        };
        let response = list_users(&directory, &session, &ConfigState::default(), args)
            .await
            .unwrap();
        assert_eq!(response.users[0].id, 12);

        let args = ListUsersArgs {
            search: Some("user07".to_string()),
            ..Default::default()
        };
        let response = list_users(&directory, &session, &ConfigState::default(), args)
            .await
            .unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.users[0].id, 7);
    }

    #[tokio::test]
    async fn test_add_edit_delete() {
        let directory = directory();
        let session = logged_in();

        let added = add_user(&directory, &session, draft()).await.unwrap();
        assert_eq!(added.id, 13);

        let patch = UserPatch {
            email: Some("ava@example.com".to_string()),
            ..UserPatch::default()
        };
        let edited = edit_user(&directory, &session, added.id, patch).await.unwrap();
        assert_eq!(edited.email, "ava@example.com");

        let removed = delete_user(&directory, &session, added.id).await.unwrap();
        assert_eq!(removed.id, 13);

        let err = delete_user(&directory, &session, added.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "User not found: 13");
    }

    #[tokio::test]
    async fn test_incomplete_form_is_a_validation_error() {
        let directory = directory();
        let session = logged_in();

        let err = add_user(&directory, &session, UserDraft { birth_date: String::new(), ..draft() })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = edit_user(&directory, &session, 1, UserPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(directory.users().len(), 12);
    }

    #[test]
    fn test_sort_header_cycle() {
        assert_eq!(next_sort_order(None), Some(SortOrder::Asc));
        assert_eq!(next_sort_order(Some(SortOrder::Asc)), Some(SortOrder::Desc));
        assert_eq!(next_sort_order(Some(SortOrder::Desc)), None);
    }
}
