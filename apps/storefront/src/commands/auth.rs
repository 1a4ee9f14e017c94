//! # Auth Commands
//!
//! Login opens the session (and its cart); logout closes both.

use easyshop_catalog::{Credentials, ProductSource};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::{SessionInfo, SessionState};

/// Logs in and opens a fresh session.
///
/// ## Behavior
/// - Username and password are trimmed and must be 2-12 characters
/// - A previous session (and its cart) is replaced
pub async fn login<S: ProductSource>(
    catalog: &S,
    session: &SessionState,
    username: &str,
    password: &str,
) -> Result<SessionInfo, ApiError> {
    debug!(username = %username.trim(), "login command");

    let credentials = Credentials::new(username, password)?;
    let login = catalog.login(&credentials).await.inspect_err(|_| {
        warn!(username = %credentials.username, "login failed");
    })?;

    let info = session.begin(login);
    info!(username = %info.username, "session started");
    Ok(info)
}

/// Ends the session. Outstanding cart handles stop working.
pub fn logout(session: &SessionState) -> bool {
    debug!("logout command");

    match session.end() {
        Some(username) => {
            info!(%username, "session ended");
            true
        }
        None => false,
    }
}

pub fn current_user(session: &SessionState) -> Option<SessionInfo> {
    session.current_user()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use easyshop_catalog::InMemoryCatalog;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::default().with_user("emilys", "emilyspass")
    }

    #[tokio::test]
    async fn test_login_and_logout() {
        let session = SessionState::new();

        let info = login(&catalog(), &session, " emilys ", "emilyspass").await.unwrap();
        assert_eq!(info.username, "emilys");
        assert_eq!(current_user(&session).map(|u| u.username), Some("emilys".to_string()));

        assert!(logout(&session));
        assert!(!logout(&session));
        assert!(current_user(&session).is_none());
    }

    #[tokio::test]
    async fn test_short_credentials_rejected_before_request() {
        let session = SessionState::new();
        let err = login(&catalog(), &session, "e", "emilyspass").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let session = SessionState::new();
        let err = login(&catalog(), &session, "emilys", "nope").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert!(!session.is_authenticated());
    }
}
