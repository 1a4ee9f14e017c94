//! # Session State
//!
//! The authenticated session, and with it the cart's provisioning scope.
//!
//! ## Scope
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Lifetime                                     │
//! │                                                                         │
//! │   login ──► Session { user, token, CartStore } ──► logout              │
//! │                         │                              │                │
//! │                         │ cart()                       │ store dropped  │
//! │                         ▼                              ▼                │
//! │                    CartHandle ─────────────────► AccessOutsideScope    │
//! │                                                                         │
//! │   No session: cart() fails immediately with AccessOutsideScope.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A new login replaces the previous session, so every user starts with an
//! empty cart and stale handles from the previous session stop working.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use easyshop_catalog::LoginSession;
use easyshop_core::{CartHandle, CartStore, CoreError, CoreResult};
use secrecy::SecretString;
use serde::Serialize;

/// One logged-in user.
#[derive(Debug)]
struct Session {
    username: String,
    display_name: Option<String>,
    access_token: SecretString,
    started_at: DateTime<Utc>,
    cart: CartStore,
}

/// Public view of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub username: String,
    pub display_name: Option<String>,
    pub started_at: DateTime<Utc>,
}

/// Holds at most one authenticated session.
#[derive(Debug, Default)]
pub struct SessionState {
    inner: RwLock<Option<Session>>,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState::default()
    }

    /// Opens a session for `login` with a fresh, empty cart.
    pub fn begin(&self, login: LoginSession) -> SessionInfo {
        let session = Session {
            username: login.username,
            display_name: login.display_name,
            access_token: login.access_token,
            started_at: Utc::now(),
            cart: CartStore::new(),
        };
        let info = SessionInfo::from(&session);
        *self.write() = Some(session);
        info
    }

    /// Ends the session. Returns the user that was logged out, if any.
    pub fn end(&self) -> Option<String> {
        self.write().take().map(|session| session.username)
    }

    /// A handle to the session's cart.
    pub fn cart(&self) -> CoreResult<CartHandle> {
        self.read()
            .as_ref()
            .map(|session| session.cart.handle())
            .ok_or(CoreError::AccessOutsideScope)
    }

    /// The bearer token for catalog requests.
    pub fn token(&self) -> Option<SecretString> {
        self.read().as_ref().map(|session| session.access_token.clone())
    }

    pub fn current_user(&self) -> Option<SessionInfo> {
        self.read().as_ref().map(SessionInfo::from)
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<&Session> for SessionInfo {
    fn from(session: &Session) -> Self {
        SessionInfo {
            username: session.username.clone(),
            display_name: session.display_name.clone(),
            started_at: session.started_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easyshop_core::{Money, Product};
    use secrecy::ExposeSecret;

    fn login(username: &str) -> LoginSession {
        LoginSession {
            username: username.to_string(),
            display_name: Some("Emily".to_string()),
            access_token: SecretString::from("token-123"),
        }
    }

    #[test]
    fn test_no_session_means_no_cart() {
        let state = SessionState::new();
        assert!(!state.is_authenticated());
        assert!(matches!(state.cart(), Err(CoreError::AccessOutsideScope)));
        assert!(state.token().is_none());
        assert!(state.current_user().is_none());
    }

    #[test]
    fn test_begin_opens_scope() {
        let state = SessionState::new();
        let info = state.begin(login("emilys"));

        assert_eq!(info.username, "emilys");
        assert_eq!(state.current_user(), Some(info));
        assert_eq!(state.token().unwrap().expose_secret(), "token-123");

        let cart = state.cart().unwrap();
        cart.add_to_cart(&Product::new(1u64, "Mascara", Money::from_cents(999)))
            .unwrap();
        assert_eq!(state.cart().unwrap().snapshot().unwrap().item_count, 1);
    }

    #[test]
    fn test_end_invalidates_outstanding_handles() {
        let state = SessionState::new();
        state.begin(login("emilys"));
        let cart = state.cart().unwrap();

        assert_eq!(state.end().as_deref(), Some("emilys"));
        assert!(matches!(cart.snapshot(), Err(CoreError::AccessOutsideScope)));
        assert!(matches!(state.cart(), Err(CoreError::AccessOutsideScope)));
        assert_eq!(state.end(), None);
    }

    #[test]
    fn test_new_login_starts_with_empty_cart() {
        let state = SessionState::new();
        state.begin(login("emilys"));
        let old = state.cart().unwrap();
        old.add_to_cart(&Product::new(1u64, "Mascara", Money::from_cents(999)))
            .unwrap();

        state.begin(login("michaelw"));

        assert!(!old.is_in_scope());
        assert!(state.cart().unwrap().snapshot().unwrap().is_empty());
    }
}
