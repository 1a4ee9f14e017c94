//! # State Module
//!
//! Manages storefront state.
//!
//! Instead of one `AppState` struct, each concern has its own state type
//! and commands take only the state they need.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Storefront                                 │   │
//! │  │  config, session, catalog                                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐          │
//! │  │ ConfigState  │  │  SessionState    │  │  ProductSource   │          │
//! │  │              │  │                  │  │                  │          │
//! │  │  API URL     │  │  user, token     │  │  CatalogClient   │          │
//! │  │  page size   │  │  CartStore       │  │  (or in-memory   │          │
//! │  │  tax, ship   │  │                  │  │   for tests)     │          │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • ConfigState: Read-only after initialization                         │
//! │  • SessionState: RwLock around the session; the cart has its own Mutex │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{ConfigError, ConfigState, DEFAULT_API_BASE_URL};
pub use session::{SessionInfo, SessionState};
