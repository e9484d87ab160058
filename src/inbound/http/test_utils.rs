//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;

use crate::domain::ports::{MockAccounts, MockCatalogBrowse, MockLikes};
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// State bundle with strict mocks; tests set expectations per port.
pub fn state_with(
    accounts: MockAccounts,
    catalog: MockCatalogBrowse,
    likes: MockLikes,
) -> HttpState {
    HttpState::new(Arc::new(accounts), Arc::new(catalog), Arc::new(likes))
}

/// State bundle where every port panics if touched.
pub fn untouched_state() -> HttpState {
    state_with(
        MockAccounts::new(),
        MockCatalogBrowse::new(),
        MockLikes::new(),
    )
}
