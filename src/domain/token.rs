//! Session-owned OAuth token state.
//!
//! The token never lives in a process-global cache: each session carries its
//! own [`SessionTokens`] value (serialized into the session cookie) and the
//! token service mutates it in place. This keeps multi-session behaviour and
//! tests straightforward.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Minutes a freshly issued token is considered valid locally.
///
/// A conservative under-estimate of the provider's 60-minute TTL so the app
/// refreshes before the upstream token actually expires.
pub const TOKEN_LIFETIME_MINUTES: i64 = 50;

/// Local lifetime applied to every issued token.
pub fn token_lifetime() -> Duration {
    Duration::minutes(TOKEN_LIFETIME_MINUTES)
}

/// A bearer token with its locally computed expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenState {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl TokenState {
    /// Record a freshly issued token, stamping `issued_at + lifetime`.
    pub fn issued(access_token: String, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        Self {
            access_token,
            expires_at: issued_at + lifetime,
        }
    }

    /// Bearer token string for the Authorization header.
    pub fn access_token(&self) -> &str {
        self.access_token.as_str()
    }

    /// Locally computed expiry.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the stored expiry has passed at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// The per-session token slot, empty until the first upstream call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokens {
    current: Option<TokenState>,
}

impl SessionTokens {
    /// An empty slot; the first upstream call will acquire a token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current token state, if any was acquired this session.
    pub fn current(&self) -> Option<&TokenState> {
        self.current.as_ref()
    }

    /// Replace the stored token wholesale.
    pub fn replace(&mut self, state: TokenState) {
        self.current = Some(state);
    }

    /// Drop the stored token, forcing a refresh on the next upstream call.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
