//! Client-credentials token lifecycle.
//!
//! One reactive policy: reuse the stored token while its local expiry holds,
//! otherwise ask the source for a fresh one. There is no proactive refresh
//! and no retry; an issuance failure surfaces immediately as
//! `AuthUnavailable`.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::domain::error::Error;
use crate::domain::ports::token_source::TokenSource;
use crate::domain::token::{token_lifetime, SessionTokens, TokenState};

/// Manages the per-session bearer token through a [`TokenSource`].
#[derive(Debug)]
pub struct TokenService<S> {
    source: Arc<S>,
    lifetime: Duration,
}

impl<S> Clone for TokenService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            lifetime: self.lifetime,
        }
    }
}

impl<S> TokenService<S>
where
    S: TokenSource,
{
    /// Build a service with the standard local token lifetime.
    pub fn new(source: Arc<S>) -> Self {
        Self::with_lifetime(source, token_lifetime())
    }

    /// Build a service with an explicit lifetime, for tests.
    pub fn with_lifetime(source: Arc<S>, lifetime: Duration) -> Self {
        Self { source, lifetime }
    }

    /// Return a bearer token valid at `now`, issuing a fresh one if needed.
    ///
    /// A stored, unexpired token is returned without touching the source.
    /// On issuance failure the stored state is left as-is so the next call
    /// retries.
    pub async fn ensure_valid(
        &self,
        tokens: &mut SessionTokens,
        now: DateTime<Utc>,
    ) -> Result<String, Error> {
        if let Some(state) = tokens.current() {
            if !state.is_expired(now) {
                return Ok(state.access_token().to_owned());
            }
            tracing::debug!(expires_at = %state.expires_at(), "stored token expired, refreshing");
        }

        let issued = self.source.issue_token().await.map_err(|error| {
            tracing::warn!(%error, "token issuance failed");
            Error::auth_unavailable("pet catalog authentication is unavailable")
        })?;
        let state = TokenState::issued(issued.access_token, now, self.lifetime);
        let bearer = state.access_token().to_owned();
        tokens.replace(state);
        Ok(bearer)
    }
}
