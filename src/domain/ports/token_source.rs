//! Driven port for OAuth client-credentials token issuance.
//!
//! The adapter owns transport and credential details; the domain only asks
//! for a fresh bearer token. Expiry is computed by the token service, not the
//! adapter, because the local lifetime is a deliberate under-estimate of the
//! provider's TTL.

use async_trait::async_trait;

/// Errors raised by token source adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenSourceError {
    /// The token endpoint could not be reached or the request failed in transit.
    #[error("token endpoint unreachable: {message}")]
    Transport { message: String },

    /// The token endpoint answered, but not with a usable `access_token`.
    #[error("token endpoint returned a malformed payload: {message}")]
    MalformedPayload { message: String },
}

impl TokenSourceError {
    /// Create a transport error with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a malformed-payload error with the given message.
    pub fn malformed_payload(message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            message: message.into(),
        }
    }
}

/// A bearer token as issued upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
}

/// Port for acquiring client-credentials tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Request a brand new token from the OAuth endpoint.
    ///
    /// One attempt, no backoff: failures surface to the caller.
    async fn issue_token(&self) -> Result<IssuedToken, TokenSourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TokenSourceError::transport("connection refused"), "connection refused")]
    #[case(
        TokenSourceError::malformed_payload("missing access_token"),
        "missing access_token"
    )]
    fn errors_carry_their_message(#[case] error: TokenSourceError, #[case] needle: &str) {
        assert!(error.to_string().contains(needle));
    }
}
