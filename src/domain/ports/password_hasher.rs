//! Driven port for password hashing.
//!
//! The domain never sees the hashing primitive; it hands plaintext to this
//! port and stores whatever digest comes back.

use async_trait::async_trait;

/// Errors raised by password hasher adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {message}")]
pub struct PasswordHashError {
    message: String,
}

impl PasswordHashError {
    /// Create a hashing error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Port wrapping a standard password hashing library.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a storable digest.
    async fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError>;

    /// Verify a plaintext password against a stored digest.
    async fn verify(&self, digest: &str, plaintext: &str) -> Result<bool, PasswordHashError>;
}

/// Fixture hasher for tests that are not about password verification.
///
/// "Hashes" by prefixing, so assertions can relate digests to inputs.
#[cfg(test)]
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

#[cfg(test)]
const FIXTURE_PREFIX: &str = "hashed:";

#[cfg(test)]
#[async_trait]
impl PasswordHasher for FixturePasswordHasher {
    async fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError> {
        Ok(format!("{FIXTURE_PREFIX}{plaintext}"))
    }

    async fn verify(&self, digest: &str, plaintext: &str) -> Result<bool, PasswordHashError> {
        Ok(digest == format!("{FIXTURE_PREFIX}{plaintext}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_hasher_round_trips() {
        let hasher = FixturePasswordHasher;
        let digest = hasher.hash("secret").await.expect("hash succeeds");
        assert!(hasher
            .verify(&digest, "secret")
            .await
            .expect("verify succeeds"));
        assert!(!hasher
            .verify(&digest, "other")
            .await
            .expect("verify succeeds"));
    }
}
