//! bcrypt-backed password hasher adapter.
//!
//! Hashing runs on the blocking pool; bcrypt at the default cost takes long
//! enough to stall an async worker otherwise.

use async_trait::async_trait;

use crate::domain::ports::password_hasher::{PasswordHashError, PasswordHasher};

/// [`PasswordHasher`] implementation over the `bcrypt` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct BcryptHasher;

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError> {
        let plaintext = plaintext.to_owned();
        let digest = tokio::task::spawn_blocking(move || {
            bcrypt::hash(plaintext, bcrypt::DEFAULT_COST)
        })
        .await
        .map_err(|error| PasswordHashError::new(format!("hashing task failed: {error}")))?
        .map_err(|error| PasswordHashError::new(error.to_string()))?;
        Ok(digest)
    }

    async fn verify(&self, digest: &str, plaintext: &str) -> Result<bool, PasswordHashError> {
        let digest = digest.to_owned();
        let plaintext = plaintext.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &digest))
            .await
            .map_err(|error| PasswordHashError::new(format!("verify task failed: {error}")))?
            .map_err(|error| PasswordHashError::new(error.to_string()))
    }
}
