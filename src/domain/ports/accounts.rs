//! Driving port for account use-cases.
//!
//! Inbound adapters call this to sign users up, authenticate them, and manage
//! profiles without knowing the backing repository or hashing scheme. The
//! caller's identity is always an explicit parameter; resolving it from the
//! transport (session cookie) is the adapter's job.

use async_trait::async_trait;

use crate::domain::auth::{LoginCredentials, ProfileUpdate, SignupDetails};
use crate::domain::error::Error;
use crate::domain::user::{User, UserId};

/// Domain use-case port for account management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Accounts: Send + Sync {
    /// Create an account and return the new user.
    async fn sign_up(&self, details: &SignupDetails) -> Result<User, Error>;

    /// Validate credentials and return the authenticated user.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Fetch a user's public profile.
    async fn fetch(&self, id: &UserId) -> Result<User, Error>;

    /// Apply a profile edit after re-verifying the current password.
    async fn update_profile(&self, id: &UserId, update: &ProfileUpdate) -> Result<User, Error>;

    /// Delete the account; likes cascade.
    async fn delete_account(&self, id: &UserId) -> Result<(), Error>;
}
