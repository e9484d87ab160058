//! Account management use-cases.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::auth::{LoginCredentials, ProfileUpdate, SignupDetails};
use crate::domain::error::Error;
use crate::domain::ports::accounts::Accounts;
use crate::domain::ports::password_hasher::{PasswordHashError, PasswordHasher};
use crate::domain::ports::user_repository::{
    NewUserRecord, UserPersistenceError, UserRepository,
};
use crate::domain::user::{User, UserId, Username};

/// Implements [`Accounts`] over a repository and a password hasher.
#[derive(Debug)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

fn storage_failure(error: &UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateIdentity { field } => {
            Error::duplicate_identity(format!("{field} is already taken"))
        }
        other => {
            tracing::error!(error = %other, "user storage failed");
            Error::internal("user storage failed")
        }
    }
}

fn hasher_failure(error: &PasswordHashError) -> Error {
    tracing::error!(%error, "password hashing failed");
    Error::internal("password hashing failed")
}

impl<U, H> AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<U, H> Accounts for AccountService<U, H>
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn sign_up(&self, details: &SignupDetails) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(details.password())
            .await
            .map_err(|error| hasher_failure(&error))?;
        let record = NewUserRecord {
            id: UserId::random(),
            username: details.username().clone(),
            email: details.email().clone(),
            password_hash,
        };
        let user = self
            .users
            .create(&record)
            .await
            .map_err(|error| storage_failure(&error))?;
        tracing::info!(user = %user.id(), "account created");
        Ok(user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        // Login usernames follow the same shape as signup; anything else
        // cannot name an account, so it fails exactly like a wrong password.
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(Error::unauthenticated("invalid credentials"));
        };
        let Some(found) = self
            .users
            .find_credentials(&username)
            .await
            .map_err(|error| storage_failure(&error))?
        else {
            return Err(Error::unauthenticated("invalid credentials"));
        };

        let verified = self
            .hasher
            .verify(&found.password_hash, credentials.password())
            .await
            .map_err(|error| hasher_failure(&error))?;
        if !verified {
            return Err(Error::unauthenticated("invalid credentials"));
        }
        tracing::info!(user = %found.user.id(), "login succeeded");
        Ok(found.user)
    }

    async fn fetch(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(|error| storage_failure(&error))?
            .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn update_profile(&self, id: &UserId, update: &ProfileUpdate) -> Result<User, Error> {
        let Some(found) = self
            .users
            .credentials_by_id(id)
            .await
            .map_err(|error| storage_failure(&error))?
        else {
            return Err(Error::not_found("user not found"));
        };

        let verified = self
            .hasher
            .verify(&found.password_hash, update.current_password())
            .await
            .map_err(|error| hasher_failure(&error))?;
        if !verified {
            return Err(Error::unauthenticated("invalid credentials"));
        }

        self.users
            .update_profile(id, update.username(), update.email())
            .await
            .map_err(|error| storage_failure(&error))
    }

    async fn delete_account(&self, id: &UserId) -> Result<(), Error> {
        self.users
            .delete(id)
            .await
            .map_err(|error| storage_failure(&error))?;
        tracing::info!(user = %id, "account deleted");
        Ok(())
    }
}
