//! Driven port for user account persistence.

use async_trait::async_trait;

use crate::domain::user::{EmailAddress, User, UserId, Username};

/// Errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },

    /// A unique username/email constraint was violated.
    #[error("{field} is already taken")]
    DuplicateIdentity { field: String },
}

impl UserPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a duplicate-identity error naming the colliding field.
    pub fn duplicate_identity(field: impl Into<String>) -> Self {
        Self::DuplicateIdentity {
            field: field.into(),
        }
    }
}

/// New account row, password already hashed by the hasher port.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// A stored user together with its password hash, for verification.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Port for user account storage.
///
/// Deleting a user cascades to its like join rows at the storage layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// Unique violations on username or email surface as
    /// [`UserPersistenceError::DuplicateIdentity`].
    async fn create(&self, record: &NewUserRecord) -> Result<User, UserPersistenceError>;

    /// Fetch a user by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user and stored hash by username, for login verification.
    async fn find_credentials(
        &self,
        username: &Username,
    ) -> Result<Option<UserCredentials>, UserPersistenceError>;

    /// Fetch a user and stored hash by id, for profile-edit re-authentication.
    async fn credentials_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<UserCredentials>, UserPersistenceError>;

    /// Update username and email for an existing account.
    async fn update_profile(
        &self,
        id: &UserId,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<User, UserPersistenceError>;

    /// Delete an account; likes cascade.
    async fn delete(&self, id: &UserId) -> Result<(), UserPersistenceError>;
}
