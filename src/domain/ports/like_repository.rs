//! Driven port for the user-likes join rows.

use async_trait::async_trait;

use crate::domain::catalog::{ExternalId, MirrorRecord, SavedKind};
use crate::domain::user::UserId;

/// Errors raised by like repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LikePersistenceError {
    /// Repository connection could not be established.
    #[error("like repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("like repository query failed: {message}")]
    Query { message: String },
}

impl LikePersistenceError {
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
}

/// Port for the `(user, entity)` membership rows.
///
/// A given pair appears at most once; the storage layer backs this with a
/// unique index and the toggle service enforces it behaviourally.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Whether the user currently likes this entity.
    async fn exists(
        &self,
        user: &UserId,
        kind: SavedKind,
        id: &ExternalId,
    ) -> Result<bool, LikePersistenceError>;

    /// Record a like. Inserting an already-present pair must succeed silently.
    async fn insert(
        &self,
        user: &UserId,
        kind: SavedKind,
        id: &ExternalId,
    ) -> Result<(), LikePersistenceError>;

    /// Remove a like. Removing an absent pair is not an error.
    async fn remove(
        &self,
        user: &UserId,
        kind: SavedKind,
        id: &ExternalId,
    ) -> Result<(), LikePersistenceError>;

    /// Upstream ids of everything this user likes, for listing pages.
    async fn liked_ids(
        &self,
        user: &UserId,
        kind: SavedKind,
    ) -> Result<Vec<ExternalId>, LikePersistenceError>;

    /// Mirror snapshots of everything this user likes, for profile pages.
    async fn liked_records(
        &self,
        user: &UserId,
        kind: SavedKind,
    ) -> Result<Vec<MirrorRecord>, LikePersistenceError>;
}
