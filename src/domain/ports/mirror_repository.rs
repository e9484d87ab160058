//! Driven port for mirror-row persistence.

use async_trait::async_trait;

use crate::domain::catalog::{ExternalId, MirrorRecord, SavedKind};

/// Errors raised by mirror repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MirrorPersistenceError {
    /// Repository connection could not be established.
    #[error("mirror repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("mirror repository query failed: {message}")]
    Query { message: String },
}

impl MirrorPersistenceError {
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

/// Port for the write-once local snapshots of upstream entities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MirrorRepository: Send + Sync {
    /// Look up a snapshot by kind and upstream id.
    async fn find(
        &self,
        kind: SavedKind,
        id: &ExternalId,
    ) -> Result<Option<MirrorRecord>, MirrorPersistenceError>;

    /// Insert a snapshot.
    ///
    /// Concurrent first-likes can race on the same id, so an insert that
    /// collides with an existing row must succeed silently rather than fail.
    async fn insert(&self, record: &MirrorRecord) -> Result<(), MirrorPersistenceError>;
}
