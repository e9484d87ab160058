//! PostgreSQL-backed `MirrorRepository` implementation.
//!
//! Animals and organizations live in separate tables with identical shapes;
//! the `SavedKind` discriminant picks the table per call.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use super::models::{AnimalRow, NewAnimalRow, NewOrganizationRow, OrganizationRow};
use super::pool::{DbPool, PoolError};
use super::schema::{animals, organizations};
use crate::domain::catalog::{ExternalId, MirrorRecord, SavedKind};
use crate::domain::ports::mirror_repository::{MirrorPersistenceError, MirrorRepository};

/// Diesel-backed implementation of the `MirrorRepository` port.
#[derive(Clone)]
pub struct DieselMirrorRepository {
    pool: DbPool,
}

impl DieselMirrorRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MirrorPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            MirrorPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> MirrorPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(error = %error, "diesel operation failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            MirrorPersistenceError::connection("database connection error")
        }
        _ => MirrorPersistenceError::query("database error"),
    }
}

#[async_trait]
impl MirrorRepository for DieselMirrorRepository {
    async fn find(
        &self,
        kind: SavedKind,
        id: &ExternalId,
    ) -> Result<Option<MirrorRecord>, MirrorPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let record = match kind {
            SavedKind::Animal => animals::table
                .find(id.as_ref())
                .select(AnimalRow::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?
                .map(AnimalRow::into_domain),
            SavedKind::Organization => organizations::table
                .find(id.as_ref())
                .select(OrganizationRow::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?
                .map(OrganizationRow::into_domain),
        };
        record
            .transpose()
            .map_err(MirrorPersistenceError::query)
    }

    async fn insert(&self, record: &MirrorRecord) -> Result<(), MirrorPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Concurrent first-likes race on the same id; the loser's insert is a
        // silent no-op.
        match record.kind {
            SavedKind::Animal => {
                let row = NewAnimalRow {
                    id: record.id.as_ref(),
                    name: &record.name,
                    img_url: &record.image_url,
                    description: &record.blurb,
                };
                diesel::insert_into(animals::table)
                    .values(&row)
                    .on_conflict(animals::id)
                    .do_nothing()
                    .execute(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
            }
            SavedKind::Organization => {
                let row = NewOrganizationRow {
                    id: record.id.as_ref(),
                    name: &record.name,
                    img_url: &record.image_url,
                    mission_statement: &record.blurb,
                };
                diesel::insert_into(organizations::table)
                    .values(&row)
                    .on_conflict(organizations::id)
                    .do_nothing()
                    .execute(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
            }
        }
        Ok(())
    }
}
