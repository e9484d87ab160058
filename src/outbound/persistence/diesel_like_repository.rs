//! PostgreSQL-backed `LikeRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use super::models::{AnimalRow, NewAnimalLikeRow, NewOrgLikeRow, OrganizationRow};
use super::pool::{DbPool, PoolError};
use super::schema::{animal_likes, animals, org_likes, organizations};
use crate::domain::catalog::{ExternalId, MirrorRecord, SavedKind};
use crate::domain::ports::like_repository::{LikePersistenceError, LikeRepository};
use crate::domain::user::UserId;

/// Diesel-backed implementation of the `LikeRepository` port.
#[derive(Clone)]
pub struct DieselLikeRepository {
    pool: DbPool,
}

impl DieselLikeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> LikePersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            LikePersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> LikePersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    debug!(error = %error, "diesel operation failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            LikePersistenceError::connection("database connection error")
        }
        _ => LikePersistenceError::query("database error"),
    }
}

fn ids_to_domain(raw: Vec<String>) -> Result<Vec<ExternalId>, LikePersistenceError> {
    raw.into_iter()
        .map(|id| {
            ExternalId::new(&id)
                .map_err(|err| LikePersistenceError::query(format!("stored like id invalid: {err}")))
        })
        .collect()
}

#[async_trait]
impl LikeRepository for DieselLikeRepository {
    async fn exists(
        &self,
        user: &UserId,
        kind: SavedKind,
        id: &ExternalId,
    ) -> Result<bool, LikePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let present = match kind {
            SavedKind::Animal => {
                diesel::select(diesel::dsl::exists(
                    animal_likes::table
                        .filter(animal_likes::user_id.eq(user.as_uuid()))
                        .filter(animal_likes::animal_id.eq(id.as_ref())),
                ))
                .get_result::<bool>(&mut conn)
                .await
            }
            SavedKind::Organization => {
                diesel::select(diesel::dsl::exists(
                    org_likes::table
                        .filter(org_likes::user_id.eq(user.as_uuid()))
                        .filter(org_likes::org_id.eq(id.as_ref())),
                ))
                .get_result::<bool>(&mut conn)
                .await
            }
        };
        present.map_err(map_diesel_error)
    }

    async fn insert(
        &self,
        user: &UserId,
        kind: SavedKind,
        id: &ExternalId,
    ) -> Result<(), LikePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // A pair appears at most once; the unique index absorbs races.
        match kind {
            SavedKind::Animal => {
                let row = NewAnimalLikeRow {
                    user_id: *user.as_uuid(),
                    animal_id: id.as_ref(),
                };
                diesel::insert_into(animal_likes::table)
                    .values(&row)
                    .on_conflict((animal_likes::user_id, animal_likes::animal_id))
                    .do_nothing()
                    .execute(&mut conn)
                    .await
            }
            SavedKind::Organization => {
                let row = NewOrgLikeRow {
                    user_id: *user.as_uuid(),
                    org_id: id.as_ref(),
                };
                diesel::insert_into(org_likes::table)
                    .values(&row)
                    .on_conflict((org_likes::user_id, org_likes::org_id))
                    .do_nothing()
                    .execute(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn remove(
        &self,
        user: &UserId,
        kind: SavedKind,
        id: &ExternalId,
    ) -> Result<(), LikePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        match kind {
            SavedKind::Animal => {
                diesel::delete(
                    animal_likes::table
                        .filter(animal_likes::user_id.eq(user.as_uuid()))
                        .filter(animal_likes::animal_id.eq(id.as_ref())),
                )
                .execute(&mut conn)
                .await
            }
            SavedKind::Organization => {
                diesel::delete(
                    org_likes::table
                        .filter(org_likes::user_id.eq(user.as_uuid()))
                        .filter(org_likes::org_id.eq(id.as_ref())),
                )
                .execute(&mut conn)
                .await
            }
        }
        .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn liked_ids(
        &self,
        user: &UserId,
        kind: SavedKind,
    ) -> Result<Vec<ExternalId>, LikePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let raw: Vec<String> = match kind {
            SavedKind::Animal => {
                animal_likes::table
                    .filter(animal_likes::user_id.eq(user.as_uuid()))
                    .select(animal_likes::animal_id)
                    .load(&mut conn)
                    .await
            }
            SavedKind::Organization => {
                org_likes::table
                    .filter(org_likes::user_id.eq(user.as_uuid()))
                    .select(org_likes::org_id)
                    .load(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;
        ids_to_domain(raw)
    }

    async fn liked_records(
        &self,
        user: &UserId,
        kind: SavedKind,
    ) -> Result<Vec<MirrorRecord>, LikePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        match kind {
            SavedKind::Animal => {
                let rows: Vec<AnimalRow> = animal_likes::table
                    .inner_join(animals::table)
                    .filter(animal_likes::user_id.eq(user.as_uuid()))
                    .select(AnimalRow::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                rows.into_iter()
                    .map(|row| row.into_domain().map_err(LikePersistenceError::query))
                    .collect()
            }
            SavedKind::Organization => {
                let rows: Vec<OrganizationRow> = org_likes::table
                    .inner_join(organizations::table)
                    .filter(org_likes::user_id.eq(user.as_uuid()))
                    .select(OrganizationRow::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                rows.into_iter()
                    .map(|row| row.into_domain().map_err(LikePersistenceError::query))
                    .collect()
            }
        }
    }
}
