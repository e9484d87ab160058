//! Lazy get-or-create mirroring of upstream entities.
//!
//! A mirror row is written the first time anything needs the entity locally
//! and never refreshed afterwards. A local hit therefore answers without a
//! token or a network round trip.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::catalog::{ExternalId, MirrorRecord, SavedKind};
use crate::domain::error::Error;
use crate::domain::ports::catalog_source::CatalogSource;
use crate::domain::ports::mirror_repository::{MirrorPersistenceError, MirrorRepository};
use crate::domain::ports::token_source::TokenSource;
use crate::domain::token::SessionTokens;
use crate::domain::token_service::TokenService;

/// A mirror row plus whether this call created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirroredEntity {
    pub record: MirrorRecord,
    pub newly_mirrored: bool,
}

/// Get-or-create access to the local mirror tables.
#[derive(Debug)]
pub struct MirrorService<T, C, M> {
    tokens: TokenService<T>,
    source: Arc<C>,
    repository: Arc<M>,
}

fn storage_failure(error: &MirrorPersistenceError) -> Error {
    tracing::error!(%error, "mirror storage failed");
    Error::internal("mirror storage failed")
}

impl<T, C, M> MirrorService<T, C, M>
where
    T: TokenSource,
    C: CatalogSource,
    M: MirrorRepository,
{
    pub fn new(tokens: TokenService<T>, source: Arc<C>, repository: Arc<M>) -> Self {
        Self {
            tokens,
            source,
            repository,
        }
    }

    /// Return the local snapshot for `(kind, id)`, fetching it upstream on a
    /// miss.
    ///
    /// Any upstream failure on the miss path, including a missing response
    /// key, is a `FetchFailed`: nothing has been written yet, so the caller
    /// can simply retry later.
    pub async fn ensure_local(
        &self,
        tokens: &mut SessionTokens,
        kind: SavedKind,
        id: &ExternalId,
    ) -> Result<MirroredEntity, Error> {
        if let Some(record) = self
            .repository
            .find(kind, id)
            .await
            .map_err(|error| storage_failure(&error))?
        {
            return Ok(MirroredEntity {
                record,
                newly_mirrored: false,
            });
        }

        let bearer = self.tokens.ensure_valid(tokens, Utc::now()).await?;
        let record = match kind {
            SavedKind::Animal => self
                .source
                .fetch_animal(&bearer, id)
                .await
                .map(|animal| MirrorRecord::from_animal(&animal)),
            SavedKind::Organization => self
                .source
                .fetch_organization(&bearer, id)
                .await
                .map(|org| MirrorRecord::from_organization(&org)),
        }
        .map_err(|error| {
            tracing::warn!(%error, %kind, %id, "mirror fetch failed");
            Error::fetch_failed(format!("could not fetch {kind} {id}"))
        })?;

        // Tolerates a concurrent first-like inserting the same row.
        self.repository
            .insert(&record)
            .await
            .map_err(|error| storage_failure(&error))?;

        Ok(MirroredEntity {
            record,
            newly_mirrored: true,
        })
    }
}
