//! Save/unsave toggle over the mirror and like repositories.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::catalog::{ExternalId, MirrorRecord, SavedKind};
use crate::domain::error::Error;
use crate::domain::mirror_service::MirrorService;
use crate::domain::ports::catalog_source::CatalogSource;
use crate::domain::ports::like_repository::{LikePersistenceError, LikeRepository};
use crate::domain::ports::likes::{LikeState, Likes};
use crate::domain::ports::mirror_repository::MirrorRepository;
use crate::domain::ports::token_source::TokenSource;
use crate::domain::token::SessionTokens;
use crate::domain::user::UserId;

/// Implements [`Likes`] with first-like mirroring.
#[derive(Debug)]
pub struct LikeService<T, C, M, L> {
    mirror: MirrorService<T, C, M>,
    likes: Arc<L>,
}

fn storage_failure(error: &LikePersistenceError) -> Error {
    tracing::error!(%error, "like storage failed");
    Error::internal("like storage failed")
}

impl<T, C, M, L> LikeService<T, C, M, L>
where
    T: TokenSource,
    C: CatalogSource,
    M: MirrorRepository,
    L: LikeRepository,
{
    pub fn new(mirror: MirrorService<T, C, M>, likes: Arc<L>) -> Self {
        Self { mirror, likes }
    }
}

#[async_trait]
impl<T, C, M, L> Likes for LikeService<T, C, M, L>
where
    T: TokenSource + 'static,
    C: CatalogSource + 'static,
    M: MirrorRepository + 'static,
    L: LikeRepository + 'static,
{
    /// Flip `(user, entity)` membership.
    ///
    /// An existing membership row is removed. Otherwise the entity is
    /// mirrored locally first (a no-op when already mirrored) and the
    /// membership row inserted; a failed mirror fetch aborts before any
    /// write, leaving both tables untouched.
    async fn toggle(
        &self,
        tokens: &mut SessionTokens,
        user: &UserId,
        kind: SavedKind,
        id: &ExternalId,
    ) -> Result<LikeState, Error> {
        let already_liked = self
            .likes
            .exists(user, kind, id)
            .await
            .map_err(|error| storage_failure(&error))?;

        if already_liked {
            self.likes
                .remove(user, kind, id)
                .await
                .map_err(|error| storage_failure(&error))?;
            tracing::debug!(%user, %kind, %id, "like removed");
            return Ok(LikeState::Unliked);
        }

        let mirrored = self.mirror.ensure_local(tokens, kind, id).await?;
        self.likes
            .insert(user, kind, id)
            .await
            .map_err(|error| storage_failure(&error))?;
        tracing::debug!(
            %user,
            %kind,
            %id,
            newly_mirrored = mirrored.newly_mirrored,
            "like recorded"
        );
        Ok(LikeState::Liked)
    }

    async fn liked(&self, user: &UserId, kind: SavedKind) -> Result<Vec<MirrorRecord>, Error> {
        self.likes
            .liked_records(user, kind)
            .await
            .map_err(|error| storage_failure(&error))
    }

    async fn liked_ids(&self, user: &UserId, kind: SavedKind) -> Result<Vec<ExternalId>, Error> {
        self.likes
            .liked_ids(user, kind)
            .await
            .map_err(|error| storage_failure(&error))
    }
}
