//! Driving port for the save/unsave toggle and saved-entity listings.

use async_trait::async_trait;

use crate::domain::catalog::{ExternalId, MirrorRecord, SavedKind};
use crate::domain::error::Error;
use crate::domain::token::SessionTokens;
use crate::domain::user::UserId;
use serde::Serialize;
use utoipa::ToSchema;

/// Outcome of a toggle: the membership state after the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LikeState {
    /// The entity is now in the user's saved set.
    Liked,
    /// The entity is no longer in the user's saved set.
    Unliked,
}

/// Domain use-case port for saving catalog entities against a user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Likes: Send + Sync {
    /// Flip membership of `(user, entity)` and return the resulting state.
    ///
    /// A first-ever like mirrors the entity locally before recording the
    /// membership row; that fetch is the only path that needs the tokens.
    async fn toggle(
        &self,
        tokens: &mut SessionTokens,
        user: &UserId,
        kind: SavedKind,
        id: &ExternalId,
    ) -> Result<LikeState, Error>;

    /// Mirror snapshots of everything the user has saved, for profile pages.
    async fn liked(&self, user: &UserId, kind: SavedKind) -> Result<Vec<MirrorRecord>, Error>;

    /// Upstream ids the user has saved, so listings can flag saved cards.
    async fn liked_ids(&self, user: &UserId, kind: SavedKind) -> Result<Vec<ExternalId>, Error>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;

    #[test]
    fn like_state_serialises_lowercase() {
        let liked = serde_json::to_string(&LikeState::Liked).expect("serialises");
        let unliked = serde_json::to_string(&LikeState::Unliked).expect("serialises");
        assert_eq!(liked, "\"liked\"");
        assert_eq!(unliked, "\"unliked\"");
    }
}
