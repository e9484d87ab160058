//! Save/unsave toggle handlers.

use actix_web::{post, web};
use serde::Serialize;

use crate::domain::ports::LikeState;
use crate::domain::{Error, ExternalId, SavedKind};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Toggle outcome body.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub state: LikeState,
}

async fn toggle(
    state: &HttpState,
    session: &SessionContext,
    kind: SavedKind,
    raw_id: &str,
) -> Result<ToggleResponse, Error> {
    // Authentication is checked before anything touches storage.
    let user = session.require_user_id()?;
    let id = ExternalId::new(raw_id).map_err(|err| Error::invalid_request(err.to_string()))?;
    let mut tokens = session.tokens();
    let result = state.likes.toggle(&mut tokens, &user, kind, &id).await;
    session.persist_tokens(&tokens)?;
    Ok(ToggleResponse { state: result? })
}

/// Save or unsave an animal for the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/animals/{id}/save",
    params(("id" = String, Path, description = "Upstream animal id")),
    responses(
        (status = 200, description = "Toggle outcome", body = ToggleResponse),
        (status = 400, description = "Invalid id", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 502, description = "Mirror fetch failed", body = Error),
        (status = 503, description = "Catalog authentication unavailable", body = Error)
    ),
    tags = ["likes"],
    operation_id = "toggleAnimal"
)]
#[post("/animals/{id}/save")]
pub async fn toggle_animal(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ToggleResponse>> {
    let response = toggle(&state, &session, SavedKind::Animal, &path).await?;
    Ok(web::Json(response))
}

/// Save or unsave an organization for the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/organizations/{id}/save",
    params(("id" = String, Path, description = "Upstream organization id")),
    responses(
        (status = 200, description = "Toggle outcome", body = ToggleResponse),
        (status = 400, description = "Invalid id", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 502, description = "Mirror fetch failed", body = Error),
        (status = 503, description = "Catalog authentication unavailable", body = Error)
    ),
    tags = ["likes"],
    operation_id = "toggleOrganization"
)]
#[post("/organizations/{id}/save")]
pub async fn toggle_organization(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ToggleResponse>> {
    let response = toggle(&state, &session, SavedKind::Organization, &path).await?;
    Ok(web::Json(response))
}
