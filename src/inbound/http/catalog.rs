//! Catalog browsing API handlers.
//!
//! Every handler follows the same shape: load the session's token state,
//! hand it to the service as `&mut`, then persist it back before propagating
//! the service result. A token acquired on a failed request is kept that way.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    AnimalSearch, CatalogAnimal, CatalogOrganization, Error, ExternalId, OrganizationSearch,
    SavedKind,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Query parameters for `GET /api/v1/animals`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AnimalListQuery {
    pub page: Option<u32>,
    #[serde(rename = "type")]
    pub animal_type: Option<String>,
    pub name: Option<String>,
    pub gender: Option<String>,
}

impl From<AnimalListQuery> for AnimalSearch {
    fn from(query: AnimalListQuery) -> Self {
        Self {
            animal_type: query.animal_type,
            name: query.name,
            gender: query.gender,
            ..Self::page(query.page.unwrap_or(1))
        }
    }
}

/// Query parameters for `GET /api/v1/organizations`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationListQuery {
    pub page: Option<u32>,
    pub location: Option<String>,
    pub state: Option<String>,
}

impl From<OrganizationListQuery> for OrganizationSearch {
    fn from(query: OrganizationListQuery) -> Self {
        Self {
            location: query.location,
            state: query.state,
            ..Self::page(query.page.unwrap_or(1))
        }
    }
}

/// Animal listing plus the ids the signed-in user has saved, so a client can
/// render toggle state. `liked_ids` is empty for anonymous callers.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnimalListResponse {
    pub animals: Vec<CatalogAnimal>,
    #[schema(value_type = Vec<String>)]
    pub liked_ids: Vec<ExternalId>,
}

/// Organization listing plus the signed-in user's saved ids.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationListResponse {
    pub organizations: Vec<CatalogOrganization>,
    #[schema(value_type = Vec<String>)]
    pub liked_ids: Vec<ExternalId>,
}

fn parse_entity_id(raw: &str) -> Result<ExternalId, Error> {
    ExternalId::new(raw).map_err(|err| Error::invalid_request(err.to_string()))
}

async fn liked_ids_for(
    state: &HttpState,
    session: &SessionContext,
    kind: SavedKind,
) -> Result<Vec<ExternalId>, Error> {
    match session.user_id()? {
        Some(user) => state.likes.liked_ids(&user, kind).await,
        None => Ok(Vec::new()),
    }
}

/// List adoptable animals.
#[utoipa::path(
    get,
    path = "/api/v1/animals",
    params(AnimalListQuery),
    responses(
        (status = 200, description = "Animals", body = AnimalListResponse),
        (status = 404, description = "No animals matched", body = Error),
        (status = 502, description = "Catalog unreachable", body = Error),
        (status = 503, description = "Catalog authentication unavailable", body = Error)
    ),
    tags = ["catalog"],
    operation_id = "listAnimals",
    security([])
)]
#[get("/animals")]
pub async fn list_animals(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<AnimalListQuery>,
) -> ApiResult<web::Json<AnimalListResponse>> {
    let search = AnimalSearch::from(query.into_inner());
    let mut tokens = session.tokens();
    let result = state.catalog.search_animals(&mut tokens, &search).await;
    session.persist_tokens(&tokens)?;
    let animals = result?;
    let liked_ids = liked_ids_for(&state, &session, SavedKind::Animal).await?;
    Ok(web::Json(AnimalListResponse { animals, liked_ids }))
}

/// Fetch one animal's detail page payload.
#[utoipa::path(
    get,
    path = "/api/v1/animals/{id}",
    params(("id" = String, Path, description = "Upstream animal id")),
    responses(
        (status = 200, description = "Animal", body = CatalogAnimal),
        (status = 400, description = "Invalid id", body = Error),
        (status = 502, description = "Catalog unreachable", body = Error),
        (status = 503, description = "Session timed out upstream", body = Error)
    ),
    tags = ["catalog"],
    operation_id = "animalDetails",
    security([])
)]
#[get("/animals/{id}")]
pub async fn animal_details(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<CatalogAnimal>> {
    let id = parse_entity_id(&path)?;
    let mut tokens = session.tokens();
    let result = state.catalog.animal_details(&mut tokens, &id).await;
    session.persist_tokens(&tokens)?;
    Ok(web::Json(result?))
}

/// List the animal type names used by the search filters.
#[utoipa::path(
    get,
    path = "/api/v1/animal-types",
    responses(
        (status = 200, description = "Type names", body = [String]),
        (status = 502, description = "Catalog unreachable", body = Error),
        (status = 503, description = "Session timed out upstream", body = Error)
    ),
    tags = ["catalog"],
    operation_id = "animalTypes",
    security([])
)]
#[get("/animal-types")]
pub async fn animal_types(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<String>>> {
    let mut tokens = session.tokens();
    let result = state.catalog.animal_types(&mut tokens).await;
    session.persist_tokens(&tokens)?;
    Ok(web::Json(result?))
}

/// List rescue organizations.
#[utoipa::path(
    get,
    path = "/api/v1/organizations",
    params(OrganizationListQuery),
    responses(
        (status = 200, description = "Organizations", body = OrganizationListResponse),
        (status = 404, description = "No organizations matched", body = Error),
        (status = 502, description = "Catalog unreachable", body = Error),
        (status = 503, description = "Catalog authentication unavailable", body = Error)
    ),
    tags = ["catalog"],
    operation_id = "listOrganizations",
    security([])
)]
#[get("/organizations")]
pub async fn list_organizations(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<OrganizationListQuery>,
) -> ApiResult<web::Json<OrganizationListResponse>> {
    let search = OrganizationSearch::from(query.into_inner());
    let mut tokens = session.tokens();
    let result = state.catalog.search_organizations(&mut tokens, &search).await;
    session.persist_tokens(&tokens)?;
    let organizations = result?;
    let liked_ids = liked_ids_for(&state, &session, SavedKind::Organization).await?;
    Ok(web::Json(OrganizationListResponse {
        organizations,
        liked_ids,
    }))
}

/// Fetch one organization's detail page payload.
#[utoipa::path(
    get,
    path = "/api/v1/organizations/{id}",
    params(("id" = String, Path, description = "Upstream organization id")),
    responses(
        (status = 200, description = "Organization", body = CatalogOrganization),
        (status = 400, description = "Invalid id", body = Error),
        (status = 502, description = "Catalog unreachable", body = Error),
        (status = 503, description = "Session timed out upstream", body = Error)
    ),
    tags = ["catalog"],
    operation_id = "organizationDetails",
    security([])
)]
#[get("/organizations/{id}")]
pub async fn organization_details(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<CatalogOrganization>> {
    let id = parse_entity_id(&path)?;
    let mut tokens = session.tokens();
    let result = state.catalog.organization_details(&mut tokens, &id).await;
    session.persist_tokens(&tokens)?;
    Ok(web::Json(result?))
}
