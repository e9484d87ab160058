//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST endpoint and the schemas their bodies use.
//! The generated document backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::likes::LikeState;
use crate::domain::{
    CatalogAnimal, CatalogOrganization, Error, ErrorCode, MirrorRecord, PhotoSet, SavedKind, User,
};
use crate::inbound::http::catalog::{AnimalListResponse, OrganizationListResponse};
use crate::inbound::http::likes::ToggleResponse;
use crate::inbound::http::users::{LoginRequest, ProfileUpdateRequest, SignupRequest};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login or /signup.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Adopt-a-pet backend API",
        description = "Browse adoptable animals and rescue organizations and save favorites."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::show_user,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::users::delete_account,
        crate::inbound::http::users::liked_animals,
        crate::inbound::http::users::liked_organizations,
        crate::inbound::http::catalog::list_animals,
        crate::inbound::http::catalog::animal_details,
        crate::inbound::http::catalog::animal_types,
        crate::inbound::http::catalog::list_organizations,
        crate::inbound::http::catalog::organization_details,
        crate::inbound::http::likes::toggle_animal,
        crate::inbound::http::likes::toggle_organization,
    ),
    components(schemas(
        User,
        Error,
        ErrorCode,
        MirrorRecord,
        CatalogAnimal,
        CatalogOrganization,
        PhotoSet,
        SavedKind,
        LikeState,
        ToggleResponse,
        AnimalListResponse,
        OrganizationListResponse,
        SignupRequest,
        LoginRequest,
        ProfileUpdateRequest,
    )),
    tags(
        (name = "users", description = "Accounts, sessions, and saved-entity listings"),
        (name = "catalog", description = "Upstream catalog browsing"),
        (name = "likes", description = "Save/unsave toggles")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the OpenAPI document shape.
    use super::*;

    #[test]
    fn every_route_is_registered() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/signup",
            "/api/v1/login",
            "/api/v1/logout",
            "/api/v1/users/{id}",
            "/api/v1/users/profile",
            "/api/v1/users",
            "/api/v1/users/{id}/animals",
            "/api/v1/users/{id}/organizations",
            "/api/v1/animals",
            "/api/v1/animals/{id}",
            "/api/v1/animal-types",
            "/api/v1/organizations",
            "/api/v1/organizations/{id}",
            "/api/v1/animals/{id}/save",
            "/api/v1/organizations/{id}/save",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "OpenAPI document should register {path}"
            );
        }
    }

    #[test]
    fn error_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert!(schemas.keys().any(|name| name.ends_with("Error")));
    }
}
