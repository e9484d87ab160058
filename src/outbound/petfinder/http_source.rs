//! Reqwest adapter implementing the token and catalog source ports.
//!
//! The adapter owns transport details only: request shaping, bearer headers,
//! and JSON decoding. Upstream HTTP status codes are deliberately not
//! inspected; outcome classification is driven by the presence of the
//! expected top-level key in the body, which is how the upstream actually
//! signals both empty results and bad tokens.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;
use zeroize::Zeroizing;

use super::dto::{AnimalDto, OrganizationDto, TokenPayloadDto, TypeDto};
use crate::domain::catalog::{
    AnimalSearch, CatalogAnimal, CatalogOrganization, ExternalId, OrganizationSearch,
    SEARCH_PAGE_LIMIT,
};
use crate::domain::ports::catalog_source::{CatalogSource, CatalogSourceError};
use crate::domain::ports::token_source::{IssuedToken, TokenSource, TokenSourceError};

/// Client-credentials pair for the upstream OAuth endpoint.
#[derive(Clone)]
pub struct PetfinderCredentials {
    pub client_id: String,
    pub client_secret: Zeroizing<String>,
}

impl PetfinderCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: Zeroizing::new(client_secret.into()),
        }
    }
}

/// HTTP adapter for the Petfinder-style API.
pub struct PetfinderHttpSource {
    client: Client,
    base_url: Url,
    credentials: PetfinderCredentials,
}

impl PetfinderHttpSource {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        credentials: PetfinderCredentials,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        // http(s) urls always have mutable path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            segments.extend(path.split('/'));
        }
        url
    }

    async fn get_body(
        &self,
        bearer: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, CatalogSourceError> {
        let response = self
            .client
            .get(self.endpoint(path))
            .bearer_auth(bearer)
            .query(query)
            .send()
            .await
            .map_err(map_transport_error)?;

        response
            .json::<Value>()
            .await
            .map_err(|error| CatalogSourceError::decode(error.to_string()))
    }
}

fn map_transport_error(error: reqwest::Error) -> CatalogSourceError {
    CatalogSourceError::transport(error.to_string())
}

/// Pull the expected top-level key out of the response body.
///
/// Absence of the key is the upstream's signal for both "no results" and
/// "bad token"; callers of the port disambiguate.
fn extract_key(mut body: Value, key: &str) -> Result<Value, CatalogSourceError> {
    body.as_object_mut()
        .and_then(|object| object.remove(key))
        .ok_or_else(|| CatalogSourceError::missing_key(key))
}

fn animal_query(search: &AnimalSearch) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("page", search.page.to_string()),
        ("limit", SEARCH_PAGE_LIMIT.to_string()),
    ];
    if let Some(animal_type) = &search.animal_type {
        query.push(("type", animal_type.clone()));
    }
    if let Some(name) = &search.name {
        query.push(("name", name.clone()));
    }
    if let Some(gender) = &search.gender {
        query.push(("gender", gender.clone()));
    }
    query
}

fn organization_query(search: &OrganizationSearch) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("page", search.page.to_string()),
        ("limit", SEARCH_PAGE_LIMIT.to_string()),
    ];
    if let Some(location) = &search.location {
        query.push(("location", location.clone()));
    }
    if let Some(state) = &search.state {
        query.push(("state", state.clone()));
    }
    query
}

#[async_trait]
impl TokenSource for PetfinderHttpSource {
    async fn issue_token(&self) -> Result<IssuedToken, TokenSourceError> {
        let response = self
            .client
            .post(self.endpoint("oauth2/token"))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|error| TokenSourceError::transport(error.to_string()))?;

        let payload: TokenPayloadDto = response
            .json()
            .await
            .map_err(|error| TokenSourceError::malformed_payload(error.to_string()))?;
        let access_token = payload
            .access_token
            .ok_or_else(|| TokenSourceError::malformed_payload("missing access_token"))?;
        Ok(IssuedToken { access_token })
    }
}

#[async_trait]
impl CatalogSource for PetfinderHttpSource {
    async fn search_animals(
        &self,
        bearer: &str,
        search: &AnimalSearch,
    ) -> Result<Vec<CatalogAnimal>, CatalogSourceError> {
        let body = self
            .get_body(bearer, "animals", &animal_query(search))
            .await?;
        let animals = extract_key(body, "animals")?;
        let dtos: Vec<AnimalDto> = serde_json::from_value(animals)
            .map_err(|error| CatalogSourceError::decode(error.to_string()))?;
        dtos.into_iter().map(AnimalDto::into_domain).collect()
    }

    async fn search_organizations(
        &self,
        bearer: &str,
        search: &OrganizationSearch,
    ) -> Result<Vec<CatalogOrganization>, CatalogSourceError> {
        let body = self
            .get_body(bearer, "organizations", &organization_query(search))
            .await?;
        let organizations = extract_key(body, "organizations")?;
        let dtos: Vec<OrganizationDto> = serde_json::from_value(organizations)
            .map_err(|error| CatalogSourceError::decode(error.to_string()))?;
        dtos.into_iter()
            .map(OrganizationDto::into_domain)
            .collect()
    }

    async fn animal_types(&self, bearer: &str) -> Result<Vec<String>, CatalogSourceError> {
        let body = self.get_body(bearer, "types", &[]).await?;
        let types = extract_key(body, "types")?;
        let dtos: Vec<TypeDto> = serde_json::from_value(types)
            .map_err(|error| CatalogSourceError::decode(error.to_string()))?;
        Ok(dtos.into_iter().map(|dto| dto.name).collect())
    }

    async fn fetch_animal(
        &self,
        bearer: &str,
        id: &ExternalId,
    ) -> Result<CatalogAnimal, CatalogSourceError> {
        let body = self
            .get_body(bearer, &format!("animals/{id}"), &[])
            .await?;
        let animal = extract_key(body, "animal")?;
        let dto: AnimalDto = serde_json::from_value(animal)
            .map_err(|error| CatalogSourceError::decode(error.to_string()))?;
        dto.into_domain()
    }

    async fn fetch_organization(
        &self,
        bearer: &str,
        id: &ExternalId,
    ) -> Result<CatalogOrganization, CatalogSourceError> {
        let body = self
            .get_body(bearer, &format!("organizations/{id}"), &[])
            .await?;
        let organization = extract_key(body, "organization")?;
        let dto: OrganizationDto = serde_json::from_value(organization)
            .map_err(|error| CatalogSourceError::decode(error.to_string()))?;
        dto.into_domain()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network request/response helpers.
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_key_returns_the_keyed_value() {
        let body = json!({ "animals": [ {"id": 1, "name": "Mys"} ], "pagination": {} });
        let animals = extract_key(body, "animals").expect("key present");
        assert!(animals.is_array());
    }

    #[test]
    fn extract_key_reports_the_missing_key_by_name() {
        let body = json!({ "title": "Access token invalid or expired" });
        let err = extract_key(body, "animals").expect_err("key absent");
        assert!(matches!(err, CatalogSourceError::MissingKey { ref key } if key == "animals"));
    }

    #[test]
    fn animal_query_always_pins_page_and_limit() {
        let query = animal_query(&AnimalSearch::page(2));
        assert!(query.contains(&("page", "2".to_owned())));
        assert!(query.contains(&("limit", "42".to_owned())));
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn animal_query_includes_only_set_filters() {
        let search = AnimalSearch {
            animal_type: Some("dog".to_owned()),
            gender: Some("female".to_owned()),
            ..AnimalSearch::page(1)
        };
        let query = animal_query(&search);
        assert!(query.contains(&("type", "dog".to_owned())));
        assert!(query.contains(&("gender", "female".to_owned())));
        assert!(!query.iter().any(|(key, _)| *key == "name"));
    }

    #[test]
    fn organization_query_passes_location_filters_through() {
        let search = OrganizationSearch {
            location: Some("Trenton, NJ".to_owned()),
            state: Some("NJ".to_owned()),
            ..OrganizationSearch::page(1)
        };
        let query = organization_query(&search);
        assert!(query.contains(&("location", "Trenton, NJ".to_owned())));
        assert!(query.contains(&("state", "NJ".to_owned())));
    }

    #[test]
    fn endpoint_joins_paths_regardless_of_base_trailing_slash() {
        let credentials = PetfinderCredentials::new("id", "secret");
        for base in ["https://api.example.org/v2", "https://api.example.org/v2/"] {
            let source = PetfinderHttpSource::new(
                Url::parse(base).expect("base url"),
                credentials.clone(),
                Duration::from_secs(10),
            )
            .expect("client builds");
            assert_eq!(
                source.endpoint("animals/70635244").as_str(),
                "https://api.example.org/v2/animals/70635244"
            );
            assert_eq!(
                source.endpoint("oauth2/token").as_str(),
                "https://api.example.org/v2/oauth2/token"
            );
        }
    }
}
