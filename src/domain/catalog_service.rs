//! Catalog browsing use-cases over the upstream source.
//!
//! The upstream omits the expected top-level key both when a search matches
//! nothing and when the bearer token has gone bad. This service disambiguates
//! by call shape: a listing with no key means an empty result set, while a
//! detail fetch or type listing with no key means the token is unusable, so
//! the session's token slot is cleared and the caller gets `AuthUnavailable`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::catalog::{
    AnimalSearch, CatalogAnimal, CatalogOrganization, ExternalId, OrganizationSearch,
};
use crate::domain::error::Error;
use crate::domain::ports::catalog_browse::CatalogBrowse;
use crate::domain::ports::catalog_source::{CatalogSource, CatalogSourceError};
use crate::domain::ports::token_source::TokenSource;
use crate::domain::token::SessionTokens;
use crate::domain::token_service::TokenService;

/// Implements [`CatalogBrowse`] against a [`CatalogSource`].
#[derive(Debug)]
pub struct CatalogService<T, C> {
    tokens: TokenService<T>,
    source: Arc<C>,
}

impl<T, C> CatalogService<T, C>
where
    T: TokenSource,
    C: CatalogSource,
{
    pub fn new(tokens: TokenService<T>, source: Arc<C>) -> Self {
        Self { tokens, source }
    }
}

/// Map a transport or decode failure onto the domain error surface.
fn upstream_failure(error: &CatalogSourceError) -> Error {
    tracing::warn!(%error, "catalog request failed");
    Error::fetch_failed("the pet catalog could not be reached")
}

#[async_trait]
impl<T, C> CatalogBrowse for CatalogService<T, C>
where
    T: TokenSource + 'static,
    C: CatalogSource + 'static,
{
    async fn search_animals(
        &self,
        tokens: &mut SessionTokens,
        search: &AnimalSearch,
    ) -> Result<Vec<CatalogAnimal>, Error> {
        let bearer = self.tokens.ensure_valid(tokens, Utc::now()).await?;
        match self.source.search_animals(&bearer, search).await {
            Ok(animals) => Ok(animals),
            Err(CatalogSourceError::MissingKey { .. }) => {
                Err(Error::not_found("no animals found"))
            }
            Err(error) => Err(upstream_failure(&error)),
        }
    }

    async fn search_organizations(
        &self,
        tokens: &mut SessionTokens,
        search: &OrganizationSearch,
    ) -> Result<Vec<CatalogOrganization>, Error> {
        let bearer = self.tokens.ensure_valid(tokens, Utc::now()).await?;
        match self.source.search_organizations(&bearer, search).await {
            Ok(orgs) => Ok(orgs),
            Err(CatalogSourceError::MissingKey { .. }) => {
                Err(Error::not_found("no organizations found"))
            }
            Err(error) => Err(upstream_failure(&error)),
        }
    }

    async fn animal_types(&self, tokens: &mut SessionTokens) -> Result<Vec<String>, Error> {
        let bearer = self.tokens.ensure_valid(tokens, Utc::now()).await?;
        match self.source.animal_types(&bearer).await {
            Ok(types) => Ok(types),
            Err(CatalogSourceError::MissingKey { .. }) => {
                tokens.clear();
                Err(Error::auth_unavailable("session timed out, try again"))
            }
            Err(error) => Err(upstream_failure(&error)),
        }
    }

    async fn animal_details(
        &self,
        tokens: &mut SessionTokens,
        id: &ExternalId,
    ) -> Result<CatalogAnimal, Error> {
        let bearer = self.tokens.ensure_valid(tokens, Utc::now()).await?;
        match self.source.fetch_animal(&bearer, id).await {
            Ok(animal) => Ok(animal),
            Err(CatalogSourceError::MissingKey { .. }) => {
                tokens.clear();
                Err(Error::auth_unavailable("session timed out, try again"))
            }
            Err(error) => Err(upstream_failure(&error)),
        }
    }

    async fn organization_details(
        &self,
        tokens: &mut SessionTokens,
        id: &ExternalId,
    ) -> Result<CatalogOrganization, Error> {
        let bearer = self.tokens.ensure_valid(tokens, Utc::now()).await?;
        match self.source.fetch_organization(&bearer, id).await {
            Ok(org) => Ok(org),
            Err(CatalogSourceError::MissingKey { .. }) => {
                tokens.clear();
                Err(Error::auth_unavailable("session timed out, try again"))
            }
            Err(error) => Err(upstream_failure(&error)),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::catalog_source::MockCatalogSource;
    use crate::domain::ports::token_source::{IssuedToken, MockTokenSource};
    use crate::domain::token::{token_lifetime, TokenState};

    fn token_source() -> Arc<MockTokenSource> {
        let mut source = MockTokenSource::new();
        source.expect_issue_token().returning(|| Ok(IssuedToken {
            access_token: "bearer-1".to_owned(),
        }));
        Arc::new(source)
    }

    fn service(source: MockCatalogSource) -> CatalogService<MockTokenSource, MockCatalogSource> {
        CatalogService::new(TokenService::new(token_source()), Arc::new(source))
    }

    fn animal(id: &str) -> CatalogAnimal {
        CatalogAnimal {
            id: ExternalId::new(id).expect("fixture id"),
            name: "Biscuit".to_owned(),
            animal_type: Some("Dog".to_owned()),
            gender: Some("Female".to_owned()),
            description: None,
            photos: Vec::new(),
        }
    }

    #[tokio::test]
    async fn search_passes_the_issued_bearer_through() {
        let mut source = MockCatalogSource::new();
        source
            .expect_search_animals()
            .withf(|bearer, search| bearer == "bearer-1" && search.page == 1)
            .times(1)
            .returning(|_, _| Ok(vec![animal("70635244")]));

        let mut tokens = SessionTokens::new();
        let results = service(source)
            .search_animals(&mut tokens, &AnimalSearch::page(1))
            .await
            .expect("search succeeds");

        assert_eq!(results.len(), 1);
        assert!(tokens.current().is_some());
    }

    #[tokio::test]
    async fn empty_search_maps_missing_key_to_not_found() {
        let mut source = MockCatalogSource::new();
        source
            .expect_search_animals()
            .returning(|_, _| Err(CatalogSourceError::missing_key("animals")));

        let mut tokens = SessionTokens::new();
        let err = service(source)
            .search_animals(&mut tokens, &AnimalSearch::page(1))
            .await
            .expect_err("missing key is an empty result");

        assert_eq!(err.code(), ErrorCode::NotFound);
        // The token stays; an empty result set is not an auth failure.
        assert!(tokens.current().is_some());
    }

    #[tokio::test]
    async fn organization_search_missing_key_is_not_found() {
        let mut source = MockCatalogSource::new();
        source
            .expect_search_organizations()
            .returning(|_, _| Err(CatalogSourceError::missing_key("organizations")));

        let mut tokens = SessionTokens::new();
        let err = service(source)
            .search_organizations(
                &mut tokens,
                &OrganizationSearch {
                    state: Some("ZZ".to_owned()),
                    ..OrganizationSearch::page(1)
                },
            )
            .await
            .expect_err("no matches in that state");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn detail_missing_key_clears_tokens_and_reports_auth_unavailable() {
        let mut source = MockCatalogSource::new();
        source
            .expect_fetch_animal()
            .returning(|_, _| Err(CatalogSourceError::missing_key("animal")));

        let mut tokens = SessionTokens::new();
        tokens.replace(TokenState::issued(
            "stale-but-unexpired".to_owned(),
            Utc::now(),
            token_lifetime(),
        ));

        let mut svc_source = MockTokenSource::new();
        svc_source.expect_issue_token().times(0);
        let svc = CatalogService::new(
            TokenService::new(Arc::new(svc_source)),
            Arc::new(source),
        );

        let id = ExternalId::new("70635244").expect("fixture id");
        let err = svc
            .animal_details(&mut tokens, &id)
            .await
            .expect_err("bad token surfaces");

        assert_eq!(err.code(), ErrorCode::AuthUnavailable);
        assert!(tokens.current().is_none());
    }

    #[tokio::test]
    async fn transport_failures_map_to_fetch_failed() {
        let mut source = MockCatalogSource::new();
        source
            .expect_animal_types()
            .returning(|_| Err(CatalogSourceError::transport("connection reset")));

        let mut tokens = SessionTokens::new();
        let err = service(source)
            .animal_types(&mut tokens)
            .await
            .expect_err("transport failure surfaces");

        assert_eq!(err.code(), ErrorCode::FetchFailed);
    }
}
