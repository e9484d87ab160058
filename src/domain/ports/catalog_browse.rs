//! Driving port for browsing the upstream catalog.
//!
//! Every operation routes through the token lifecycle first, so callers pass
//! their session-owned token state and persist it back afterwards.

use async_trait::async_trait;

use crate::domain::catalog::{
    AnimalSearch, CatalogAnimal, CatalogOrganization, ExternalId, OrganizationSearch,
};
use crate::domain::error::Error;
use crate::domain::token::SessionTokens;

/// Domain use-case port for catalog listings and detail pages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogBrowse: Send + Sync {
    /// List adoptable animals; an empty upstream result is `NotFound`.
    async fn search_animals(
        &self,
        tokens: &mut SessionTokens,
        search: &AnimalSearch,
    ) -> Result<Vec<CatalogAnimal>, Error>;

    /// List rescue organizations; an empty upstream result is `NotFound`.
    async fn search_organizations(
        &self,
        tokens: &mut SessionTokens,
        search: &OrganizationSearch,
    ) -> Result<Vec<CatalogOrganization>, Error>;

    /// List the animal type names used by the search filters.
    async fn animal_types(&self, tokens: &mut SessionTokens) -> Result<Vec<String>, Error>;

    /// Fetch one animal's detail page payload.
    async fn animal_details(
        &self,
        tokens: &mut SessionTokens,
        id: &ExternalId,
    ) -> Result<CatalogAnimal, Error>;

    /// Fetch one organization's detail page payload.
    async fn organization_details(
        &self,
        tokens: &mut SessionTokens,
        id: &ExternalId,
    ) -> Result<CatalogOrganization, Error>;
}
