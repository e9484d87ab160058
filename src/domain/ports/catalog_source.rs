//! Driven port for the upstream pet catalog API.
//!
//! The adapter handles transport, authentication headers, and payload
//! decoding. One upstream quirk leaks through deliberately: the API signals
//! both "no results" and "bad token" by omitting the expected top-level key
//! from the response body, so the port reports that as a distinct
//! [`CatalogSourceError::MissingKey`] and call sites disambiguate.

use async_trait::async_trait;

use crate::domain::catalog::{
    AnimalSearch, CatalogAnimal, CatalogOrganization, ExternalId, OrganizationSearch,
};

/// Errors raised by catalog source adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogSourceError {
    /// The response body lacked the expected top-level key.
    ///
    /// Upstream conflates "empty result set" and "expired token" in this
    /// shape; the caller decides which it means.
    #[error("upstream response missing expected key '{key}'")]
    MissingKey { key: String },

    /// The request failed in transit.
    #[error("upstream request failed: {message}")]
    Transport { message: String },

    /// The response body could not be decoded into the expected shape.
    #[error("upstream payload could not be decoded: {message}")]
    Decode { message: String },
}

impl CatalogSourceError {
    /// Create a missing-key error for the given key.
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    /// Create a transport error with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a decode error with the given message.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Port for authenticated reads against the upstream catalog.
///
/// Every method takes the bearer token to send; acquiring and refreshing the
/// token is the token service's concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// List adoptable animals matching the search filters.
    async fn search_animals(
        &self,
        bearer: &str,
        search: &AnimalSearch,
    ) -> Result<Vec<CatalogAnimal>, CatalogSourceError>;

    /// List rescue organizations matching the search filters.
    async fn search_organizations(
        &self,
        bearer: &str,
        search: &OrganizationSearch,
    ) -> Result<Vec<CatalogOrganization>, CatalogSourceError>;

    /// List the animal type names the catalog recognises.
    async fn animal_types(&self, bearer: &str) -> Result<Vec<String>, CatalogSourceError>;

    /// Fetch one animal's detail record.
    async fn fetch_animal(
        &self,
        bearer: &str,
        id: &ExternalId,
    ) -> Result<CatalogAnimal, CatalogSourceError>;

    /// Fetch one organization's detail record.
    async fn fetch_organization(
        &self,
        bearer: &str,
        id: &ExternalId,
    ) -> Result<CatalogOrganization, CatalogSourceError>;
}
