//! Wire representations of upstream catalog payloads.
//!
//! DTOs stay private to the adapter; `into_domain` conversions apply the
//! domain's text normalization (repeated entity unescape) and id validation.

use serde::Deserialize;

use crate::domain::catalog::{
    normalize_entities, CatalogAnimal, CatalogOrganization, ExternalId, PhotoSet,
};
use crate::domain::ports::catalog_source::CatalogSourceError;

/// `POST /oauth2/token` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenPayloadDto {
    pub access_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PhotoDto {
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
    pub full: Option<String>,
}

impl From<PhotoDto> for PhotoSet {
    fn from(dto: PhotoDto) -> Self {
        Self {
            small: dto.small,
            medium: dto.medium,
            large: dto.large,
            full: dto.full,
        }
    }
}

/// One animal as published upstream. Ids arrive as JSON numbers.
#[derive(Debug, Deserialize)]
pub(crate) struct AnimalDto {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub animal_type: Option<String>,
    pub gender: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub photos: Vec<PhotoDto>,
}

impl AnimalDto {
    pub fn into_domain(self) -> Result<CatalogAnimal, CatalogSourceError> {
        let id = ExternalId::new(self.id.to_string())
            .map_err(|err| CatalogSourceError::decode(format!("invalid animal id: {err}")))?;
        Ok(CatalogAnimal {
            id,
            name: self.name,
            animal_type: self.animal_type,
            gender: self.gender,
            description: self.description.as_deref().map(normalize_entities),
            photos: self.photos.into_iter().map(PhotoSet::from).collect(),
        })
    }
}

/// One organization as published upstream. Ids are alphanumeric codes.
#[derive(Debug, Deserialize)]
pub(crate) struct OrganizationDto {
    pub id: String,
    pub name: String,
    pub mission_statement: Option<String>,
    #[serde(default)]
    pub photos: Vec<PhotoDto>,
}

impl OrganizationDto {
    pub fn into_domain(self) -> Result<CatalogOrganization, CatalogSourceError> {
        let id = ExternalId::new(&self.id)
            .map_err(|err| CatalogSourceError::decode(format!("invalid organization id: {err}")))?;
        Ok(CatalogOrganization {
            id,
            name: self.name,
            mission_statement: self.mission_statement.as_deref().map(normalize_entities),
            photos: self.photos.into_iter().map(PhotoSet::from).collect(),
        })
    }
}

/// One entry of the `GET /types` listing.
#[derive(Debug, Deserialize)]
pub(crate) struct TypeDto {
    pub name: String,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn animal_dto_decodes_and_normalizes_entities() {
        let raw = r#"{
            "id": 70635244,
            "name": "Biscuit",
            "type": "Dog",
            "gender": "Female",
            "description": "she&amp;#39;s friendly",
            "photos": [{"medium": "https://cdn.example.org/a-medium.jpg"}]
        }"#;

        let dto: AnimalDto = serde_json::from_str(raw).expect("animal decodes");
        let animal = dto.into_domain().expect("domain conversion");
        assert_eq!(animal.id.as_ref(), "70635244");
        assert_eq!(animal.description.as_deref(), Some("she's friendly"));
        assert_eq!(
            animal.photos[0].medium.as_deref(),
            Some("https://cdn.example.org/a-medium.jpg")
        );
    }

    #[test]
    fn animal_dto_tolerates_missing_optional_fields() {
        let raw = r#"{"id": 1, "name": "Mys"}"#;
        let dto: AnimalDto = serde_json::from_str(raw).expect("animal decodes");
        let animal = dto.into_domain().expect("domain conversion");
        assert!(animal.animal_type.is_none());
        assert!(animal.description.is_none());
        assert!(animal.photos.is_empty());
    }

    #[test]
    fn organization_dto_keeps_the_alphanumeric_id() {
        let raw = r#"{
            "id": "NJ333",
            "name": "Happy Tails",
            "mission_statement": "Tom &amp; Jerry &amp; friends"
        }"#;

        let dto: OrganizationDto = serde_json::from_str(raw).expect("org decodes");
        let org = dto.into_domain().expect("domain conversion");
        assert_eq!(org.id.as_ref(), "NJ333");
        assert_eq!(
            org.mission_statement.as_deref(),
            Some("Tom & Jerry & friends")
        );
    }

    #[test]
    fn blank_organization_id_is_a_decode_error() {
        let dto = OrganizationDto {
            id: "   ".to_owned(),
            name: "Nameless".to_owned(),
            mission_statement: None,
            photos: Vec::new(),
        };
        let err = dto.into_domain().expect_err("blank id must fail");
        assert!(matches!(err, CatalogSourceError::Decode { .. }));
    }
}
