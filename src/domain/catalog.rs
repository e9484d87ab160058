//! Types for the external pet catalog and its local mirror rows.
//!
//! Catalog entities are owned upstream; this module defines the typed
//! projections the application actually uses, the write-once [`MirrorRecord`]
//! snapshot, and the text/image normalization policies applied to upstream
//! payloads.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Image used when an upstream entity has no photos.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://img.freepik.com/free-vector/cute-dog-sitting-cartoon-vector-icon-illustration-animal-nature-icon-concept-isolated-premium-vector-flat-cartoon-style_138676-3671.jpg";

/// Page size used for every catalog listing request.
pub const SEARCH_PAGE_LIMIT: u32 = 42;

/// Upstream entity texts are double-encoded at worst; a small bound keeps the
/// unescape loop total even on pathological input.
const MAX_UNESCAPE_PASSES: usize = 4;

/// Validation errors for catalog identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalIdError {
    Empty,
    TooLong { max: usize },
    InvalidCharacters,
}

impl fmt::Display for ExternalIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "external id must not be empty"),
            Self::TooLong { max } => write!(f, "external id must be at most {max} characters"),
            Self::InvalidCharacters => {
                write!(f, "external id may not contain whitespace or slashes")
            }
        }
    }
}

impl std::error::Error for ExternalIdError {}

/// Maximum accepted length for an upstream identifier.
pub const EXTERNAL_ID_MAX: usize = 64;

/// Upstream identifier reused verbatim as the local primary key.
///
/// Animal ids are numeric strings; organization ids are alphanumeric codes
/// such as `NJ333`. The id is embedded in request paths, so path separators
/// and whitespace are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExternalId(String);

impl ExternalId {
    /// Validate and construct an [`ExternalId`], trimming whitespace.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ExternalIdError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ExternalIdError::Empty);
        }
        if trimmed.chars().count() > EXTERNAL_ID_MAX {
            return Err(ExternalIdError::TooLong {
                max: EXTERNAL_ID_MAX,
            });
        }
        if trimmed
            .chars()
            .any(|c| c.is_whitespace() || c == '/' || c == '\\')
        {
            return Err(ExternalIdError::InvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ExternalId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ExternalId> for String {
    fn from(value: ExternalId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ExternalId {
    type Error = ExternalIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Kind of catalog entity a user can save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SavedKind {
    Animal,
    Organization,
}

impl fmt::Display for SavedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Animal => f.write_str("animal"),
            Self::Organization => f.write_str("organization"),
        }
    }
}

/// One photo entry as published upstream, in its resolution variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PhotoSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full: Option<String>,
}

/// Adoptable animal as returned by the upstream catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogAnimal {
    #[schema(value_type = String, example = "70635244")]
    pub id: ExternalId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animal_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Entity-normalized free text; may still be absent upstream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub photos: Vec<PhotoSet>,
}

/// Rescue organization as returned by the upstream catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOrganization {
    #[schema(value_type = String, example = "NJ333")]
    pub id: ExternalId,
    pub name: String,
    /// Entity-normalized free text; may still be absent upstream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mission_statement: Option<String>,
    pub photos: Vec<PhotoSet>,
}

/// Filters accepted by the animal listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimalSearch {
    pub page: u32,
    pub animal_type: Option<String>,
    pub name: Option<String>,
    pub gender: Option<String>,
}

impl AnimalSearch {
    /// Search with default filters on the given page (pages start at 1).
    pub fn page(page: u32) -> Self {
        Self {
            page: page.max(1),
            ..Self::default()
        }
    }
}

/// Filters accepted by the organization listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationSearch {
    pub page: u32,
    pub location: Option<String>,
    pub state: Option<String>,
}

impl OrganizationSearch {
    /// Search with default filters on the given page (pages start at 1).
    pub fn page(page: u32) -> Self {
        Self {
            page: page.max(1),
            ..Self::default()
        }
    }
}

/// Local write-once snapshot of an upstream entity.
///
/// ## Invariants
/// - `id` is the upstream identifier verbatim.
/// - Once persisted the record is never refreshed from upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MirrorRecord {
    #[schema(value_type = String, example = "70635244")]
    pub id: ExternalId,
    pub kind: SavedKind,
    pub name: String,
    pub image_url: String,
    /// Animal description or organization mission statement.
    pub blurb: String,
}

impl MirrorRecord {
    /// Snapshot an animal payload, applying the image fallback policy.
    pub fn from_animal(animal: &CatalogAnimal) -> Self {
        Self {
            id: animal.id.clone(),
            kind: SavedKind::Animal,
            name: animal.name.clone(),
            image_url: choose_image(&animal.photos),
            blurb: animal.description.clone().unwrap_or_default(),
        }
    }

    /// Snapshot an organization payload, applying the image fallback policy.
    pub fn from_organization(org: &CatalogOrganization) -> Self {
        Self {
            id: org.id.clone(),
            kind: SavedKind::Organization,
            name: org.name.clone(),
            image_url: choose_image(&org.photos),
            blurb: org.mission_statement.clone().unwrap_or_default(),
        }
    }
}

/// Pick the mirrored image: the first photo's medium variant, or the
/// placeholder when the list is empty or that variant is missing.
pub fn choose_image(photos: &[PhotoSet]) -> String {
    photos
        .first()
        .and_then(|photo| photo.medium.clone())
        .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_owned())
}

/// Normalize HTML-entity-encoded upstream text by unescaping to a fixpoint.
///
/// The upstream double-encodes free text, so a single unescape can leave
/// `&amp;#39;`-style residue behind.
pub fn normalize_entities(raw: &str) -> String {
    let mut current = raw.to_owned();
    for _ in 0..MAX_UNESCAPE_PASSES {
        let decoded = html_escape::decode_html_entities(&current).into_owned();
        if decoded == current {
            break;
        }
        current = decoded;
    }
    current
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn photo(medium: Option<&str>) -> PhotoSet {
        PhotoSet {
            medium: medium.map(str::to_owned),
            ..PhotoSet::default()
        }
    }

    #[rstest]
    #[case("", ExternalIdError::Empty)]
    #[case("   ", ExternalIdError::Empty)]
    #[case("has space", ExternalIdError::InvalidCharacters)]
    #[case("a/b", ExternalIdError::InvalidCharacters)]
    fn invalid_external_ids_are_rejected(#[case] raw: &str, #[case] expected: ExternalIdError) {
        assert_eq!(
            ExternalId::new(raw).expect_err("invalid id must fail"),
            expected
        );
    }

    #[test]
    fn overlong_external_id_is_rejected() {
        let raw = "x".repeat(EXTERNAL_ID_MAX + 1);
        assert_eq!(
            ExternalId::new(&raw).expect_err("overlong id must fail"),
            ExternalIdError::TooLong {
                max: EXTERNAL_ID_MAX
            }
        );
    }

    #[rstest]
    #[case("70635244")]
    #[case("NJ333")]
    #[case("  NJ333  ")]
    fn valid_external_ids_are_trimmed(#[case] raw: &str) {
        let id = ExternalId::new(raw).expect("valid id");
        assert_eq!(id.as_ref(), raw.trim());
    }

    #[test]
    fn empty_photo_list_falls_back_to_placeholder() {
        assert_eq!(choose_image(&[]), PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn first_photo_medium_variant_wins() {
        let photos = vec![
            photo(Some("https://cdn.example.org/a-medium.jpg")),
            photo(Some("https://cdn.example.org/b-medium.jpg")),
        ];
        assert_eq!(choose_image(&photos), "https://cdn.example.org/a-medium.jpg");
    }

    #[test]
    fn missing_medium_variant_falls_back_to_placeholder() {
        let photos = vec![photo(None)];
        assert_eq!(choose_image(&photos), PLACEHOLDER_IMAGE_URL);
    }

    #[rstest]
    #[case("plain text", "plain text")]
    #[case("Tom &amp; Jerry", "Tom & Jerry")]
    // Double-encoded input needs two passes.
    #[case("she&amp;#39;s friendly", "she's friendly")]
    #[case("&amp;amp;lt;b&amp;amp;gt;", "<b>")]
    fn normalize_entities_reaches_fixpoint(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_entities(raw), expected);
    }

    #[test]
    fn mirror_record_from_animal_applies_policies() {
        let animal = CatalogAnimal {
            id: ExternalId::new("70635244").expect("id"),
            name: "Biscuit".to_owned(),
            animal_type: Some("Dog".to_owned()),
            gender: Some("Female".to_owned()),
            description: Some("Loves naps".to_owned()),
            photos: Vec::new(),
        };

        let record = MirrorRecord::from_animal(&animal);
        assert_eq!(record.kind, SavedKind::Animal);
        assert_eq!(record.image_url, PLACEHOLDER_IMAGE_URL);
        assert_eq!(record.blurb, "Loves naps");
    }

    #[test]
    fn mirror_record_from_organization_uses_mission_statement() {
        let org = CatalogOrganization {
            id: ExternalId::new("NJ333").expect("id"),
            name: "Happy Tails".to_owned(),
            mission_statement: None,
            photos: vec![photo(Some("https://cdn.example.org/org-medium.jpg"))],
        };

        let record = MirrorRecord::from_organization(&org);
        assert_eq!(record.kind, SavedKind::Organization);
        assert_eq!(record.image_url, "https://cdn.example.org/org-medium.jpg");
        assert_eq!(record.blurb, "");
    }

    #[test]
    fn search_pages_are_clamped_to_one() {
        assert_eq!(AnimalSearch::page(0).page, 1);
        assert_eq!(OrganizationSearch::page(0).page, 1);
        assert_eq!(AnimalSearch::page(7).page, 7);
    }
}
