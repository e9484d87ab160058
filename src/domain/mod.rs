//! Core domain: types, ports, and services.
//!
//! Nothing in this module tree touches HTTP, SQL, or the network directly.
//! Services depend on the ports in [`ports`]; the adapters under
//! `crate::outbound` implement them and `crate::inbound` drives them.

pub mod account_service;
pub mod auth;
pub mod catalog;
pub mod catalog_service;
pub mod error;
pub mod like_service;
pub mod mirror_service;
pub mod ports;
pub mod token;
pub mod token_service;
pub mod user;

pub use account_service::AccountService;
pub use auth::{AuthValidationError, LoginCredentials, ProfileUpdate, SignupDetails, PASSWORD_MIN};
pub use catalog::{
    choose_image, normalize_entities, AnimalSearch, CatalogAnimal, CatalogOrganization,
    ExternalId, ExternalIdError, MirrorRecord, OrganizationSearch, PhotoSet, SavedKind,
    PLACEHOLDER_IMAGE_URL, SEARCH_PAGE_LIMIT,
};
pub use catalog_service::CatalogService;
pub use error::{Error, ErrorCode};
pub use like_service::LikeService;
pub use mirror_service::{MirrorService, MirroredEntity};
pub use token::{token_lifetime, SessionTokens, TokenState, TOKEN_LIFETIME_MINUTES};
pub use token_service::TokenService;
pub use user::{EmailAddress, User, UserId, UserValidationError, Username};
