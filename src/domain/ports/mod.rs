//! Ports the domain exposes to the rest of the application.
//!
//! Driving ports ([`Accounts`], [`CatalogBrowse`], [`Likes`]) are what the
//! HTTP layer calls; driven ports are what the domain services call out to
//! (upstream HTTP, persistence, password hashing). Adapters live under
//! `outbound`, test doubles come from `mockall::automock`.

pub mod accounts;
pub mod catalog_browse;
pub mod catalog_source;
pub mod like_repository;
pub mod likes;
pub mod mirror_repository;
pub mod password_hasher;
pub mod token_source;
pub mod user_repository;

pub use accounts::Accounts;
pub use catalog_browse::CatalogBrowse;
pub use catalog_source::{CatalogSource, CatalogSourceError};
pub use like_repository::{LikePersistenceError, LikeRepository};
pub use likes::{LikeState, Likes};
pub use mirror_repository::{MirrorPersistenceError, MirrorRepository};
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use token_source::{IssuedToken, TokenSource, TokenSourceError};
pub use user_repository::{
    NewUserRecord, UserCredentials, UserPersistenceError, UserRepository,
};

#[cfg(test)]
pub use accounts::MockAccounts;
#[cfg(test)]
pub use catalog_browse::MockCatalogBrowse;
#[cfg(test)]
pub use catalog_source::MockCatalogSource;
#[cfg(test)]
pub use like_repository::MockLikeRepository;
#[cfg(test)]
pub use likes::MockLikes;
#[cfg(test)]
pub use mirror_repository::MockMirrorRepository;
#[cfg(test)]
pub use password_hasher::{FixturePasswordHasher, MockPasswordHasher};
#[cfg(test)]
pub use token_source::MockTokenSource;
#[cfg(test)]
pub use user_repository::MockUserRepository;
