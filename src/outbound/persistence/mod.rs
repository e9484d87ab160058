//! Diesel-backed persistence adapters.

pub mod diesel_like_repository;
pub mod diesel_mirror_repository;
pub mod diesel_user_repository;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_like_repository::DieselLikeRepository;
pub use diesel_mirror_repository::DieselMirrorRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
