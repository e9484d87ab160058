//! HTTP inbound adapter exposing REST endpoints.

pub mod catalog;
pub mod error;
pub mod likes;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
