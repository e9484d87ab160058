//! Reqwest-backed adapter for the Petfinder-style catalog API.

mod dto;
mod http_source;

pub use http_source::{PetfinderCredentials, PetfinderHttpSource};
