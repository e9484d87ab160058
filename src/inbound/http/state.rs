//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{Accounts, CatalogBrowse, Likes};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn Accounts>,
    pub catalog: Arc<dyn CatalogBrowse>,
    pub likes: Arc<dyn Likes>,
}

impl HttpState {
    pub fn new(
        accounts: Arc<dyn Accounts>,
        catalog: Arc<dyn CatalogBrowse>,
        likes: Arc<dyn Likes>,
    ) -> Self {
        Self {
            accounts,
            catalog,
            likes,
        }
    }
}
