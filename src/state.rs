//! Shared application state for all routes.

use crate::service::Catalog;

/// Handed to every handler. Holds the injected store handle, nothing mutable.
#[derive(Clone, Debug)]
pub struct AppState {
    pub catalog: Catalog,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        AppState { catalog }
    }
}
