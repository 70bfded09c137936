//! Shared application state.

use std::sync::Arc;

use litera_content::domain::catalog::PostCatalog;
use litera_core::clock::Clock;
use litera_core::store::SessionStore;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Player and action log storage.
    pub store: Arc<dyn SessionStore>,
    /// Clock used to timestamp log entries.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Prebunking feed content.
    pub catalog: Arc<PostCatalog>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock + Send + Sync>,
        catalog: Arc<PostCatalog>,
    ) -> Self {
        Self {
            store,
            clock,
            catalog,
        }
    }
}
