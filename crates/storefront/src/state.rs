//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::identity::MemoryIdentityStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    identity: MemoryIdentityStore,
}

impl AppState {
    /// Create state with the seeded catalog and an empty identity store.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog = Catalog::seeded(config.currency);
        Self::with_parts(config, catalog, MemoryIdentityStore::new())
    }

    /// Create state from explicit parts.
    #[must_use]
    pub fn with_parts(
        config: StorefrontConfig,
        catalog: Catalog,
        identity: MemoryIdentityStore,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                identity,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the identity and profile store.
    #[must_use]
    pub fn identity(&self) -> &MemoryIdentityStore {
        &self.inner.identity
    }
}
