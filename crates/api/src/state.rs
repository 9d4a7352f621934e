//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::auth::Authenticator;
use crate::store::DocumentStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the document store, and the token authenticator.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    store: DocumentStore,
    authenticator: Authenticator,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The authenticator is derived from the configured signing secret.
    #[must_use]
    pub fn new(config: AppConfig, store: DocumentStore) -> Self {
        let authenticator = Authenticator::new(&config.jwt_secret);
        Self::with_authenticator(config, store, authenticator)
    }

    /// Create an application state with an explicit authenticator.
    ///
    /// Used by tests that need a non-standard token lifetime.
    #[must_use]
    pub fn with_authenticator(
        config: AppConfig,
        store: DocumentStore,
        authenticator: Authenticator,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                authenticator,
            }),
        }
    }

    /// Get a reference to the service configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Public base URL used for link enrichment.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.config.base_url
    }

    /// Get a reference to the document store.
    #[must_use]
    pub fn store(&self) -> &DocumentStore {
        &self.inner.store
    }

    /// Get a reference to the token authenticator.
    #[must_use]
    pub fn authenticator(&self) -> &Authenticator {
        &self.inner.authenticator
    }
}
