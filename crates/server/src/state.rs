//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::shopify::ShopifyClient;
use crate::store::TokenStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the Shopify client and the session store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    shopify: ShopifyClient,
    sessions: Arc<dyn TokenStore>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `sessions` - Token store keyed by shop domain
    #[must_use]
    pub fn new(config: AppConfig, sessions: Arc<dyn TokenStore>) -> Self {
        let shopify = ShopifyClient::new(&config.shopify);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                shopify,
                sessions,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify API client.
    #[must_use]
    pub fn shopify(&self) -> &ShopifyClient {
        &self.inner.shopify
    }

    /// Get a reference to the shop session store.
    #[must_use]
    pub fn sessions(&self) -> &dyn TokenStore {
        self.inner.sessions.as_ref()
    }
}
