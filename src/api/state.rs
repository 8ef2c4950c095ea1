//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{IdentityProvider, InMemoryIdentityProvider, JwtTokenService, TokenService};
use crate::cache::{CacheBackend, ItemCache};
use crate::config::Config;
use crate::store::{InMemoryItemStore, ItemStore};

/// Application state shared across all handlers.
///
/// Every collaborator is injected; cloning shares them.
#[derive(Clone)]
pub struct AppState {
    /// Source of truth for items
    pub items: Arc<dyn ItemStore>,
    /// Read-through cache in front of `items`
    pub cache: ItemCache,
    pub identity: Arc<dyn IdentityProvider>,
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    pub fn new(
        items: Arc<dyn ItemStore>,
        backend: Arc<dyn CacheBackend>,
        identity: Arc<dyn IdentityProvider>,
        tokens: Arc<dyn TokenService>,
        cache_ttl: Duration,
    ) -> Self {
        let cache = ItemCache::new(backend, Arc::clone(&items), cache_ttl);
        Self {
            items,
            cache,
            identity,
            tokens,
        }
    }

    /// Builds the stand-alone service: in-process item store and accounts,
    /// JWT tokens signed with the configured secret, and the given backend.
    pub fn from_config(config: &Config, backend: Arc<dyn CacheBackend>) -> Self {
        Self::new(
            Arc::new(InMemoryItemStore::new()),
            backend,
            Arc::new(InMemoryIdentityProvider::new()),
            Arc::new(JwtTokenService::new(
                &config.jwt_secret,
                config.access_token_ttl,
                config.refresh_token_ttl,
            )),
            config.cache_ttl(),
        )
    }
}
