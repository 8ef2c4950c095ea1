//! Cache Backend Module
//!
//! The key-value contract the item cache is layered on, and the in-process
//! implementation used when no networked backend is configured.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{BackendUsage, MemoryStore};
use crate::error::CacheError;

// == Cache Backend ==
/// Byte-oriented key-value store with per-key expiry.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns the live value for `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Stores `value` under `key` for `ttl`, replacing any previous value.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Entry count and evictions, for backends that bound their own size.
    async fn usage(&self) -> Option<BackendUsage> {
        None
    }

    /// Releases the backend at process shutdown.
    async fn shutdown(&self) -> Result<(), CacheError> {
        Ok(())
    }
}

// == Memory Backend ==
/// In-process backend over a shared `MemoryStore`.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryBackend {
    /// Creates a backend holding at most `max_entries` entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(MemoryStore::new(max_entries))),
        }
    }

    /// Shared handle to the entry table, used by the cleanup task.
    pub fn store(&self) -> Arc<RwLock<MemoryStore>> {
        Arc::clone(&self.store)
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        // Write lock: reads touch the LRU order and drop expired entries
        let mut store = self.store.write().await;
        Ok(store.get(key))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.set(key, value, ttl)
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.delete(key);
        Ok(())
    }

    async fn usage(&self) -> Option<BackendUsage> {
        let store = self.store.read().await;
        Some(BackendUsage {
            entries: store.len(),
            evictions: store.evictions(),
        })
    }

    async fn shutdown(&self) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.clear();
        Ok(())
    }
}
