//! Item Cache Module
//!
//! Read-through cache of inventory items in front of the item store.
//!
//! Lookups check the cache backend first and fall back to the store on a
//! miss, populating the backend with a JSON snapshot of the item. Mutations
//! go to the store directly and call [`ItemCache::invalidate`] before and
//! after the write.
//!
//! An invalidation epoch guards population: `get` notes the epoch before it
//! reads the store and only writes the snapshot back if no invalidation ran
//! in between. The epoch check and the backend write happen under the same
//! lock that invalidations take, so a read that raced a mutation cannot
//! leave the pre-mutation snapshot behind.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheBackend, CacheCounters, CacheStats};
use crate::error::{ApiError, CacheError};
use crate::models::{Item, ItemId};
use crate::store::ItemStore;

/// Namespace prefix of item cache keys
pub const ITEM_KEY_PREFIX: &str = "item_";

/// TTL applied to item snapshots unless configured otherwise
pub const DEFAULT_ITEM_TTL: Duration = Duration::from_secs(300);

/// Cache key for an item id, e.g. `item_42`.
pub fn item_key(id: ItemId) -> String {
    format!("{ITEM_KEY_PREFIX}{id}")
}

// == Item Cache ==
/// Time-bounded read-through cache keyed by item id.
///
/// Cheap to clone; clones share the backend, the counters and the epoch.
#[derive(Clone)]
pub struct ItemCache {
    backend: Arc<dyn CacheBackend>,
    store: Arc<dyn ItemStore>,
    ttl: Duration,
    epoch: Arc<RwLock<u64>>,
    counters: Arc<CacheCounters>,
}

impl ItemCache {
    pub fn new(backend: Arc<dyn CacheBackend>, store: Arc<dyn ItemStore>, ttl: Duration) -> Self {
        Self {
            backend,
            store,
            ttl,
            epoch: Arc::new(RwLock::new(0)),
            counters: Arc::new(CacheCounters::new()),
        }
    }

    // == Get ==
    /// Returns the item, from the cache when a live snapshot exists.
    ///
    /// On a miss the store is queried and a found item is cached for the
    /// configured TTL. Absent items are never cached.
    pub async fn get(&self, id: ItemId) -> Result<Item, ApiError> {
        let key = item_key(id);

        if let Some(item) = self.lookup(&key).await {
            self.counters.record_hit();
            debug!(item_id = id, "Item served from cache");
            return Ok(item);
        }
        self.counters.record_miss();

        let observed_epoch = *self.epoch.read().await;
        self.counters.record_store_read();
        let item = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(ApiError::item_not_found)?;

        self.put(&key, &item, observed_epoch).await;
        debug!(item_id = id, "Item fetched from store and cached");
        Ok(item)
    }

    // == Invalidate ==
    /// Drops any cached snapshot of the item, live or expired.
    ///
    /// Backend failures are logged; the entry then lives until its TTL.
    pub async fn invalidate(&self, id: ItemId) {
        let key = item_key(id);
        let mut epoch = self.epoch.write().await;
        *epoch = epoch.wrapping_add(1);
        self.counters.record_invalidation();

        if let Err(err) = self.backend.delete(&key).await {
            self.counters.record_backend_error();
            warn!(item_id = id, error = %err, "Failed to invalidate cached item");
        }
    }

    /// Counter snapshot, with backend occupancy when the backend reports it.
    pub async fn stats(&self) -> CacheStats {
        let mut stats = self.counters.snapshot();
        stats.backend = self.backend.usage().await;
        stats
    }

    /// Shuts the backend down. Call once, after the server has stopped.
    pub async fn shutdown(&self) -> Result<(), CacheError> {
        self.backend.shutdown().await
    }

    // == Lookup ==
    /// Reads and decodes a snapshot. Backend failures count as a miss and an
    /// undecodable snapshot is deleted.
    async fn lookup(&self, key: &str) -> Option<Item> {
        let bytes = match self.backend.get(key).await {
            Ok(bytes) => bytes?,
            Err(err) => {
                self.counters.record_backend_error();
                warn!(key, error = %err, "Cache backend read failed, falling through to store");
                return None;
            }
        };

        match serde_json::from_slice::<Item>(&bytes) {
            Ok(item) => Some(item),
            Err(err) => {
                self.counters.record_backend_error();
                warn!(key, error = %err, "Discarding undecodable cache entry");
                if let Err(err) = self.backend.delete(key).await {
                    warn!(key, error = %err, "Failed to discard cache entry");
                }
                None
            }
        }
    }

    // == Put ==
    /// Writes a snapshot unless an invalidation ran since `observed_epoch`.
    async fn put(&self, key: &str, item: &Item, observed_epoch: u64) {
        let epoch = self.epoch.read().await;
        if *epoch != observed_epoch {
            debug!(key, "Item invalidated during store read, not caching");
            return;
        }

        let bytes = match serde_json::to_vec(item) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(key, error = %err, "Failed to serialize item snapshot");
                return;
            }
        };

        if let Err(err) = self.backend.set(key, bytes, self.ttl).await {
            self.counters.record_backend_error();
            warn!(key, error = %err, "Cache backend write failed");
        }
    }
}
