//! Memory Store Module
//!
//! Entry table behind the in-memory cache backend: HashMap storage with LRU
//! tracking and TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, LruTracker, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::CacheError;

// == Memory Store ==
/// Bounded key-value table with per-entry expiry.
#[derive(Debug)]
pub struct MemoryStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Entries dropped to make room
    evictions: u64,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates a store holding at most `max_entries` entries (at least one).
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            max_entries: max_entries.max(1),
            evictions: 0,
        }
    }

    // == Set ==
    /// Stores a value under `key`, replacing any previous entry and its TTL.
    ///
    /// When the store is full, the least recently used entry is evicted.
    pub fn set(&mut self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        if key.is_empty() || key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidKey(format!(
                "key must be 1 to {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheError::ValueTooLarge(MAX_VALUE_SIZE));
        }

        if !self.entries.contains_key(key) && self.entries.len() >= self.max_entries {
            // Prefer dropping dead entries over live ones
            if self.cleanup_expired() == 0 {
                let evicted = self.lru.evict_oldest().ok_or_else(|| {
                    CacheError::CacheFull("Cache is full and eviction failed".to_string())
                })?;
                self.entries.remove(&evicted);
                self.evictions += 1;
            }
        }

        self.entries
            .insert(key.to_string(), CacheEntry::new(value, ttl));
        self.lru.touch(key);

        Ok(())
    }

    // == Get ==
    /// Returns the live value for `key`. Expired entries are dropped on read.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        let expired = self.entries.get(key)?.is_expired();
        if expired {
            self.remove(key);
            return None;
        }

        self.lru.touch(key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes `key`, returning whether an entry (live or expired) existed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove(key)
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove(key);
        }

        expired_keys.len()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    fn remove(&mut self, key: &str) -> bool {
        self.lru.remove(key);
        self.entries.remove(key).is_some()
    }
}
