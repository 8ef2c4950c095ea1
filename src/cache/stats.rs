//! Cache Statistics Module
//!
//! Tracks item cache behaviour: hits, misses, store reads, invalidations and
//! backend failures.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Counters ==
/// Lock-free counters shared by every clone of an item cache.
#[derive(Debug, Default)]
pub struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    store_reads: AtomicU64,
    invalidations: AtomicU64,
    backend_errors: AtomicU64,
}

impl CacheCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store_read(&self) {
        self.store_reads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_backend_error(&self) {
        self.backend_errors.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Reads all counters into a serializable snapshot.
    pub fn snapshot(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);

        CacheStats {
            hits,
            misses,
            store_reads: self.store_reads.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            backend_errors: self.backend_errors.load(Ordering::Relaxed),
            hit_rate: hit_rate(hits, misses),
            backend: None,
        }
    }
}

// == Cache Stats ==
/// Point-in-time view of the item cache counters (GET /cache/stats).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups served from the cache
    pub hits: u64,
    /// Lookups that fell through to the store
    pub misses: u64,
    /// Item store queries issued by the cache
    pub store_reads: u64,
    /// Explicit invalidations
    pub invalidations: u64,
    /// Backend failures absorbed by falling through to the store
    pub backend_errors: u64,
    /// hits / (hits + misses), 0.0 before the first lookup
    pub hit_rate: f64,
    /// Occupancy of the backend, when it can report one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendUsage>,
}

/// Occupancy of a cache backend that manages its own capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BackendUsage {
    /// Entries currently held, live or not yet swept
    pub entries: usize,
    /// Entries dropped to make room for new ones
    pub evictions: u64,
}

fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}
