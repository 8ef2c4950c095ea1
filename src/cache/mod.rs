//! Cache Module
//!
//! Read-through item cache over a pluggable key-value backend, with an
//! in-memory backend (TTL expiration, LRU eviction) and a Redis backend.

mod backend;
mod entry;
mod item_cache;
mod lru;
mod redis_backend;
mod stats;
mod store;


// Re-export public types
pub use backend::{CacheBackend, MemoryBackend};
pub use entry::CacheEntry;
pub use item_cache::{item_key, ItemCache, DEFAULT_ITEM_TTL, ITEM_KEY_PREFIX};
pub use lru::LruTracker;
pub use redis_backend::RedisBackend;
pub use stats::{BackendUsage, CacheCounters, CacheStats};
pub use store::MemoryStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
