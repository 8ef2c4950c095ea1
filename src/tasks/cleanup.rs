//! TTL Cleanup Task
//!
//! Background task that periodically removes expired entries from the
//! in-memory cache backend. Expired entries are never served either way;
//! the sweep only reclaims their memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryStore;

/// Spawns a background task that periodically cleans up expired entries.
///
/// The task sleeps for `cleanup_interval_secs` between runs and takes the
/// store's write lock for each sweep. Abort the returned handle on shutdown.
///
/// # Example
/// ```ignore
/// let backend = MemoryBackend::new(1000);
/// let cleanup_handle = spawn_cleanup_task(backend.store(), 60);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(
    store: Arc<RwLock<MemoryStore>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            interval_secs = interval.as_secs(),
            "Starting cache cleanup task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut guard = store.write().await;
                guard.cleanup_expired()
            };

            if removed > 0 {
                info!(removed, "Cache cleanup removed expired entries");
            } else {
                debug!("Cache cleanup found no expired entries");
            }
        }
    })
}
