//! Cache expiry sweep
//!
//! Expired entries are already dropped when read; the sweep reclaims the
//! ones nobody asks for again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a task that calls [`CacheStore::cleanup_expired`] every
/// `cleanup_interval_secs` seconds.
///
/// The returned handle is aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = ResponseCache::new(CacheStore::new(1000, 600)?);
/// let cleanup_handle = spawn_cleanup_task(cache.store(), 30);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(
    store: Arc<RwLock<CacheStore>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(interval_secs = cleanup_interval_secs, "Starting cache expiry sweep");

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.write().await.cleanup_expired();

            if removed > 0 {
                info!(removed, "cache sweep removed expired entries");
            } else {
                debug!("cache sweep found no expired entries");
            }
        }
    })
}
