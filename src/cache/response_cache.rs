//! Response Cache
//!
//! Shared, injectable handle over the [`CacheStore`] used by route handlers:
//! lookups with hit/miss logging, cache population on a read miss, and
//! invalidation after writes.

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::keys::{item_key, list_prefix};
use crate::cache::respond::ConditionalResponse;
use crate::cache::{digest, CacheStats, CacheStore};

// == Response Cache ==
/// Cheaply clonable handle to the process-wide response cache.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    store: Arc<RwLock<CacheStore>>,
    default_ttl: u64,
}

impl ResponseCache {
    pub fn new(store: CacheStore) -> Self {
        let default_ttl = store.default_ttl();
        Self {
            store: Arc::new(RwLock::new(store)),
            default_ttl,
        }
    }

    /// The underlying store, for the background expiry sweep.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        Arc::clone(&self.store)
    }

    /// TTL applied when none is given; also the public `max-age`.
    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    // == Get ==
    /// Looks up a payload. Takes the write lock because a hit updates recency.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let value = self.store.write().await.get(key);
        match value {
            Some(_) => debug!(key, "cache hit"),
            None => debug!(key, "cache miss"),
        }
        value
    }

    // == Set ==
    pub async fn set(&self, key: impl Into<String>, value: Value, ttl: Option<u64>) {
        self.store.write().await.set(key, value, ttl);
    }

    // == Delete ==
    pub async fn delete(&self, key: &str) -> bool {
        self.store.write().await.delete(key)
    }

    // == Delete By Prefix ==
    /// Removes every key starting with `prefix` and returns how many went.
    pub async fn delete_by_prefix(&self, prefix: &str) -> usize {
        let count = self.store.write().await.delete_by_prefix(prefix);
        if count > 0 {
            info!(prefix, count, "cache invalidated by prefix");
        }
        count
    }

    // == Invalidate ==
    /// Drops every cached list page of `entity` and the cached item `id`.
    ///
    /// Both removals always run; the store cannot fail here, so the caller
    /// simply continues with its response.
    pub async fn invalidate(&self, entity: impl AsRef<str>, id: impl AsRef<str>) {
        let entity = entity.as_ref();
        let id = id.as_ref();

        let lists = self.delete_by_prefix(&list_prefix(entity)).await;
        let item = self.delete(&item_key(entity, id)).await;

        debug!(entity, id, lists, item, "cache invalidated for entity");
    }

    // == Populate And Respond ==
    /// Read-miss path: caches `body` under `key`, then resolves the
    /// conditional request against its digest.
    pub async fn populate_and_respond(
        &self,
        key: impl Into<String>,
        body: Value,
        if_none_match: Option<&str>,
    ) -> ConditionalResponse {
        let etag = digest(&body);
        self.set(key, body.clone(), None).await;
        ConditionalResponse::resolve(if_none_match, etag, body, StatusCode::OK)
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }
}
