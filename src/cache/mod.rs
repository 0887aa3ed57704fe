//! Cache Module
//!
//! In-memory response caching: key building, a bounded TTL/LRU store,
//! ETag digests, conditional responses and invalidation on write.

mod entry;
mod etag;
mod keys;
mod lru;
mod respond;
mod response_cache;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use etag::digest;
pub use keys::{item_key, list_key, list_prefix, Entity};
pub use lru::LruTracker;
pub use respond::{
    respond_cached_or_fresh, respond_with_status, ConditionalResponse, PublicCached, Revalidation,
};
pub use response_cache::ResponseCache;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Default number of entries the store holds
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Default entry TTL in seconds
pub const DEFAULT_TTL_SECONDS: u64 = 600;
