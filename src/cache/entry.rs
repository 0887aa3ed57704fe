//! Cache Entry Module
//!
//! Defines a single cached response payload together with its expiry.

use std::time::{Duration, Instant};

use serde_json::Value;

// == Cache Entry ==
/// A cached payload with its insertion time and TTL.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Value,
    /// When the entry was inserted (or last overwritten)
    pub inserted_at: Instant,
    /// Time-to-live in seconds, fixed at insertion
    pub ttl_seconds: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry that expires `ttl_seconds` from now.
    pub fn new(value: Value, ttl_seconds: u64) -> Self {
        Self {
            value,
            inserted_at: Instant::now(),
            ttl_seconds,
        }
    }

    /// Instant at which the entry stops being served.
    pub fn expires_at(&self) -> Instant {
        self.inserted_at + Duration::from_secs(self.ttl_seconds)
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is at or past its expiry
    /// instant, so a zero TTL is expired immediately.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Same as [`is_expired`](Self::is_expired) against a caller-supplied clock reading.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }

    /// Remaining lifetime, saturating at zero once expired.
    #[cfg(test)]
    fn ttl_remaining(&self) -> Duration {
        self.expires_at().saturating_duration_since(Instant::now())
    }
}
