//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use crate::api::rate_limit::OrgRateLimiter;
use crate::cache::{CacheStore, ResponseCache};
use crate::config::Config;
use crate::error::ConfigError;
use crate::repository::Database;
use crate::services::Authenticator;

/// Application state shared across all handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    /// Response cache handle
    pub cache: ResponseCache,
    /// In-memory tables
    pub db: Database,
    pub auth: Arc<Authenticator>,
    /// Per-organization request limiter
    pub limiter: Arc<OrgRateLimiter>,
}

impl AppState {
    pub fn new(
        cache: ResponseCache,
        db: Database,
        auth: Authenticator,
        limiter: OrgRateLimiter,
    ) -> Self {
        Self {
            cache,
            db,
            auth: Arc::new(auth),
            limiter: Arc::new(limiter),
        }
    }

    /// Validates `config` and wires every component from it.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let store = CacheStore::new(config.cache_max_entries, config.cache_ttl_seconds)?;
        let limiter = OrgRateLimiter::new(
            Duration::from_millis(config.rate_limit_window_ms),
            config.rate_limit_max,
        )?;

        Ok(Self::new(
            ResponseCache::new(store),
            Database::new(),
            Authenticator::from_config(config),
            limiter,
        ))
    }
}
