//! Configuration Module
//!
//! Handles loading and validating server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL_SECONDS};
use crate::error::ConfigError;

const DEFAULT_JWT_SECRET: &str = "tenant-orders-jwt-secret";
const DEFAULT_AUTH_PASSWORD: &str = "onerail";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of entries the response cache can hold
    pub cache_max_entries: usize,
    /// Default cache TTL in seconds, also used as the public `max-age`
    pub cache_ttl_seconds: u64,
    /// Seconds between background sweeps of expired entries
    pub cache_cleanup_interval: u64,
    /// HMAC secret used to sign and verify JWTs
    pub jwt_secret: String,
    /// Lifetime of issued tokens in seconds
    pub jwt_expires_in_secs: u64,
    /// Shared password accepted at login
    pub auth_password: String,
    /// Rate limit window length in milliseconds
    pub rate_limit_window_ms: u64,
    /// Requests allowed per organization per window
    pub rate_limit_max: u32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CACHE_TTL_SECONDS` - Default TTL in seconds (default: 600)
    /// - `CACHE_CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 30)
    /// - `JWT_SECRET` - Token signing secret
    /// - `JWT_EXPIRES_IN_SECS` - Token lifetime in seconds (default: 3600)
    /// - `AUTH_PASSWORD` - Shared login password (default: onerail)
    /// - `RATE_LIMIT_WINDOW_MS` - Rate limit window (default: 60000)
    /// - `RATE_LIMIT_MAX` - Requests per organization per window (default: 30)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            cache_ttl_seconds: env_or("CACHE_TTL_SECONDS", defaults.cache_ttl_seconds),
            cache_cleanup_interval: env_or(
                "CACHE_CLEANUP_INTERVAL",
                defaults.cache_cleanup_interval,
            ),
            jwt_secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_expires_in_secs: env_or("JWT_EXPIRES_IN_SECS", defaults.jwt_expires_in_secs),
            auth_password: env::var("AUTH_PASSWORD").unwrap_or(defaults.auth_password),
            rate_limit_window_ms: env_or("RATE_LIMIT_WINDOW_MS", defaults.rate_limit_window_ms),
            rate_limit_max: env_or("RATE_LIMIT_MAX", defaults.rate_limit_max),
        }
    }

    /// Rejects settings the service cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_max_entries == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.cache_ttl_seconds == 0 {
            return Err(ConfigError::ZeroTtl);
        }
        if self.cache_cleanup_interval == 0 {
            return Err(ConfigError::NotPositive("CACHE_CLEANUP_INTERVAL"));
        }
        if self.jwt_expires_in_secs == 0 {
            return Err(ConfigError::NotPositive("JWT_EXPIRES_IN_SECS"));
        }
        if self.rate_limit_window_ms == 0 {
            return Err(ConfigError::NotPositive("RATE_LIMIT_WINDOW_MS"));
        }
        if self.rate_limit_max == 0 {
            return Err(ConfigError::NotPositive("RATE_LIMIT_MAX"));
        }
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingRequired("JWT_SECRET"));
        }
        if self.auth_password.is_empty() {
            return Err(ConfigError::MissingRequired("AUTH_PASSWORD"));
        }
        Ok(())
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_max_entries: DEFAULT_MAX_ENTRIES,
            cache_ttl_seconds: DEFAULT_TTL_SECONDS,
            cache_cleanup_interval: 30,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_expires_in_secs: 3600,
            auth_password: DEFAULT_AUTH_PASSWORD.to_string(),
            rate_limit_window_ms: 60_000,
            rate_limit_max: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_max_entries, 1000);
        assert_eq!(config.cache_ttl_seconds, 600);
        assert_eq!(config.rate_limit_window_ms, 60_000);
        assert_eq!(config.rate_limit_max, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = Config {
            cache_max_entries: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity));
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let config = Config {
            cache_ttl_seconds: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTtl));
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        let config = Config {
            jwt_secret: String::new(),
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingRequired("JWT_SECRET"))
        );
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        env::set_var("TENANT_ORDERS_TEST_PORT", "not-a-number");
        assert_eq!(env_or("TENANT_ORDERS_TEST_PORT", 8080u16), 8080);
        env::set_var("TENANT_ORDERS_TEST_PORT", "9090");
        assert_eq!(env_or("TENANT_ORDERS_TEST_PORT", 8080u16), 9090);
        env::remove_var("TENANT_ORDERS_TEST_PORT");
    }
}
