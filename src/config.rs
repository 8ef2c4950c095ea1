//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Secret used when `JWT_SECRET` is not set. Only suitable for development.
pub const DEV_JWT_SECRET: &str = "insecure-development-secret";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Item cache TTL in seconds
    pub cache_ttl: u64,
    /// Maximum number of entries the in-memory cache backend can hold
    pub cache_max_entries: usize,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Redis connection URL; the in-memory backend is used when unset
    pub redis_url: Option<String>,
    /// HMAC secret for signing tokens
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    pub access_token_ttl: u64,
    /// Refresh token lifetime in seconds
    pub refresh_token_ttl: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_TTL` - Item cache TTL in seconds (default: 300, minimum 1)
    /// - `CACHE_MAX_ENTRIES` - In-memory cache capacity (default: 1000)
    /// - `CLEANUP_INTERVAL` - Expired entry sweep in seconds (default: 60)
    /// - `REDIS_URL` - Use Redis as the cache backend (default: unset)
    /// - `JWT_SECRET` - Token signing secret (default: development secret)
    /// - `ACCESS_TOKEN_TTL` - Access token lifetime in seconds (default: 300)
    /// - `REFRESH_TOKEN_TTL` - Refresh token lifetime in seconds (default: 86400)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cache_ttl: env_or("CACHE_TTL", defaults.cache_ttl).max(1),
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries).max(1),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval).max(1),
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty()),
            jwt_secret: env::var("JWT_SECRET")
                .ok()
                .filter(|secret| !secret.is_empty())
                .unwrap_or(defaults.jwt_secret),
            access_token_ttl: env_or("ACCESS_TOKEN_TTL", defaults.access_token_ttl),
            refresh_token_ttl: env_or("REFRESH_TOKEN_TTL", defaults.refresh_token_ttl),
        }
    }

    /// Item cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// True when no signing secret was configured.
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_ttl: 300,
            cache_max_entries: 1000,
            cleanup_interval: 60,
            redis_url: None,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            access_token_ttl: 300,
            refresh_token_ttl: 86_400,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
