//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{DEFAULT_MAX_SIZE, DEFAULT_STALE_TIME_MS, DEFAULT_TTL_MS};
use crate::api::DEFAULT_BATCH_TIMEOUT;
use crate::preloader::{PreloadOptions, DEFAULT_MAX_CONCURRENT, DEFAULT_PRELOAD_TIMEOUT};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Default freshness window in milliseconds
    pub default_ttl_ms: u64,
    /// Default stale window in milliseconds
    pub default_stale_ms: u64,
    /// Posts warmed concurrently by a preload batch
    pub preload_max_concurrent: usize,
    /// Time budget per preloaded post in milliseconds
    pub task_timeout_ms: u64,
    /// Time budget for a whole preload batch in milliseconds
    pub batch_timeout_ms: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `DEFAULT_TTL_MS` - Freshness window (default: 300000)
    /// - `DEFAULT_STALE_MS` - Stale window (default: 600000)
    /// - `PRELOAD_MAX_CONCURRENT` - Preload concurrency (default: 4)
    /// - `TASK_TIMEOUT_MS` - Per-post preload timeout (default: 10000)
    /// - `BATCH_TIMEOUT_MS` - Preload batch timeout (default: 60000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries),
            default_ttl_ms: env_or("DEFAULT_TTL_MS", defaults.default_ttl_ms),
            default_stale_ms: env_or("DEFAULT_STALE_MS", defaults.default_stale_ms),
            preload_max_concurrent: env_or(
                "PRELOAD_MAX_CONCURRENT",
                defaults.preload_max_concurrent,
            ),
            task_timeout_ms: env_or("TASK_TIMEOUT_MS", defaults.task_timeout_ms),
            batch_timeout_ms: env_or("BATCH_TIMEOUT_MS", defaults.batch_timeout_ms),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }

    /// Preload options derived from this configuration.
    pub fn preload_options(&self) -> PreloadOptions {
        PreloadOptions {
            max_concurrent: self.preload_max_concurrent,
            timeout: Duration::from_millis(self.task_timeout_ms),
        }
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
            max_entries: DEFAULT_MAX_SIZE,
            default_ttl_ms: DEFAULT_TTL_MS,
            default_stale_ms: DEFAULT_STALE_TIME_MS,
            preload_max_concurrent: DEFAULT_MAX_CONCURRENT,
            task_timeout_ms: DEFAULT_PRELOAD_TIMEOUT.as_millis() as u64,
            batch_timeout_ms: DEFAULT_BATCH_TIMEOUT.as_millis() as u64,
            server_port: 3000,
        }
    }
}
