//! Response DTOs for the cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;

/// Response body for `GET /cache/:key`
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub key: String,
    pub data: Value,
    /// Served past its freshness window; the caller should refresh it
    pub is_stale: bool,
    pub exists: bool,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, data: Value, is_stale: bool) -> Self {
        Self {
            key: key.into(),
            data,
            is_stale,
            exists: true,
        }
    }
}

/// Response body for `PUT /cache/:key`
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
    /// Tags the entry was stored under
    pub tags: Vec<String>,
}

impl SetResponse {
    pub fn new(key: impl Into<String>, tags: Vec<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
            tags,
        }
    }
}

/// Response body for `DELETE /cache/:key`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for `POST /revalidate`
#[derive(Debug, Clone, Serialize)]
pub struct RevalidateResponse {
    /// Tags that were invalidated, normalized
    pub tags: Vec<String>,
    /// Entries removed
    pub invalidated: usize,
}

/// Response body for `GET /stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub fresh_hits: u64,
    pub stale_hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub evictions: u64,
    pub invalidations: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate ((fresh + stale hits) / reads)
    pub hit_rate: f64,
    /// Posts waiting for a preload slot
    pub preload_queue: usize,
    /// Posts being preloaded right now
    pub preload_in_flight: usize,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats, preload_queue: usize, preload_in_flight: usize) -> Self {
        Self {
            fresh_hits: stats.fresh_hits,
            stale_hits: stats.stale_hits,
            misses: stats.misses,
            expirations: stats.expirations,
            evictions: stats.evictions,
            invalidations: stats.invalidations,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            preload_queue,
            preload_in_flight,
        }
    }
}

/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
