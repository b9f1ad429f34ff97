//! Cache Entry Module
//!
//! Defines individual cache entries and the result of reading one.

use serde::Serialize;

// == Cache Entry ==
/// A stored value together with its two time windows.
///
/// The entry is fresh while its age is within `ttl`, stale while within
/// `stale_time`, and expired afterwards. `stale_time >= ttl` always holds.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value
    pub data: T,
    /// Insertion timestamp (Unix milliseconds)
    pub timestamp: u64,
    /// Freshness window in milliseconds
    pub ttl: u64,
    /// Window after which the entry is dropped, in milliseconds
    pub stale_time: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates an entry stamped at `now_ms`.
    ///
    /// A `stale_time` shorter than `ttl` is raised to `ttl`.
    pub fn new(data: T, now_ms: u64, ttl: u64, stale_time: u64) -> Self {
        Self {
            data,
            timestamp: now_ms,
            ttl,
            stale_time: stale_time.max(ttl),
        }
    }

    // == Age ==
    /// Milliseconds elapsed since insertion. A clock that went backwards
    /// yields an age of zero.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.timestamp)
    }

    /// True once the entry has outlived its freshness window.
    pub fn is_stale(&self, now_ms: u64) -> bool {
        self.age_ms(now_ms) > self.ttl
    }

    /// True once the entry has outlived its stale window.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.age_ms(now_ms) > self.stale_time
    }
}

// == Cache Lookup ==
/// Outcome of reading a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheLookup<T> {
    /// The value, when the key exists
    pub data: Option<T>,
    /// Set for stale hits and for entries reaped by this read
    pub is_stale: bool,
    /// Whether a usable value was returned
    pub exists: bool,
}

impl<T> CacheLookup<T> {
    /// Key not present.
    pub fn missing() -> Self {
        Self {
            data: None,
            is_stale: false,
            exists: false,
        }
    }

    /// Key was present but past its stale window and has been dropped.
    pub fn expired() -> Self {
        Self {
            data: None,
            is_stale: true,
            exists: false,
        }
    }

    /// Key present with a usable value.
    pub fn hit(data: T, is_stale: bool) -> Self {
        Self {
            data: Some(data),
            is_stale,
            exists: true,
        }
    }
}
