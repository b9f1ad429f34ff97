//! Cache Statistics Module
//!
//! Tracks how reads were served and why entries left the cache.

use serde::Serialize;

// == Cache Stats ==
/// Counters for a single cache store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Reads served within the freshness window
    pub fresh_hits: u64,
    /// Reads served past ttl but within the stale window
    pub stale_hits: u64,
    /// Reads of absent or expired keys
    pub misses: u64,
    /// Entries dropped by a read because they outlived their stale window
    pub expirations: u64,
    /// Entries dropped to make room for a new key
    pub evictions: u64,
    /// Entries dropped through tag invalidation
    pub invalidations: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// All reads that returned a value.
    pub fn hits(&self) -> u64 {
        self.fresh_hits + self.stale_hits
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing has been read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits() + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits() as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self, is_stale: bool) {
        if is_stale {
            self.stale_hits += 1;
        } else {
            self.fresh_hits += 1;
        }
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_invalidations(&mut self, count: usize) {
        self.invalidations += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
