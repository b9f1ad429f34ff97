//! Cache Store Module
//!
//! Bounded key-value store combining HashMap storage with insertion-order
//! eviction, fresh/stale/expired windows and a tag index.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::cache::{
    CacheEntry, CacheLookup, CacheStats, Clock, InsertionOrder, SystemClock, TagIndex,
    DEFAULT_STALE_TIME_MS, DEFAULT_TTL_MS,
};

// == Enhanced Cache ==
/// In-memory cache with stale-while-revalidate reads.
///
/// Nothing runs in the background: expired entries are reaped when read,
/// and the oldest-inserted key is evicted when a new key would exceed
/// capacity.
#[derive(Debug)]
pub struct EnhancedCache<T> {
    entries: HashMap<String, CacheEntry<T>>,
    order: InsertionOrder,
    tags: TagIndex,
    stats: CacheStats,
    max_size: usize,
    clock: Arc<dyn Clock>,
}

impl<T> EnhancedCache<T> {
    // == Constructor ==
    /// Creates a store holding at most `max_size` keys (at least one).
    pub fn new(max_size: usize) -> Self {
        Self::with_clock(max_size, Arc::new(SystemClock))
    }

    /// Creates a store that reads time from `clock`.
    pub fn with_clock(max_size: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            tags: TagIndex::new(),
            stats: CacheStats::new(),
            max_size: max_size.max(1),
            clock,
        }
    }

    // == Set ==
    /// Stores `data` under `key` with the given windows in milliseconds.
    ///
    /// A new key arriving at capacity first evicts the oldest-inserted key.
    /// Overwriting keeps the key's place in the eviction order, resets its
    /// timestamp and drops any tags it had.
    pub fn set(&mut self, key: impl Into<String>, data: T, ttl: u64, stale_time: u64) {
        let key = key.into();

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_size {
            self.evict_oldest();
        }

        let entry = CacheEntry::new(data, self.clock.now_ms(), ttl, stale_time);
        self.entries.insert(key.clone(), entry);
        self.order.push_newest(&key);
        self.tags.untag(&key);

        self.stats.set_total_entries(self.entries.len());
    }

    /// Stores with the default five minute ttl and ten minute stale window.
    pub fn set_default(&mut self, key: impl Into<String>, data: T) {
        self.set(key, data, DEFAULT_TTL_MS, DEFAULT_STALE_TIME_MS);
    }

    // == Set Tagged ==
    /// Stores like [`set`](Self::set) and records the key under `tags`.
    pub fn set_tagged<S: AsRef<str>>(
        &mut self,
        key: impl Into<String>,
        data: T,
        ttl: u64,
        stale_time: u64,
        tags: &[S],
    ) {
        let key = key.into();
        self.set(key.clone(), data, ttl, stale_time);
        self.tags.tag(&key, tags);
    }

    // == Delete ==
    /// Removes an entry. Returns whether it existed.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.remove_entry(key);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Clear ==
    /// Removes every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.tags.clear();
        self.stats.set_total_entries(0);
    }

    // == Invalidate ==
    /// Removes every entry carrying `tag`. Returns how many were removed.
    pub fn invalidate_tag(&mut self, tag: &str) -> usize {
        let keys = self.tags.keys_for(tag);
        let removed = keys.iter().filter(|key| self.remove_entry(key)).count();

        self.stats.record_invalidations(removed);
        self.stats.set_total_entries(self.entries.len());
        debug!(tag, removed, "Invalidated cache tag");
        removed
    }

    /// Removes every entry carrying any of `tags`.
    pub fn invalidate_tags<S: AsRef<str>>(&mut self, tags: &[S]) -> usize {
        tags.iter()
            .map(|tag| self.invalidate_tag(tag.as_ref()))
            .sum()
    }

    // == Introspection ==
    /// Current number of entries, including stale and not-yet-reaped ones.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Keys from oldest to newest insertion.
    pub fn keys(&self) -> Vec<String> {
        self.order.keys()
    }

    /// Tags recorded for `key`.
    pub fn tags_of(&self, key: &str) -> &[String] {
        self.tags.tags_for(key)
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Internals ==
    fn evict_oldest(&mut self) {
        if let Some(oldest) = self.order.pop_oldest() {
            self.remove_entry(&oldest);
            self.stats.record_eviction();
            debug!(key = %oldest, "Evicted oldest cache entry");
        }
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        self.order.remove(key);
        self.tags.untag(key);
        self.entries.remove(key).is_some()
    }
}

impl<T: Clone> EnhancedCache<T> {
    // == Get ==
    /// Reads `key`.
    ///
    /// Entries past their stale window are removed and reported with
    /// `exists: false, is_stale: true`. Stale entries are still returned;
    /// refreshing them is up to the caller.
    pub fn get(&mut self, key: &str) -> CacheLookup<T> {
        let now = self.clock.now_ms();

        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            return CacheLookup::missing();
        };

        if entry.is_expired(now) {
            self.remove_entry(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            self.stats.set_total_entries(self.entries.len());
            debug!(key, "Reaped expired cache entry on read");
            return CacheLookup::expired();
        }

        let is_stale = entry.is_stale(now);
        let data = entry.data.clone();
        self.stats.record_hit(is_stale);
        CacheLookup::hit(data, is_stale)
    }
}
