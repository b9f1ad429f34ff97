//! Cache Module
//!
//! Bounded in-memory cache whose entries move through fresh, stale and
//! expired windows, with insertion-order eviction and tag-scoped invalidation.

mod clock;
mod entry;
mod order;
mod stats;
mod store;
mod tag_index;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CacheEntry, CacheLookup};
pub use order::InsertionOrder;
pub use stats::CacheStats;
pub use store::EnhancedCache;
pub use tag_index::TagIndex;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Default capacity of a cache store
pub const DEFAULT_MAX_SIZE: usize = 1000;

/// Default freshness window in milliseconds (5 minutes)
pub const DEFAULT_TTL_MS: u64 = 300_000;

/// Default stale window in milliseconds (10 minutes)
pub const DEFAULT_STALE_TIME_MS: u64 = 600_000;

/// Process-wide handle to a cache store.
pub type SharedCache<T> = Arc<RwLock<EnhancedCache<T>>>;

/// Wraps a store into a [`SharedCache`].
pub fn shared<T>(cache: EnhancedCache<T>) -> SharedCache<T> {
    Arc::new(RwLock::new(cache))
}
