//! Per-post warming routines.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::cache::{SharedCache, DEFAULT_STALE_TIME_MS, DEFAULT_TTL_MS};
use crate::models::Post;
use crate::scheduler::AbortSignal;

// == Warmer ==
/// Warms whatever downstream caches a single item feeds.
///
/// Errors are reported back to the preloader, which logs and counts them.
/// `signal` is aborted once the post's time budget runs out; warmers may
/// stop early when it fires, but nothing forces them to.
#[async_trait]
pub trait Warmer<P: Sync>: Send + Sync {
    async fn preload_post(&self, post: &P, signal: AbortSignal) -> anyhow::Result<()>;
}

// == Cache Warmer ==
/// Default warmer: stores each post as JSON in a shared cache, tagged so
/// it can be revalidated by country, section or id.
#[derive(Debug, Clone)]
pub struct CacheWarmer {
    cache: SharedCache<Value>,
    ttl: u64,
    stale_time: u64,
}

impl CacheWarmer {
    pub fn new(cache: SharedCache<Value>) -> Self {
        Self::with_windows(cache, DEFAULT_TTL_MS, DEFAULT_STALE_TIME_MS)
    }

    /// Uses the given ttl and stale window (milliseconds) for warmed entries.
    pub fn with_windows(cache: SharedCache<Value>, ttl: u64, stale_time: u64) -> Self {
        Self {
            cache,
            ttl,
            stale_time,
        }
    }

    pub fn cache(&self) -> &SharedCache<Value> {
        &self.cache
    }
}

#[async_trait]
impl Warmer<Post> for CacheWarmer {
    async fn preload_post(&self, post: &Post, _signal: AbortSignal) -> anyhow::Result<()> {
        let value = serde_json::to_value(post)?;
        let key = post.cache_key();
        let tags = post.cache_tags();

        self.cache
            .write()
            .await
            .set_tagged(key.clone(), value, self.ttl, self.stale_time, &tags);

        debug!(key = %key, tags = ?tags, "Warmed post");
        Ok(())
    }
}
