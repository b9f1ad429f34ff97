//! Edition Cache - content caching for multi-edition news sites
//!
//! Stale-while-revalidate entries, tag-scoped invalidation and
//! bounded-concurrency cache warming.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod preloader;
pub mod scheduler;
pub mod tags;

pub use api::AppState;
pub use cache::{EnhancedCache, SharedCache};
pub use config::Config;
pub use preloader::{CachePreloader, PreloadOptions};
pub use scheduler::TaskScheduler;
pub use tags::{compose_cache_tags, compose_country_section_tags, CacheTagOptions};
