//! Preloader Module
//!
//! Warms caches for a batch of posts with bounded concurrency.

mod cache_preloader;
mod warmer;

pub use cache_preloader::{
    CachePreloader, PreloadOptions, PreloadReport, DEFAULT_MAX_CONCURRENT, DEFAULT_PRELOAD_TIMEOUT,
};
pub use warmer::{CacheWarmer, Warmer};
