//! API Handlers
//!
//! HTTP request handlers for each cache endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::cache::{shared, EnhancedCache, SharedCache, DEFAULT_STALE_TIME_MS, DEFAULT_TTL_MS};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::requests::validate_key;
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, Post, PreloadRequest, RevalidateRequest,
    RevalidateResponse, SetRequest, SetResponse, StatsResponse,
};
use crate::preloader::{CachePreloader, CacheWarmer, PreloadOptions, PreloadReport};
use crate::scheduler::TaskScheduler;
use crate::tags::{compose_cache_tags, revalidation_tags};

/// Preload batches allowed to run at once
const PRELOAD_BATCHES: usize = 2;

/// Default time budget for a whole preload batch
pub const DEFAULT_BATCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: SharedCache<Value>,
    /// Warms posts into `cache`
    pub preloader: Arc<CachePreloader<CacheWarmer, Post>>,
    /// Admits preload batches; closed on shutdown
    pub batches: TaskScheduler,
    /// Freshness window for entries set without one
    pub default_ttl_ms: u64,
    /// Stale window for entries set without one
    pub default_stale_ms: u64,
    /// Options for preload batches
    pub preload: PreloadOptions,
    /// Batches still running after this long are logged
    pub batch_timeout: Duration,
}

impl AppState {
    /// Creates a new AppState around the given cache store with default
    /// windows and preload options.
    pub fn new(cache: EnhancedCache<Value>) -> Self {
        Self::with_settings(
            cache,
            DEFAULT_TTL_MS,
            DEFAULT_STALE_TIME_MS,
            PreloadOptions::default(),
        )
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        let mut state = Self::with_settings(
            EnhancedCache::new(config.max_entries),
            config.default_ttl_ms,
            config.default_stale_ms,
            config.preload_options(),
        );
        state.batch_timeout = Duration::from_millis(config.batch_timeout_ms);
        state
    }

    pub fn with_settings(
        cache: EnhancedCache<Value>,
        default_ttl_ms: u64,
        default_stale_ms: u64,
        preload: PreloadOptions,
    ) -> Self {
        let cache = shared(cache);
        let warmer = CacheWarmer::with_windows(cache.clone(), default_ttl_ms, default_stale_ms);

        Self {
            cache,
            preloader: Arc::new(CachePreloader::new(warmer)),
            batches: TaskScheduler::new(PRELOAD_BATCHES),
            default_ttl_ms,
            default_stale_ms,
            preload,
            batch_timeout: DEFAULT_BATCH_TIMEOUT,
        }
    }
}

/// Handler for GET /cache/:key
///
/// Stale entries are returned with `is_stale: true`.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: reads may reap expired entries
    let lookup = state.cache.write().await.get(&key);

    match lookup.data {
        Some(data) if lookup.exists => Ok(Json(GetResponse::new(key, data, lookup.is_stale))),
        _ => Err(AppError::NotFound(key)),
    }
}

/// Handler for PUT /cache/:key
pub async fn set_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl_ms.unwrap_or(state.default_ttl_ms);
    let stale_time = req.stale_time_ms.unwrap_or(state.default_stale_ms);

    // Untagged writes stay untagged instead of landing in section:general.
    let has_tag_input = req.country.is_some() || !req.sections.is_empty() || !req.tags.is_empty();
    let tags = if has_tag_input {
        compose_cache_tags(&req.tag_options())
    } else {
        Vec::new()
    };

    state
        .cache
        .write()
        .await
        .set_tagged(key.clone(), req.data, ttl, stale_time, &tags);

    Ok(Json(SetResponse::new(key, tags)))
}

/// Handler for DELETE /cache/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if state.cache.write().await.delete(&key) {
        Ok(Json(DeleteResponse::new(key)))
    } else {
        Err(AppError::NotFound(key))
    }
}

/// Handler for POST /revalidate
///
/// Drops every entry carrying one of the requested tags.
pub async fn revalidate_handler(
    State(state): State<AppState>,
    Json(req): Json<RevalidateRequest>,
) -> Result<Json<RevalidateResponse>> {
    let tags = revalidation_tags(&req.tag_options());
    if tags.is_empty() {
        return Err(AppError::InvalidRequest(
            "Nothing to revalidate: give a country, sections or tags".to_string(),
        ));
    }

    let invalidated = state.cache.write().await.invalidate_tags(&tags);
    info!(tags = ?tags, invalidated, "Revalidated cache tags");

    Ok(Json(RevalidateResponse { tags, invalidated }))
}

/// Handler for POST /preload
///
/// Warms the given posts and reports how many succeeded.
pub async fn preload_handler(
    State(state): State<AppState>,
    Json(req): Json<PreloadRequest>,
) -> Result<Json<PreloadReport>> {
    let mut options = state.preload;
    if let Some(max_concurrent) = req.max_concurrent {
        options.max_concurrent = max_concurrent;
    }

    let preloader = &state.preloader;
    let posts = &req.posts;
    let batch_timeout = state.batch_timeout;

    // The batch always runs to completion; an overrun is only reported.
    let report = state
        .batches
        .schedule_task(batch_timeout, |signal| async move {
            let report = preloader.preload_posts(posts, options).await;
            if signal.is_aborted() {
                warn!(
                    posts = report.total,
                    timeout_ms = batch_timeout.as_millis() as u64,
                    "Preload batch ran past its timeout"
                );
            }
            report
        })
        .await?;

    Ok(Json(report))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.read().await.stats();

    Json(StatsResponse::new(
        &stats,
        state.preloader.queue_size(),
        state.preloader.in_flight(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
