//! API Module
//!
//! HTTP handlers and routing for the cache layer.
//!
//! # Endpoints
//! - `GET|PUT|DELETE /cache/:key` - Read, store or delete an entry
//! - `POST /revalidate` - Invalidate entries by tag
//! - `POST /preload` - Warm a batch of posts
//! - `GET /stats` - Cache and preload statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
