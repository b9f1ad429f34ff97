//! Domain and transfer models
//!
//! `Post` is the content unit the preloader warms; the request and
//! response DTOs serialize the HTTP bodies.

pub mod post;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use post::Post;
pub use requests::{PreloadRequest, RevalidateRequest, SetRequest};
pub use responses::{
    DeleteResponse, ErrorResponse, GetResponse, HealthResponse, RevalidateResponse, SetResponse,
    StatsResponse,
};
