//! Request DTOs for the cache API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::MAX_KEY_LENGTH;
use crate::models::Post;
use crate::tags::CacheTagOptions;

/// Request body for `PUT /cache/:key`
///
/// Tags are composed from `country` and `sections` (with the general
/// section fallback) plus `tags` verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The value to store
    pub data: Value,
    /// Freshness window in milliseconds
    #[serde(default)]
    pub ttl_ms: Option<u64>,
    /// Stale window in milliseconds
    #[serde(default)]
    pub stale_time_ms: Option<u64>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub sections: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SetRequest {
    pub fn tag_options(&self) -> CacheTagOptions {
        CacheTagOptions {
            country: self.country.clone(),
            sections: self.sections.clone(),
            extra_tags: self.tags.clone(),
        }
    }
}

/// Validates a cache key taken from the path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_key(key: &str) -> Option<String> {
    if key.trim().is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!("Key exceeds maximum length of {MAX_KEY_LENGTH} bytes"));
    }
    None
}

/// Request body for `POST /revalidate`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RevalidateRequest {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub sections: Vec<String>,
    /// Tags invalidated as given
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RevalidateRequest {
    pub fn tag_options(&self) -> CacheTagOptions {
        CacheTagOptions {
            country: self.country.clone(),
            sections: self.sections.clone(),
            extra_tags: self.tags.clone(),
        }
    }
}

/// Request body for `POST /preload`
#[derive(Debug, Clone, Deserialize)]
pub struct PreloadRequest {
    pub posts: Vec<Post>,
    /// Overrides the configured concurrency for this batch
    #[serde(default)]
    pub max_concurrent: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"data": {"title": "hello"}}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.data["title"], "hello");
        assert!(req.ttl_ms.is_none());
        assert!(req.tags.is_empty());
    }

    #[test]
    fn test_set_request_tag_options() {
        let json = r#"{"data": 1, "country": "NG", "sections": ["Business"], "tags": ["home"]}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        let options = req.tag_options();

        assert_eq!(options.country.as_deref(), Some("NG"));
        assert_eq!(options.sections, vec!["Business"]);
        assert_eq!(options.extra_tags, vec!["home"]);
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("").is_some());
        assert!(validate_key("  ").is_some());
        assert!(validate_key(&"x".repeat(MAX_KEY_LENGTH + 1)).is_some());
        assert!(validate_key("post:ng:budget").is_none());
    }

    #[test]
    fn test_revalidate_request_defaults() {
        let req: RevalidateRequest = serde_json::from_str("{}").unwrap();
        assert!(req.country.is_none());
        assert!(req.sections.is_empty());
        assert!(req.tags.is_empty());
    }

    #[test]
    fn test_preload_request_deserialize() {
        let json = r#"{"posts": [{"id": 1, "slug": "a", "country": "ng"}], "max_concurrent": 2}"#;
        let req: PreloadRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.posts.len(), 1);
        assert_eq!(req.max_concurrent, Some(2));
    }
}
