//! Post model
//!
//! The unit of content warmed into the cache.

use serde::{Deserialize, Serialize};

use crate::tags::{category_tag, compose_cache_tags, normalize, post_tag, CacheTagOptions};

/// An article as delivered by an edition's content backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Backend id, unique within an edition
    pub id: u64,
    /// URL slug
    pub slug: String,
    /// Headline
    #[serde(default)]
    pub title: String,
    /// Edition code, e.g. `ng`
    pub country: String,
    /// Section slugs the post is filed under
    #[serde(default)]
    pub sections: Vec<String>,
    /// Additional invalidation tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Post {
    /// Cache key: `post:<country>:<slug>`.
    pub fn cache_key(&self) -> String {
        let country = normalize(&self.country).unwrap_or_else(|| "all".to_string());
        let slug = normalize(&self.slug).unwrap_or_else(|| self.id.to_string());
        format!("post:{country}:{slug}")
    }

    /// Country and section tags, plus the post's own entity tag, one
    /// category tag per section and any explicit tags.
    pub fn cache_tags(&self) -> Vec<String> {
        let mut options = CacheTagOptions::new()
            .country(self.country.clone())
            .sections(self.sections.iter().cloned())
            .extra_tag(post_tag(&self.country, self.id));

        for section in self.sections.iter().filter(|s| normalize(s).is_some()) {
            options = options.extra_tag(category_tag(&self.country, section));
        }
        for tag in &self.tags {
            options = options.extra_tag(tag.clone());
        }

        compose_cache_tags(&options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        Post {
            id: 42,
            slug: "Budget-Day".to_string(),
            title: "Budget day".to_string(),
            country: "NG".to_string(),
            sections: vec!["Business".to_string(), " ".to_string()],
            tags: vec!["homepage".to_string()],
        }
    }

    #[test]
    fn test_cache_key_is_normalized() {
        assert_eq!(post().cache_key(), "post:ng:budget-day");
    }

    #[test]
    fn test_cache_key_falls_back_to_id() {
        let mut post = post();
        post.slug = "  ".to_string();
        assert_eq!(post.cache_key(), "post:ng:42");
    }

    #[test]
    fn test_cache_tags() {
        assert_eq!(
            post().cache_tags(),
            vec![
                "country:ng",
                "section:business",
                "post:ng:42",
                "category:ng:business",
                "homepage",
            ]
        );
    }

    #[test]
    fn test_deserialize_minimal() {
        let post: Post =
            serde_json::from_str(r#"{"id": 1, "slug": "a", "country": "za"}"#).unwrap();

        assert!(post.sections.is_empty());
        assert_eq!(post.cache_tags(), vec!["country:za", "section:general", "post:za:1"]);
    }
}
