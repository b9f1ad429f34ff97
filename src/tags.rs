//! Cache Tag Module
//!
//! Builds the `scope:value` strings used to store entries and to invalidate
//! them after content changes. The tag format is shared with every consumer
//! of invalidation, so changing it breaks revalidation.

use std::collections::HashSet;

/// Tag emitted when no section survives normalization.
pub const GENERAL_SECTION_TAG: &str = "section:general";

// == Tag Options ==
/// Inputs to [`compose_cache_tags`].
#[derive(Debug, Clone, Default)]
pub struct CacheTagOptions {
    /// Edition code, e.g. `ng`
    pub country: Option<String>,
    /// Section slugs, e.g. `business`
    pub sections: Vec<String>,
    /// Pre-built tags added without a prefix
    pub extra_tags: Vec<String>,
}

impl CacheTagOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.sections.push(section.into());
        self
    }

    pub fn sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sections.extend(sections.into_iter().map(Into::into));
        self
    }

    pub fn extra_tag(mut self, tag: impl Into<String>) -> Self {
        self.extra_tags.push(tag.into());
        self
    }
}

// == Normalization ==
/// Trims and lower-cases a tag component. Blank input yields `None`.
pub fn normalize(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Ordered set that remembers first appearance.
#[derive(Default)]
struct TagSet {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl TagSet {
    fn insert(&mut self, tag: String) {
        if self.seen.insert(tag.clone()) {
            self.ordered.push(tag);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

// == Compose ==
/// Derives the tag set for a piece of content.
///
/// Emits `country:<c>` when a country is given, one `section:<s>` per
/// distinct section (or [`GENERAL_SECTION_TAG`] when there are none), then
/// the extra tags as-is. Every component is normalized and blanks are
/// dropped. Output is in order of first appearance.
pub fn compose_cache_tags(options: &CacheTagOptions) -> Vec<String> {
    collect_tags(options, true)
}

/// Tags to invalidate for a content change.
///
/// Same shape as [`compose_cache_tags`] but without the general-section
/// fallback, so revalidating a whole edition does not also hit every
/// unsectioned entry of other editions.
pub fn revalidation_tags(options: &CacheTagOptions) -> Vec<String> {
    collect_tags(options, false)
}

fn collect_tags(options: &CacheTagOptions, general_fallback: bool) -> Vec<String> {
    let mut tags = TagSet::default();

    if let Some(country) = options.country.as_deref().and_then(normalize) {
        tags.insert(format!("country:{country}"));
    }

    let sections: Vec<String> = options
        .sections
        .iter()
        .filter_map(|section| normalize(section))
        .collect();

    if sections.is_empty() {
        if general_fallback {
            tags.insert(GENERAL_SECTION_TAG.to_string());
        }
    } else {
        for section in sections {
            tags.insert(format!("section:{section}"));
        }
    }

    for tag in options.extra_tags.iter().filter_map(|tag| normalize(tag)) {
        tags.insert(tag);
    }

    tags.into_vec()
}

/// Shorthand for a country plus any number of sections.
pub fn compose_country_section_tags<S: AsRef<str>>(country: &str, sections: &[S]) -> Vec<String> {
    compose_cache_tags(&CacheTagOptions {
        country: Some(country.to_string()),
        sections: sections.iter().map(|s| s.as_ref().to_string()).collect(),
        extra_tags: Vec::new(),
    })
}

// == Entity Tags ==
/// Tag for a single article within an edition: `post:<country>:<id>`.
pub fn post_tag(country: &str, id: impl std::fmt::Display) -> String {
    entity_tag("post", country, &id.to_string())
}

/// Tag for a category listing within an edition: `category:<country>:<slug>`.
pub fn category_tag(country: &str, slug: &str) -> String {
    entity_tag("category", country, slug)
}

fn entity_tag(scope: &str, country: &str, value: &str) -> String {
    let country = normalize(country).unwrap_or_else(|| "all".to_string());
    let value = normalize(value).unwrap_or_default();
    format!("{scope}:{country}:{value}")
}
