//! Tag Index Module
//!
//! Maps invalidation tags to the cache keys stored under them.

use std::collections::{HashMap, HashSet};

use crate::tags::normalize;

// == Tag Index ==
/// Two-way mapping between keys and their tags.
#[derive(Debug, Default)]
pub struct TagIndex {
    keys_by_tag: HashMap<String, HashSet<String>>,
    tags_by_key: HashMap<String, Vec<String>>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    // == Tag ==
    /// Replaces the tags recorded for `key`. Tags are normalized; blanks
    /// are ignored.
    pub fn tag<S: AsRef<str>>(&mut self, key: &str, tags: &[S]) {
        self.untag(key);

        let mut recorded: Vec<String> = Vec::new();
        for tag in tags.iter().filter_map(|t| normalize(t.as_ref())) {
            if recorded.contains(&tag) {
                continue;
            }
            self.keys_by_tag
                .entry(tag.clone())
                .or_default()
                .insert(key.to_string());
            recorded.push(tag);
        }

        if !recorded.is_empty() {
            self.tags_by_key.insert(key.to_string(), recorded);
        }
    }

    // == Untag ==
    /// Forgets every tag of `key`.
    pub fn untag(&mut self, key: &str) {
        let Some(tags) = self.tags_by_key.remove(key) else {
            return;
        };

        for tag in tags {
            if let Some(keys) = self.keys_by_tag.get_mut(&tag) {
                keys.remove(key);
                if keys.is_empty() {
                    self.keys_by_tag.remove(&tag);
                }
            }
        }
    }

    /// Keys currently carrying `tag`.
    pub fn keys_for(&self, tag: &str) -> Vec<String> {
        normalize(tag)
            .and_then(|tag| self.keys_by_tag.get(&tag))
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Tags recorded for `key`, in the order they were given.
    pub fn tags_for(&self, key: &str) -> &[String] {
        self.tags_by_key
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.keys_by_tag.clear();
        self.tags_by_key.clear();
    }
}
