//! Insertion Order Module
//!
//! Tracks the order in which keys were first inserted, for eviction.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct Link {
    prev: Option<String>,
    next: Option<String>,
}

// == Insertion Order ==
/// Doubly linked list of keys threaded through a `HashMap`.
///
/// `oldest` points at the first-inserted key still tracked and `newest` at
/// the last. Re-inserting a tracked key does not move it; reads never
/// reorder anything.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    links: HashMap<String, Link>,
    oldest: Option<String>,
    newest: Option<String>,
}

impl InsertionOrder {
    // == Constructor ==
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push Newest ==
    /// Appends a key as the newest one.
    ///
    /// Returns `false` and leaves the order untouched if the key is
    /// already tracked.
    pub fn push_newest(&mut self, key: &str) -> bool {
        if self.links.contains_key(key) {
            return false;
        }

        let link = Link {
            prev: self.newest.clone(),
            next: None,
        };

        match &self.newest {
            Some(newest) => {
                if let Some(tail) = self.links.get_mut(newest) {
                    tail.next = Some(key.to_string());
                }
            }
            None => self.oldest = Some(key.to_string()),
        }

        self.newest = Some(key.to_string());
        self.links.insert(key.to_string(), link);
        true
    }

    // == Remove ==
    /// Unlinks a key. Returns `false` if it was not tracked.
    pub fn remove(&mut self, key: &str) -> bool {
        let Some(link) = self.links.remove(key) else {
            return false;
        };

        match &link.prev {
            Some(prev) => {
                if let Some(before) = self.links.get_mut(prev) {
                    before.next = link.next.clone();
                }
            }
            None => self.oldest = link.next.clone(),
        }

        match &link.next {
            Some(next) => {
                if let Some(after) = self.links.get_mut(next) {
                    after.prev = link.prev.clone();
                }
            }
            None => self.newest = link.prev,
        }

        true
    }

    // == Pop Oldest ==
    /// Removes and returns the earliest-inserted key.
    pub fn pop_oldest(&mut self) -> Option<String> {
        let key = self.oldest.clone()?;
        self.remove(&key);
        Some(key)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Drops every key.
    pub fn clear(&mut self) {
        self.links.clear();
        self.oldest = None;
        self.newest = None;
    }

    /// Keys from oldest to newest.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.links.len());
        let mut cursor = self.oldest.as_deref();

        while let Some(key) = cursor {
            keys.push(key.to_string());
            cursor = self.links.get(key).and_then(|link| link.next.as_deref());
        }

        keys
    }
}
