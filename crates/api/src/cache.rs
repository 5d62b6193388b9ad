//! In-process cache for public site responses.
//!
//! Entries are grouped under a cache tag (one per content kind). Admin
//! mutations invalidate the whole tag; there is no time-based expiry.
//! Each tag holds at most `max_entries_per_tag` values; once full, further
//! keys are served uncached until the next invalidation.

use std::collections::HashMap;
use std::future::Future;

use serde_json::Value;
use tokio::sync::RwLock;

/// Default bound on cached values per tag.
pub const DEFAULT_MAX_ENTRIES_PER_TAG: usize = 256;

/// Cached values for one tag. `generation` advances on every invalidation so
/// that a load which started before the invalidation is not stored.
#[derive(Debug, Default)]
struct TagEntries {
    generation: u64,
    values: HashMap<String, Value>,
}

impl TagEntries {
    /// Store `value` unless the tag is full and `key` is new.
    fn store(&mut self, key: &str, value: Value, max_entries: usize) -> bool {
        if self.values.len() >= max_entries && !self.values.contains_key(key) {
            return false;
        }
        self.values.insert(key.to_string(), value);
        true
    }
}

#[derive(Debug)]
pub struct ContentCache {
    entries: RwLock<HashMap<String, TagEntries>>,
    max_entries_per_tag: usize,
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES_PER_TAG)
    }
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_entries(max_entries_per_tag: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries_per_tag,
        }
    }

    pub async fn get(&self, tag: &str, key: &str) -> Option<Value> {
        self.entries.read().await.get(tag)?.values.get(key).cloned()
    }

    /// Store a value. Returns `false` when the tag is already full.
    pub async fn insert(&self, tag: &str, key: &str, value: Value) -> bool {
        self.entries
            .write()
            .await
            .entry(tag.to_string())
            .or_default()
            .store(key, value, self.max_entries_per_tag)
    }

    /// Number of values currently cached under `tag`.
    pub async fn len(&self, tag: &str) -> usize {
        self.entries
            .read()
            .await
            .get(tag)
            .map_or(0, |entries| entries.values.len())
    }

    async fn generation(&self, tag: &str) -> u64 {
        self.entries
            .read()
            .await
            .get(tag)
            .map_or(0, |entries| entries.generation)
    }

    /// Return the cached value or compute, store and return it.
    ///
    /// Errors from `load` are returned as-is and nothing is cached. A value
    /// whose tag was invalidated while `load` ran is returned but not stored.
    pub async fn get_or_try_insert<F, Fut, E>(&self, tag: &str, key: &str, load: F) -> Result<Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
    {
        if let Some(hit) = self.get(tag, key).await {
            tracing::trace!(tag, key, "Cache hit");
            return Ok(hit);
        }

        let generation = self.generation(tag).await;
        let value = load().await?;

        let mut entries = self.entries.write().await;
        let tag_entries = entries.entry(tag.to_string()).or_default();
        if tag_entries.generation != generation {
            tracing::debug!(tag, key, "Tag invalidated during load; not caching");
        } else if !tag_entries.store(key, value.clone(), self.max_entries_per_tag) {
            tracing::debug!(tag, key, "Tag full; not caching");
        }
        Ok(value)
    }

    /// Drop every entry stored under `tag`.
    pub async fn invalidate(&self, tag: &str) {
        self.invalidate_many(&[tag]).await;
    }

    /// Invalidate several tags at once.
    pub async fn invalidate_many(&self, tags: &[&str]) {
        let mut entries = self.entries.write().await;
        for tag in tags {
            let tag_entries = entries.entry((*tag).to_string()).or_default();
            tag_entries.generation += 1;
            tag_entries.values.clear();
        }
        tracing::debug!(?tags, "Cache tags invalidated");
    }
}
