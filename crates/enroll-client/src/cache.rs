//! Tagged response cache.

use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory cache for remote reads, keyed by tag.
///
/// Reads are stored under a named tag; mutating operations invalidate the
/// tag, so the next read under it goes back to the server. The cache is
/// an explicit service object owned by its client rather than ambient
/// shared state.
pub struct TagCache<T: Clone> {
    entries: RwLock<HashMap<String, T>>,
}

impl<T: Clone> TagCache<T> {
    /// Creates a new empty TagCache.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Gets the cached value for a tag.
    ///
    /// # Returns
    ///
    /// `Some(value)` if the tag is populated, `None` otherwise.
    pub async fn get(&self, tag: &str) -> Option<T> {
        let entries = self.entries.read().await;
        entries.get(tag).cloned()
    }

    /// Stores a value under a tag, replacing any previous one.
    pub async fn store(&self, tag: &str, value: T) {
        let mut entries = self.entries.write().await;
        entries.insert(tag.to_string(), value);
    }

    /// Marks a tag stale, forcing the next read under it to refetch.
    pub async fn invalidate(&self, tag: &str) {
        let mut entries = self.entries.write().await;
        entries.remove(tag);
    }

    /// Drops every cached entry.
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
    }
}

impl<T: Clone> Default for TagCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_get() {
        let cache: TagCache<Vec<u32>> = TagCache::new();
        assert_eq!(cache.get("numbers").await, None);

        cache.store("numbers", vec![1, 2, 3]).await;
        assert_eq!(cache.get("numbers").await, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_invalidate_only_touches_its_tag() {
        let cache: TagCache<&'static str> = TagCache::new();
        cache.store("a", "first").await;
        cache.store("b", "second").await;

        cache.invalidate("a").await;
        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.get("b").await, Some("second"));
    }

    #[tokio::test]
    async fn test_clear_drops_everything() {
        let cache: TagCache<&'static str> = TagCache::new();
        cache.store("a", "first").await;
        cache.store("b", "second").await;

        cache.clear().await;
        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.get("b").await, None);
    }
}
