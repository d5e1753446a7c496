//! In-memory cache for provider-side identifiers
//!
//! Zone and record IDs are assumed stable for the lifetime of the process.
//! Entries are never evicted; a stale entry stays until restart.

use std::collections::HashMap;
use tokio::sync::RwLock;

/// Name → provider ID map shared across concurrent requests
///
/// Two requests resolving the same key at the same time may both miss and
/// both insert. The lookups are idempotent reads, so the last write wins.
#[derive(Debug, Default)]
pub struct IdCache {
    entries: RwLock<HashMap<String, String>>,
}

impl IdCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached ID
    pub async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    /// Store an ID; empty IDs are never cached
    pub async fn insert(&self, key: impl Into<String>, id: impl Into<String>) {
        let id = id.into();
        if id.is_empty() {
            return;
        }
        self.entries.write().await.insert(key.into(), id);
    }

    /// Number of cached entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether nothing has been cached yet
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = IdCache::new();
        assert!(cache.is_empty().await);

        cache.insert("example.com", "zone-1").await;
        assert_eq!(cache.get("example.com").await.as_deref(), Some("zone-1"));
        assert_eq!(cache.get("example.org").await, None);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let cache = IdCache::new();
        cache.insert("example.com", "zone-1").await;
        cache.insert("example.com", "zone-2").await;
        assert_eq!(cache.get("example.com").await.as_deref(), Some("zone-2"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_empty_id_not_cached() {
        let cache = IdCache::new();
        cache.insert("example.com", "").await;
        assert!(cache.is_empty().await);
    }
}
