use std::{collections::HashSet, sync::Arc, time::Duration};

use bytes::Bytes;
use dashmap::DashMap;
use moka::future::Cache;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_memory_capacity")]
    pub capacity: u64,
    #[serde(default = "default_memory_ttl_secs")]
    pub ttl_secs: u64,
}

impl MemoryConfig {
    pub fn ttl(&self) -> Duration { Duration::from_secs(self.ttl_secs) }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_memory_capacity(),
            ttl_secs: default_memory_ttl_secs(),
        }
    }
}

fn default_memory_capacity() -> u64 { 10_000 }
fn default_memory_ttl_secs() -> u64 { 300 }

/// In-process store: moka holds the value namespace, dashmap the tag
/// sets. Per-entry TTL is not supported here; entries expire under the
/// builder-level time-to-live instead.
#[derive(Clone)]
pub struct MemoryStore {
    values: Cache<String, Bytes>,
    tags: Arc<DashMap<String, HashSet<String>>>,
}

impl MemoryStore {
    pub fn new(config: MemoryConfig) -> Self {
        let values = Cache::builder()
            .max_capacity(config.capacity)
            .time_to_live(config.ttl())
            .build();

        Self {
            values,
            tags: Arc::new(DashMap::new()),
        }
    }

    pub(crate) async fn value(&self, key: &str) -> Option<Bytes> {
        self.values.get(key).await
    }

    pub(crate) async fn insert_value(&self, key: String, bytes: Bytes) {
        self.values.insert(key, bytes).await;
    }

    pub(crate) async fn remove_value(&self, key: &str) {
        self.values.invalidate(key).await;
    }

    pub(crate) fn add_tag(&self, id: &str, member: &str) {
        self.tags
            .entry(id.to_string())
            .or_default()
            .insert(member.to_string());
    }

    pub(crate) fn tag_members(&self, id: &str) -> Vec<String> {
        self.tags
            .get(id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub(crate) fn remove_tag(&self, id: &str, member: &str) {
        if let Some(mut set) = self.tags.get_mut(id) {
            set.remove(member);
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self { Self::new(MemoryConfig::default()) }
}

/// The two stores the derived-value cache can run against. Redis in
/// production, the in-process store for tests and embedded use.
pub enum CacheBackend {
    Redis(deadpool_redis::Pool),
    Memory(MemoryStore),
}

impl CacheBackend {
    pub fn is_redis(&self) -> bool { matches!(self, CacheBackend::Redis(_)) }
}

impl From<deadpool_redis::Pool> for CacheBackend {
    fn from(pool: deadpool_redis::Pool) -> Self { CacheBackend::Redis(pool) }
}

impl From<MemoryStore> for CacheBackend {
    fn from(store: MemoryStore) -> Self { CacheBackend::Memory(store) }
}
