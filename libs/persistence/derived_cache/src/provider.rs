use std::sync::{Arc, OnceLock};

use crate::backend::{CacheBackend, MemoryConfig, MemoryStore};

static CACHE_BACKEND: OnceLock<Arc<CacheBackend>> = OnceLock::new();

/// Process-wide backend registry so handler constructors and tests can
/// share one store without threading it through every call site.
pub struct CacheProvider;

impl CacheProvider {
    /// Install a Redis pool as the global backend (the common case).
    pub fn init_redis_static(pool: deadpool_redis::Pool) {
        let backend = Arc::new(CacheBackend::Redis(pool));
        CACHE_BACKEND.set(backend).ok();
    }

    /// Install an in-process store as the global backend (tests,
    /// embedded use).
    pub fn init_memory_static(config: MemoryConfig) {
        let backend =
            Arc::new(CacheBackend::Memory(MemoryStore::new(config)));
        CACHE_BACKEND.set(backend).ok();
    }

    pub fn get_backend() -> Arc<CacheBackend> {
        CACHE_BACKEND
            .get()
            .expect(
                "Cache backend not initialized. Call \
                 CacheProvider::init_*_static() first",
            )
            .clone()
    }
}
