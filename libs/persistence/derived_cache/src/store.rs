use std::{sync::Arc, time::Duration};

use bytes::Bytes;
use redis_connection::{
    AsyncCommands,
    value::{CacheValue, Json},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use crate::{
    backend::{CacheBackend, MemoryConfig, MemoryStore},
    error::{CacheError, CacheResult, map_redis_err},
    key::{CacheKey, EntityId},
    provider::CacheProvider,
};

const VALUE_NAMESPACE: &str = "cache:";
const TAG_NAMESPACE: &str = "object:";

fn value_key(key: &CacheKey) -> String {
    format!("{VALUE_NAMESPACE}{key}")
}

fn tag_key(id: &EntityId) -> String { format!("{TAG_NAMESPACE}{id}") }

/// The derived-value cache: `get`/`put`/`invalidate` over a value
/// namespace plus a reverse tag index.
#[derive(Clone)]
pub struct DerivedCache {
    backend: Arc<CacheBackend>,
}

impl DerivedCache {
    pub fn new(backend: CacheBackend) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn new_shared(backend: Arc<CacheBackend>) -> Self {
        Self { backend }
    }

    pub fn redis(pool: deadpool_redis::Pool) -> Self {
        Self::new(CacheBackend::Redis(pool))
    }

    pub fn memory(config: MemoryConfig) -> Self {
        Self::new(CacheBackend::Memory(MemoryStore::new(config)))
    }

    /// Bind to the process-wide backend installed via [`CacheProvider`].
    pub fn from_provider() -> Self {
        Self::new_shared(CacheProvider::get_backend())
    }

    /// Pure read of one derived value. `Ok(None)` is a miss; errors mean
    /// the store itself failed and the caller should fall back to the
    /// content store.
    #[instrument(skip(self), fields(cache.key = %key))]
    pub async fn get<T>(&self, key: &CacheKey) -> CacheResult<Option<T>>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        match &*self.backend {
            CacheBackend::Redis(pool) => {
                let mut conn = pool.get().await?;
                let value: Option<Json<T>> = conn
                    .get(value_key(key))
                    .await
                    .map_err(map_redis_err)?;
                Ok(value.map(Json::inner))
            }
            CacheBackend::Memory(store) => {
                match store.value(&value_key(key)).await {
                    Some(bytes) => {
                        let json = Json::<T>::from_bytes(&bytes)?;
                        Ok(Some(json.inner()))
                    }
                    None => Ok(None),
                }
            }
        }
    }

    /// Register a derived value together with every entity id it was
    /// computed from. Each tag-set member is added before the value is
    /// written, so a reader can never observe an entry that is not yet
    /// invalidatable.
    #[instrument(
        skip(self, value),
        fields(cache.key = %key, cache.dependents = dependents.len())
    )]
    pub async fn put<T>(
        &self, key: &CacheKey, dependents: &[EntityId], value: &T,
        ttl: Option<Duration>,
    ) -> CacheResult<()>
    where
        T: Serialize + DeserializeOwned + Clone + Send + Sync,
    {
        if dependents.is_empty() {
            return Err(CacheError::EmptyDependencySet);
        }

        match &*self.backend {
            CacheBackend::Redis(pool) => {
                let mut conn = pool.get().await?;
                for id in dependents {
                    let _: () = conn
                        .sadd(tag_key(id), key.as_str())
                        .await
                        .map_err(map_redis_err)?;
                }

                let payload = Json(value.clone());
                match ttl {
                    Some(ttl) => {
                        let _: () = conn
                            .set_ex(value_key(key), payload, ttl.as_secs())
                            .await
                            .map_err(map_redis_err)?;
                    }
                    None => {
                        let _: () = conn
                            .set(value_key(key), payload)
                            .await
                            .map_err(map_redis_err)?;
                    }
                }
            }
            CacheBackend::Memory(store) => {
                for id in dependents {
                    store.add_tag(&tag_key(id), key.as_str());
                }
                let bytes = Json(value.clone()).to_bytes()?;
                store
                    .insert_value(value_key(key), Bytes::from(bytes))
                    .await;
            }
        }

        Ok(())
    }

    /// Drop every cached value derived from `id` and empty its tag set.
    /// Tag members whose entry already expired are treated as satisfied.
    /// Mutation paths must surface a failure here as a failed mutation:
    /// a write the cache never learned about reintroduces staleness with
    /// no fallback.
    #[instrument(skip(self), fields(cache.entity = %id))]
    pub async fn invalidate(&self, id: &EntityId) -> CacheResult<()> {
        match &*self.backend {
            CacheBackend::Redis(pool) => {
                let mut conn = pool.get().await?;
                let members: Vec<String> = conn
                    .smembers(tag_key(id))
                    .await
                    .map_err(map_redis_err)?;

                let count = members.len();
                for member in members {
                    let _: () = conn
                        .del(format!("{VALUE_NAMESPACE}{member}"))
                        .await
                        .map_err(map_redis_err)?;
                    let _: () = conn
                        .srem(tag_key(id), &member)
                        .await
                        .map_err(map_redis_err)?;
                }

                debug!(invalidated = count, "dropped tagged cache entries");
            }
            CacheBackend::Memory(store) => {
                let members = store.tag_members(&tag_key(id));
                let count = members.len();
                for member in members {
                    store
                        .remove_value(&format!("{VALUE_NAMESPACE}{member}"))
                        .await;
                    store.remove_tag(&tag_key(id), &member);
                }

                debug!(invalidated = count, "dropped tagged cache entries");
            }
        }

        Ok(())
    }
}
