//! Tag-indexed cache for derived values.
//!
//! Two namespaces live in the cache store: `cache:{fingerprint}` holds
//! serialized derived values, `object:{entity-id}` holds the set of
//! fingerprints whose value was computed from that entity. Invalidating
//! an entity drops every value its tag set points at, so stale derived
//! data is never served after the underlying record changes.

pub mod backend;
pub mod error;
pub mod key;
pub mod provider;
pub mod repository;
pub mod store;

pub use backend::{CacheBackend, MemoryConfig, MemoryStore};
pub use error::{CacheError, CacheResult};
pub use key::{CacheKey, EntityId, Mode, fingerprint, fingerprint_batch};
pub use provider::CacheProvider;
pub use repository::Invalidating;
pub use store::DerivedCache;
