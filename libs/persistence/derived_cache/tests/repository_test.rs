use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use database_traits::dao::GenericDao;
use derived_cache::{
    CacheError, DerivedCache, EntityId, Invalidating, MemoryConfig, Mode,
    fingerprint,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Note {
    id: String,
    body: String,
}

#[derive(Debug, thiserror::Error)]
enum NoteError {
    #[error("note not found")]
    NotFound,
    #[error("cache invalidation failed: {0}")]
    Cache(#[from] CacheError),
}

#[derive(Clone, Default)]
struct NoteDao {
    rows: Arc<Mutex<HashMap<String, Note>>>,
}

#[async_trait]
impl GenericDao for NoteDao {
    type CreateRequest = Note;
    type Error = NoteError;
    type ID = String;
    type Model = Note;
    type Response = Note;
    type UpdateRequest = String;

    async fn find_by_id(
        &self, id: Self::ID,
    ) -> Result<Self::Response, Self::Error> {
        self.rows
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(NoteError::NotFound)
    }

    async fn all(&self) -> Result<Vec<Self::Response>, Self::Error> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn create(
        &self, req: Self::CreateRequest,
    ) -> Result<Self::Response, Self::Error> {
        self.rows
            .lock()
            .unwrap()
            .insert(req.id.clone(), req.clone());
        Ok(req)
    }

    async fn update(
        &self, id: Self::ID, req: Self::UpdateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let mut rows = self.rows.lock().unwrap();
        let note = rows.get_mut(&id).ok_or(NoteError::NotFound)?;
        note.body = req;
        Ok(note.clone())
    }

    async fn delete(&self, id: Self::ID) -> Result<(), Self::Error> {
        self.rows
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(NoteError::NotFound)
    }
}

fn setup() -> (DerivedCache, Invalidating<NoteDao>) {
    let cache = DerivedCache::memory(MemoryConfig::default());
    let repo = Invalidating::new(NoteDao::default(), cache.clone());
    (cache, repo)
}

#[tokio::test]
async fn test_update_invalidates_cached_projections() {
    let (cache, repo) = setup();

    repo.create(Note {
        id: "n1".into(),
        body: "draft".into(),
    })
    .await
    .unwrap();

    let key = fingerprint("note", &["n1"], Mode::Full);
    let note = repo.find_by_id("n1".into()).await.unwrap();
    cache
        .put(&key, &[EntityId::new("n1")], &note, None)
        .await
        .unwrap();

    repo.update("n1".into(), "final".into()).await.unwrap();

    // The pre-mutation value must be gone.
    let cached: Option<Note> = cache.get(&key).await.unwrap();
    assert_eq!(cached, None);
}

#[tokio::test]
async fn test_delete_invalidates_cached_projections() {
    let (cache, repo) = setup();

    repo.create(Note {
        id: "n1".into(),
        body: "draft".into(),
    })
    .await
    .unwrap();

    let key = fingerprint("note", &["n1"], Mode::Redacted);
    cache
        .put(
            &key,
            &[EntityId::new("n1")],
            &Note {
                id: "n1".into(),
                body: "draft".into(),
            },
            None,
        )
        .await
        .unwrap();

    repo.delete("n1".into()).await.unwrap();

    let cached: Option<Note> = cache.get(&key).await.unwrap();
    assert_eq!(cached, None);
    assert!(matches!(
        repo.find_by_id("n1".into()).await,
        Err(NoteError::NotFound)
    ));
}

#[tokio::test]
async fn test_create_invalidates_collection_tag() {
    let cache = DerivedCache::memory(MemoryConfig::default());
    let sentinel = EntityId::collection("note");
    let repo = Invalidating::with_collection_tag(
        NoteDao::default(),
        cache.clone(),
        sentinel.clone(),
    );

    // A cached listing is tagged with the sentinel because no per-note
    // tag could reach it when a new note appears.
    let list_key = fingerprint("note", &["list"], Mode::Redacted);
    cache
        .put(
            &list_key,
            std::slice::from_ref(&sentinel),
            &Vec::<Note>::new(),
            None,
        )
        .await
        .unwrap();

    repo.create(Note {
        id: "n1".into(),
        body: "draft".into(),
    })
    .await
    .unwrap();

    let cached: Option<Vec<Note>> = cache.get(&list_key).await.unwrap();
    assert_eq!(cached, None);
}

#[tokio::test]
async fn test_unreachable_cache_store_fails_the_mutation() {
    // Pool creation is lazy, so pointing at a dead port only fails once
    // the invalidation actually talks to the store.
    let cfg = deadpool_redis::Config::from_url("redis://127.0.0.1:1");
    let pool = cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .unwrap();
    let cache = DerivedCache::redis(pool);

    let repo = Invalidating::new(NoteDao::default(), cache);
    repo.create(Note {
        id: "n1".into(),
        body: "draft".into(),
    })
    .await
    .unwrap();

    // The DAO write succeeds, but the cache never learns of the change,
    // so the mutation as a whole must be reported as failed.
    let result = repo.update("n1".into(), "final".into()).await;
    assert!(matches!(
        result,
        Err(NoteError::Cache(CacheError::Unavailable(_)))
    ));
}

#[tokio::test]
async fn test_failed_dao_mutation_skips_invalidation() {
    let (cache, repo) = setup();

    let key = fingerprint("note", &["n1"], Mode::Full);
    let note = Note {
        id: "n1".into(),
        body: "draft".into(),
    };
    cache
        .put(&key, &[EntityId::new("n1")], &note, None)
        .await
        .unwrap();

    // The note was never created, so the update fails before any
    // invalidation happens and the cached value stays put.
    assert!(matches!(
        repo.update("n1".into(), "final".into()).await,
        Err(NoteError::NotFound)
    ));

    let cached: Option<Note> = cache.get(&key).await.unwrap();
    assert_eq!(cached, Some(note));
}
