use database_traits::dao::GenericDao;

use crate::{error::CacheError, key::EntityId, store::DerivedCache};

/// Mutation wrapper that makes tag invalidation a post-condition of
/// every write instead of a call-site convention. Command handlers go
/// through this; a mutation whose invalidation fails is reported as a
/// failed mutation.
#[derive(Clone)]
pub struct Invalidating<D> {
    dao: D,
    cache: DerivedCache,
    collection_tag: Option<EntityId>,
}

impl<D> Invalidating<D>
where
    D: GenericDao + Send + Sync,
    D::ID: Clone,
    D::Error: From<CacheError>,
{
    pub fn new(dao: D, cache: DerivedCache) -> Self {
        Self {
            dao,
            cache,
            collection_tag: None,
        }
    }

    /// Also invalidate a collection sentinel on every mutation.
    /// List-shaped caches are tagged with it, and inserts/deletes can
    /// reach them through no other tag.
    pub fn with_collection_tag(
        dao: D, cache: DerivedCache, tag: EntityId,
    ) -> Self {
        Self {
            dao,
            cache,
            collection_tag: Some(tag),
        }
    }

    pub fn dao(&self) -> &D { &self.dao }

    pub fn cache(&self) -> &DerivedCache { &self.cache }

    pub async fn find_by_id(
        &self, id: D::ID,
    ) -> Result<D::Response, D::Error> {
        self.dao.find_by_id(id).await
    }

    /// A freshly inserted entity has no per-entity cache entries yet,
    /// so only the collection sentinel needs to drop.
    pub async fn create(
        &self, req: D::CreateRequest,
    ) -> Result<D::Response, D::Error> {
        let created = self.dao.create(req).await?;
        if let Some(tag) = &self.collection_tag {
            self.cache.invalidate(tag).await.map_err(Into::into)?;
        }
        Ok(created)
    }

    pub async fn update(
        &self, id: D::ID, req: D::UpdateRequest,
    ) -> Result<D::Response, D::Error> {
        let updated = self.dao.update(id.clone(), req).await?;
        self.invalidate_entity(&id).await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: D::ID) -> Result<(), D::Error> {
        self.dao.delete(id.clone()).await?;
        self.invalidate_entity(&id).await?;
        Ok(())
    }

    async fn invalidate_entity(&self, id: &D::ID) -> Result<(), D::Error> {
        self.cache
            .invalidate(&EntityId::of(id))
            .await
            .map_err(Into::into)?;
        if let Some(tag) = &self.collection_tag {
            self.cache.invalidate(tag).await.map_err(Into::into)?;
        }
        Ok(())
    }
}
