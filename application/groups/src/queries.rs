use std::time::Duration;

use derived_cache::{DerivedCache, EntityId, Mode};
use group_domain::{Group, GroupDao, GroupError, RedactedGroup};
use mongo_connection::MongoConnect;
use tracing::{debug, instrument, warn};

use crate::cache_keys::group_key;

pub(crate) const ENTITY_TTL: Duration = Duration::from_secs(300);

#[derive(Clone)]
pub struct GetGroupQueryHandler {
    group_dao: GroupDao,
    cache: DerivedCache,
}

impl GetGroupQueryHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            group_dao: GroupDao::new(db),
            cache,
        }
    }

    #[instrument(skip(self))]
    pub async fn full(&self, title: &str) -> Result<Group, GroupError> {
        let key = group_key(title, Mode::Full);
        match self.cache.get::<Group>(&key).await {
            Ok(Some(group)) => {
                debug!("Cache hit for group {title}");
                return Ok(group);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "cache read failed, going to store")
            }
        }

        debug!("Cache miss for group {title}, fetching from store");
        self.load(title).await
    }

    #[instrument(skip(self))]
    pub async fn redacted(
        &self, title: &str,
    ) -> Result<RedactedGroup, GroupError> {
        let key = group_key(title, Mode::Redacted);
        match self.cache.get::<RedactedGroup>(&key).await {
            Ok(Some(group)) => {
                debug!("Cache hit for group {title}");
                return Ok(group);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "cache read failed, going to store")
            }
        }

        debug!("Cache miss for group {title}, fetching from store");
        Ok(self.load(title).await?.redacted())
    }

    async fn load(&self, title: &str) -> Result<Group, GroupError> {
        let group = self
            .group_dao
            .find_by_title(title)
            .await?
            .ok_or_else(|| {
                GroupError::NotFound {
                    title: title.to_string(),
                }
            })?;

        let deps = [EntityId::of(&group.id)];
        if let Err(err) = self
            .cache
            .put(
                &group_key(title, Mode::Full),
                &deps,
                &group,
                Some(ENTITY_TTL),
            )
            .await
        {
            warn!(error = %err, "failed to warm full group cache");
        }
        if let Err(err) = self
            .cache
            .put(
                &group_key(title, Mode::Redacted),
                &deps,
                &group.redacted(),
                Some(ENTITY_TTL),
            )
            .await
        {
            warn!(error = %err, "failed to warm redacted group cache");
        }

        Ok(group)
    }
}
