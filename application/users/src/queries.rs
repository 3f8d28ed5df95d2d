use std::time::Duration;

use derived_cache::{DerivedCache, EntityId, Mode};
use mongo_connection::MongoConnect;
use tracing::{debug, instrument, warn};
use user_domain::{RedactedUser, User, UserDao, UserError};

use crate::cache_keys::account_key;

pub(crate) const ENTITY_TTL: Duration = Duration::from_secs(300);

#[derive(Clone)]
pub struct GetUserQueryHandler {
    user_dao: UserDao,
    cache: DerivedCache,
}

impl GetUserQueryHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            user_dao: UserDao::new(db),
            cache,
        }
    }

    #[instrument(skip(self))]
    pub async fn full(&self, username: &str) -> Result<User, UserError> {
        let key = account_key(username, Mode::Full);
        match self.cache.get::<User>(&key).await {
            Ok(Some(user)) => {
                debug!("Cache hit for user {username}");
                return Ok(user);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "cache read failed, going to store")
            }
        }

        debug!("Cache miss for user {username}, fetching from store");
        self.load(username).await
    }

    #[instrument(skip(self))]
    pub async fn redacted(
        &self, username: &str,
    ) -> Result<RedactedUser, UserError> {
        let key = account_key(username, Mode::Redacted);
        match self.cache.get::<RedactedUser>(&key).await {
            Ok(Some(user)) => {
                debug!("Cache hit for user {username}");
                return Ok(user);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "cache read failed, going to store")
            }
        }

        debug!("Cache miss for user {username}, fetching from store");
        Ok(self.load(username).await?.redacted())
    }

    async fn load(&self, username: &str) -> Result<User, UserError> {
        let user = self
            .user_dao
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                UserError::NotFound {
                    username: username.to_string(),
                }
            })?;

        let deps = [EntityId::of(&user.id)];
        if let Err(err) = self
            .cache
            .put(
                &account_key(username, Mode::Full),
                &deps,
                &user,
                Some(ENTITY_TTL),
            )
            .await
        {
            warn!(error = %err, "failed to warm full user cache");
        }
        if let Err(err) = self
            .cache
            .put(
                &account_key(username, Mode::Redacted),
                &deps,
                &user.redacted(),
                Some(ENTITY_TTL),
            )
            .await
        {
            warn!(error = %err, "failed to warm redacted user cache");
        }

        Ok(user)
    }
}
