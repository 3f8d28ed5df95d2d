use derived_cache::{DerivedCache, Invalidating};
use group_domain::{Group, GroupDao, GroupError, NewGroup, UpdateGroup};
use mongo_connection::MongoConnect;
use mongodb::bson::oid::ObjectId;
use tracing::instrument;

#[derive(Clone)]
pub struct CreateGroupHandler {
    repo: Invalidating<GroupDao>,
}

impl CreateGroupHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            repo: Invalidating::new(GroupDao::new(db), cache),
        }
    }

    #[instrument(skip(self, command))]
    pub async fn execute(
        &self, command: NewGroup,
    ) -> Result<Group, GroupError> {
        self.repo.create(command).await
    }
}

#[derive(Clone)]
pub struct UpdateGroupHandler {
    repo: Invalidating<GroupDao>,
}

impl UpdateGroupHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            repo: Invalidating::new(GroupDao::new(db), cache),
        }
    }

    #[instrument(skip(self, command))]
    pub async fn execute(
        &self, id: ObjectId, command: UpdateGroup,
    ) -> Result<Group, GroupError> {
        self.repo.update(id, command).await
    }
}

#[derive(Clone)]
pub struct DeleteGroupHandler {
    repo: Invalidating<GroupDao>,
}

impl DeleteGroupHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            repo: Invalidating::new(GroupDao::new(db), cache),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, id: ObjectId) -> Result<(), GroupError> {
        self.repo.delete(id).await
    }
}
