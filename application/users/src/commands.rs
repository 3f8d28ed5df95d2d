use derived_cache::{DerivedCache, Invalidating};
use mongo_connection::MongoConnect;
use mongodb::bson::oid::ObjectId;
use tracing::instrument;
use user_domain::{NewUser, UpdateUser, User, UserDao, UserError, UserStatus};

#[derive(Clone)]
pub struct CreateUserHandler {
    repo: Invalidating<UserDao>,
}

impl CreateUserHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            repo: Invalidating::new(UserDao::new(db), cache),
        }
    }

    #[instrument(skip(self, command))]
    pub async fn execute(&self, command: NewUser) -> Result<User, UserError> {
        self.repo.create(command).await
    }
}

#[derive(Clone)]
pub struct UpdateUserHandler {
    repo: Invalidating<UserDao>,
}

impl UpdateUserHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            repo: Invalidating::new(UserDao::new(db), cache),
        }
    }

    #[instrument(skip(self, command))]
    pub async fn execute(
        &self, id: ObjectId, command: UpdateUser,
    ) -> Result<User, UserError> {
        self.repo.update(id, command).await
    }
}

/// Banning is a status update; going through the invalidating
/// repository drops the cached account the moment the ban lands.
#[derive(Clone)]
pub struct BanUserHandler {
    repo: Invalidating<UserDao>,
}

impl BanUserHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            repo: Invalidating::new(UserDao::new(db), cache),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, id: ObjectId) -> Result<User, UserError> {
        self.repo
            .update(
                id,
                UpdateUser {
                    status: Some(UserStatus::Banned),
                    ..UpdateUser::default()
                },
            )
            .await
    }
}

#[derive(Clone)]
pub struct DeleteUserHandler {
    repo: Invalidating<UserDao>,
}

impl DeleteUserHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            repo: Invalidating::new(UserDao::new(db), cache),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, id: ObjectId) -> Result<(), UserError> {
        self.repo.delete(id).await
    }
}
