use async_trait::async_trait;
use database_traits::dao::GenericDao;
use futures::TryStreamExt;
use mongo_connection::MongoConnect;
use mongodb::{
    Collection,
    bson::{DateTime, Document, doc, oid::ObjectId},
};
use tracing::instrument;

use crate::{
    errors::UserError,
    models::{NewUser, UpdateUser, User, UserStatus},
};

pub const COLLECTION: &str = "users";

#[derive(Clone)]
pub struct UserDao {
    db: MongoConnect,
}

impl UserDao {
    pub fn new(db: MongoConnect) -> Self { Self { db } }

    fn collection(&self) -> Collection<User> {
        self.db.collection(COLLECTION)
    }

    #[instrument(skip(self))]
    pub async fn find_by_username(
        &self, username: &str,
    ) -> Result<Option<User>, UserError> {
        Ok(self
            .collection()
            .find_one(doc! { "username": username })
            .await?)
    }
}

#[async_trait]
impl GenericDao for UserDao {
    type CreateRequest = NewUser;
    type Error = UserError;
    type ID = ObjectId;
    type Model = User;
    type Response = User;
    type UpdateRequest = UpdateUser;

    #[instrument(skip(self))]
    async fn find_by_id(
        &self, id: Self::ID,
    ) -> Result<Self::Response, Self::Error> {
        self.collection()
            .find_one(doc! { "_id": id })
            .await?
            .ok_or(UserError::IdNotFound { id })
    }

    #[instrument(skip(self))]
    async fn all(&self) -> Result<Vec<Self::Response>, Self::Error> {
        let cursor = self.collection().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, req))]
    async fn create(
        &self, req: Self::CreateRequest,
    ) -> Result<Self::Response, Self::Error> {
        if self.find_by_username(&req.username).await?.is_some() {
            return Err(UserError::UsernameTaken);
        }

        let user = User {
            id: ObjectId::new(),
            username: req.username,
            name: req.name,
            password: req.password,
            created_time: DateTime::now(),
            school: req.school,
            student_id: req.student_id,
            group: req.group.unwrap_or_else(|| "student".to_string()),
            status: UserStatus::Ok,
        };
        self.collection().insert_one(&user).await?;
        Ok(user)
    }

    #[instrument(skip(self, req))]
    async fn update(
        &self, id: Self::ID, req: Self::UpdateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let mut set = Document::new();
        if let Some(name) = req.name {
            set.insert("name", name);
        }
        if let Some(password) = req.password {
            set.insert("password", password);
        }
        if let Some(school) = req.school {
            set.insert("school", school);
        }
        if let Some(student_id) = req.student_id {
            set.insert("student_id", student_id);
        }
        if let Some(group) = req.group {
            set.insert("group", group);
        }
        if let Some(status) = req.status {
            let status = mongodb::bson::to_bson(&status)
                .map_err(mongodb::error::Error::from)?;
            set.insert("status", status);
        }

        if !set.is_empty() {
            self.collection()
                .update_one(doc! { "_id": id }, doc! { "$set": set })
                .await?;
        }

        self.find_by_id(id).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Self::ID) -> Result<(), Self::Error> {
        let result =
            self.collection().delete_one(doc! { "_id": id }).await?;
        if result.deleted_count == 0 {
            return Err(UserError::IdNotFound { id });
        }
        Ok(())
    }
}
