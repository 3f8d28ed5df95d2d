use async_trait::async_trait;
use database_traits::dao::GenericDao;
use futures::TryStreamExt;
use mongo_connection::MongoConnect;
use mongodb::{
    Collection,
    bson::{Document, doc, oid::ObjectId},
};
use tracing::instrument;

use crate::{
    errors::GroupError,
    models::{Group, NewGroup, UpdateGroup},
};

pub const COLLECTION: &str = "groups";

#[derive(Clone)]
pub struct GroupDao {
    db: MongoConnect,
}

impl GroupDao {
    pub fn new(db: MongoConnect) -> Self { Self { db } }

    fn collection(&self) -> Collection<Group> {
        self.db.collection(COLLECTION)
    }

    #[instrument(skip(self))]
    pub async fn find_by_title(
        &self, title: &str,
    ) -> Result<Option<Group>, GroupError> {
        Ok(self.collection().find_one(doc! { "title": title }).await?)
    }
}

#[async_trait]
impl GenericDao for GroupDao {
    type CreateRequest = NewGroup;
    type Error = GroupError;
    type ID = ObjectId;
    type Model = Group;
    type Response = Group;
    type UpdateRequest = UpdateGroup;

    #[instrument(skip(self))]
    async fn find_by_id(
        &self, id: Self::ID,
    ) -> Result<Self::Response, Self::Error> {
        self.collection()
            .find_one(doc! { "_id": id })
            .await?
            .ok_or(GroupError::IdNotFound { id })
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
        if self.find_by_title(&req.title).await?.is_some() {
            return Err(GroupError::Duplicate);
        }

        let group = Group {
            id: ObjectId::new(),
            title: req.title,
            permission: req.permission,
        };
        self.collection().insert_one(&group).await?;
        Ok(group)
    }

    #[instrument(skip(self, req))]
    async fn update(
        &self, id: Self::ID, req: Self::UpdateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let mut set = Document::new();
        if let Some(title) = req.title {
            set.insert("title", title);
        }
        if let Some(permission) = req.permission {
            set.insert("permission", permission);
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
            return Err(GroupError::IdNotFound { id });
        }
        Ok(())
    }
}
