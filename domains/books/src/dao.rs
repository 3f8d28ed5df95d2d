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
    errors::BookError,
    models::{Book, NewBook, UpdateBook},
};

pub const COLLECTION: &str = "books";

#[derive(Clone)]
pub struct BookDao {
    db: MongoConnect,
}

impl BookDao {
    pub fn new(db: MongoConnect) -> Self { Self { db } }

    fn collection(&self) -> Collection<Book> {
        self.db.collection(COLLECTION)
    }

    #[instrument(skip(self))]
    pub async fn find_by_author_name(
        &self, author: &str, name: &str,
    ) -> Result<Option<Book>, BookError> {
        Ok(self
            .collection()
            .find_one(doc! { "author": author, "name": name })
            .await?)
    }
}

#[async_trait]
impl GenericDao for BookDao {
    type CreateRequest = NewBook;
    type Error = BookError;
    type ID = ObjectId;
    type Model = Book;
    type Response = Book;
    type UpdateRequest = UpdateBook;

    #[instrument(skip(self))]
    async fn find_by_id(
        &self, id: Self::ID,
    ) -> Result<Self::Response, Self::Error> {
        self.collection()
            .find_one(doc! { "_id": id })
            .await?
            .ok_or(BookError::IdNotFound { id })
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
        if self
            .find_by_author_name(&req.author, &req.name)
            .await?
            .is_some()
        {
            return Err(BookError::Duplicate);
        }

        let book = Book {
            id: ObjectId::new(),
            name: req.name,
            author: req.author,
            open: false,
            category: req.category,
            cover: req.cover,
            description: req.description,
            creator: req.creator,
            quiz: Vec::new(),
        };
        self.collection().insert_one(&book).await?;
        Ok(book)
    }

    #[instrument(skip(self, req))]
    async fn update(
        &self, id: Self::ID, req: Self::UpdateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let mut set = Document::new();
        if let Some(name) = req.name {
            set.insert("name", name);
        }
        if let Some(author) = req.author {
            set.insert("author", author);
        }
        if let Some(category) = req.category {
            set.insert("category", category);
        }
        if let Some(cover) = req.cover {
            set.insert("cover", cover);
        }
        if let Some(description) = req.description {
            set.insert("description", description);
        }
        if let Some(open) = req.open {
            set.insert("open", open);
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
            return Err(BookError::IdNotFound { id });
        }
        Ok(())
    }
}
