use book_domain::{Book, BookDao, BookError, NewBook, UpdateBook};
use derived_cache::{DerivedCache, Invalidating};
use mongo_connection::MongoConnect;
use mongodb::bson::oid::ObjectId;
use tracing::instrument;

use crate::cache_keys::book_collection_tag;

fn repo(db: MongoConnect, cache: DerivedCache) -> Invalidating<BookDao> {
    Invalidating::with_collection_tag(
        BookDao::new(db),
        cache,
        book_collection_tag(),
    )
}

#[derive(Clone)]
pub struct CreateBookHandler {
    repo: Invalidating<BookDao>,
}

impl CreateBookHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            repo: repo(db, cache),
        }
    }

    #[instrument(skip(self, command))]
    pub async fn execute(&self, command: NewBook) -> Result<Book, BookError> {
        self.repo.create(command).await
    }
}

#[derive(Clone)]
pub struct UpdateBookHandler {
    repo: Invalidating<BookDao>,
}

impl UpdateBookHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            repo: repo(db, cache),
        }
    }

    #[instrument(skip(self, command))]
    pub async fn execute(
        &self, id: ObjectId, command: UpdateBook,
    ) -> Result<Book, BookError> {
        self.repo.update(id, command).await
    }
}

#[derive(Clone)]
pub struct DeleteBookHandler {
    repo: Invalidating<BookDao>,
}

impl DeleteBookHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            repo: repo(db, cache),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, id: ObjectId) -> Result<(), BookError> {
        self.repo.delete(id).await
    }
}
