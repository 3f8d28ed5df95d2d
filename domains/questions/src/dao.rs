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
    errors::QuestionError,
    models::{NewQuestion, Question, UpdateQuestion},
};

pub const COLLECTION: &str = "questions";

#[derive(Clone)]
pub struct QuestionDao {
    db: MongoConnect,
}

impl QuestionDao {
    pub fn new(db: MongoConnect) -> Self { Self { db } }

    fn collection(&self) -> Collection<Question> {
        self.db.collection(COLLECTION)
    }

    /// All questions of one book, optionally restricted to ones open
    /// for quizzing.
    #[instrument(skip(self))]
    pub async fn find_by_book(
        &self, book: ObjectId, open_only: bool,
    ) -> Result<Vec<Question>, QuestionError> {
        let filter = if open_only {
            doc! { "book": book, "open": true }
        }
        else {
            doc! { "book": book }
        };
        let cursor = self.collection().find(filter).await?;
        Ok(cursor.try_collect().await?)
    }
}

#[async_trait]
impl GenericDao for QuestionDao {
    type CreateRequest = NewQuestion;
    type Error = QuestionError;
    type ID = ObjectId;
    type Model = Question;
    type Response = Question;
    type UpdateRequest = UpdateQuestion;

    #[instrument(skip(self))]
    async fn find_by_id(
        &self, id: Self::ID,
    ) -> Result<Self::Response, Self::Error> {
        self.collection()
            .find_one(doc! { "_id": id })
            .await?
            .ok_or(QuestionError::IdNotFound { id })
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
        let question = Question {
            id: ObjectId::new(),
            book: req.book,
            question: req.question,
            options: req.options,
            answer: req.answer,
            difficulty: req.difficulty.unwrap_or(1),
            open: req.open.unwrap_or(true),
        };
        self.collection().insert_one(&question).await?;
        Ok(question)
    }

    #[instrument(skip(self, req))]
    async fn update(
        &self, id: Self::ID, req: Self::UpdateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let mut set = Document::new();
        if let Some(question) = req.question {
            set.insert("question", question);
        }
        if let Some(options) = req.options {
            let options = mongodb::bson::to_bson(&options)
                .map_err(mongodb::error::Error::from)?;
            set.insert("options", options);
        }
        if let Some(answer) = req.answer {
            set.insert("answer", answer);
        }
        if let Some(difficulty) = req.difficulty {
            set.insert("difficulty", difficulty);
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
            return Err(QuestionError::IdNotFound { id });
        }
        Ok(())
    }
}
