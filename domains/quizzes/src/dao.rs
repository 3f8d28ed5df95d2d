use async_trait::async_trait;
use database_traits::dao::GenericDao;
use futures::TryStreamExt;
use mongo_connection::MongoConnect;
use mongodb::{
    Collection,
    bson::{doc, oid::ObjectId},
};
use tracing::instrument;

use crate::{
    errors::QuizError,
    models::{NewQuiz, Quiz, UpdateQuiz},
};

pub const COLLECTION: &str = "quizzes";

#[derive(Clone)]
pub struct QuizDao {
    db: MongoConnect,
}

impl QuizDao {
    pub fn new(db: MongoConnect) -> Self { Self { db } }

    fn collection(&self) -> Collection<Quiz> {
        self.db.collection(COLLECTION)
    }

    #[instrument(skip(self))]
    pub async fn find_by_book(
        &self, book: ObjectId,
    ) -> Result<Vec<Quiz>, QuizError> {
        let cursor = self.collection().find(doc! { "book": book }).await?;
        Ok(cursor.try_collect().await?)
    }
}

#[async_trait]
impl GenericDao for QuizDao {
    type CreateRequest = NewQuiz;
    type Error = QuizError;
    type ID = ObjectId;
    type Model = Quiz;
    type Response = Quiz;
    type UpdateRequest = UpdateQuiz;

    #[instrument(skip(self))]
    async fn find_by_id(
        &self, id: Self::ID,
    ) -> Result<Self::Response, Self::Error> {
        self.collection()
            .find_one(doc! { "_id": id })
            .await?
            .ok_or(QuizError::IdNotFound { id })
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
        let quiz = Quiz {
            id: ObjectId::new(),
            book: req.book,
            questions: req.questions,
        };
        self.collection().insert_one(&quiz).await?;
        Ok(quiz)
    }

    #[instrument(skip(self, req))]
    async fn update(
        &self, id: Self::ID, req: Self::UpdateRequest,
    ) -> Result<Self::Response, Self::Error> {
        if let Some(questions) = req.questions {
            let questions = mongodb::bson::to_bson(&questions)
                .map_err(mongodb::error::Error::from)?;
            self.collection()
                .update_one(
                    doc! { "_id": id },
                    doc! { "$set": { "questions": questions } },
                )
                .await?;
        }

        self.find_by_id(id).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Self::ID) -> Result<(), Self::Error> {
        let result =
            self.collection().delete_one(doc! { "_id": id }).await?;
        if result.deleted_count == 0 {
            return Err(QuizError::IdNotFound { id });
        }
        Ok(())
    }
}
