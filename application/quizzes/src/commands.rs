use derived_cache::{DerivedCache, Invalidating};
use mongo_connection::MongoConnect;
use mongodb::bson::oid::ObjectId;
use quiz_domain::{NewQuiz, Quiz, QuizDao, QuizError};
use tracing::instrument;

#[derive(Clone)]
pub struct CreateQuizHandler {
    repo: Invalidating<QuizDao>,
}

impl CreateQuizHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            repo: Invalidating::new(QuizDao::new(db), cache),
        }
    }

    #[instrument(skip(self, command))]
    pub async fn execute(&self, command: NewQuiz) -> Result<Quiz, QuizError> {
        self.repo.create(command).await
    }
}

#[derive(Clone)]
pub struct DeleteQuizHandler {
    repo: Invalidating<QuizDao>,
}

impl DeleteQuizHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            repo: Invalidating::new(QuizDao::new(db), cache),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, id: ObjectId) -> Result<(), QuizError> {
        self.repo.delete(id).await
    }
}
