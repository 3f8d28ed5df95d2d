use database_traits::dao::GenericDao;
use derived_cache::{DerivedCache, EntityId, Invalidating};
use mongo_connection::MongoConnect;
use mongodb::bson::oid::ObjectId;
use question_domain::{
    NewQuestion, Question, QuestionDao, QuestionError, UpdateQuestion,
};
use tracing::instrument;

/// Creation cannot go through the generic wrapper alone: the book's
/// question-list caches predate the new question, so only the book tag
/// reaches them.
#[derive(Clone)]
pub struct CreateQuestionHandler {
    question_dao: QuestionDao,
    cache: DerivedCache,
}

impl CreateQuestionHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            question_dao: QuestionDao::new(db),
            cache,
        }
    }

    #[instrument(skip(self, command))]
    pub async fn execute(
        &self, command: NewQuestion,
    ) -> Result<Question, QuestionError> {
        let book = command.book;
        let question = self.question_dao.create(command).await?;
        self.cache.invalidate(&EntityId::of(&book)).await?;
        Ok(question)
    }
}

#[derive(Clone)]
pub struct UpdateQuestionHandler {
    repo: Invalidating<QuestionDao>,
}

impl UpdateQuestionHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            repo: Invalidating::new(QuestionDao::new(db), cache),
        }
    }

    #[instrument(skip(self, command))]
    pub async fn execute(
        &self, id: ObjectId, command: UpdateQuestion,
    ) -> Result<Question, QuestionError> {
        self.repo.update(id, command).await
    }
}

#[derive(Clone)]
pub struct DeleteQuestionHandler {
    repo: Invalidating<QuestionDao>,
}

impl DeleteQuestionHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            repo: Invalidating::new(QuestionDao::new(db), cache),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, id: ObjectId) -> Result<(), QuestionError> {
        self.repo.delete(id).await
    }
}
