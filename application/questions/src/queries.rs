use std::time::Duration;

use database_traits::dao::GenericDao;
use derived_cache::{DerivedCache, EntityId, Mode};
use mongo_connection::MongoConnect;
use mongodb::bson::oid::ObjectId;
use question_domain::{
    Question, QuestionDao, QuestionError, RedactedQuestion,
};
use tracing::{debug, instrument, warn};

use crate::cache_keys::{book_questions_key, question_key};

pub(crate) const ENTITY_TTL: Duration = Duration::from_secs(300);
pub(crate) const LIST_TTL: Duration = Duration::from_secs(120);

#[derive(Clone)]
pub struct GetQuestionQueryHandler {
    question_dao: QuestionDao,
    cache: DerivedCache,
}

impl GetQuestionQueryHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            question_dao: QuestionDao::new(db),
            cache,
        }
    }

    #[instrument(skip(self))]
    pub async fn full(
        &self, id: ObjectId,
    ) -> Result<Question, QuestionError> {
        let key = question_key(&id, Mode::Full);
        match self.cache.get::<Question>(&key).await {
            Ok(Some(question)) => {
                debug!("Cache hit for question {id}");
                return Ok(question);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "cache read failed, going to store")
            }
        }

        debug!("Cache miss for question {id}, fetching from store");
        self.load(id).await
    }

    #[instrument(skip(self))]
    pub async fn redacted(
        &self, id: ObjectId,
    ) -> Result<RedactedQuestion, QuestionError> {
        let key = question_key(&id, Mode::Redacted);
        match self.cache.get::<RedactedQuestion>(&key).await {
            Ok(Some(question)) => {
                debug!("Cache hit for question {id}");
                return Ok(question);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "cache read failed, going to store")
            }
        }

        debug!("Cache miss for question {id}, fetching from store");
        Ok(self.load(id).await?.redacted())
    }

    async fn load(&self, id: ObjectId) -> Result<Question, QuestionError> {
        let question = self.question_dao.find_by_id(id).await?;

        let deps = [EntityId::of(&question.id)];
        if let Err(err) = self
            .cache
            .put(
                &question_key(&id, Mode::Full),
                &deps,
                &question,
                Some(ENTITY_TTL),
            )
            .await
        {
            warn!(error = %err, "failed to warm full question cache");
        }
        if let Err(err) = self
            .cache
            .put(
                &question_key(&id, Mode::Redacted),
                &deps,
                &question.redacted(),
                Some(ENTITY_TTL),
            )
            .await
        {
            warn!(error = %err, "failed to warm redacted question cache");
        }

        Ok(question)
    }
}

/// Every question of one book — a multi-entity derived value tagged
/// with the book and with each question it contains.
#[derive(Clone)]
pub struct BookQuestionsQueryHandler {
    question_dao: QuestionDao,
    cache: DerivedCache,
}

impl BookQuestionsQueryHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            question_dao: QuestionDao::new(db),
            cache,
        }
    }

    #[instrument(skip(self))]
    pub async fn full(
        &self, book: ObjectId,
    ) -> Result<Vec<Question>, QuestionError> {
        let key = book_questions_key(&book, Mode::Full);
        match self.cache.get::<Vec<Question>>(&key).await {
            Ok(Some(questions)) => {
                debug!("Cache hit for questions of book {book}");
                return Ok(questions);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "cache read failed, going to store")
            }
        }

        self.load(book).await
    }

    #[instrument(skip(self))]
    pub async fn redacted(
        &self, book: ObjectId,
    ) -> Result<Vec<RedactedQuestion>, QuestionError> {
        let key = book_questions_key(&book, Mode::Redacted);
        match self.cache.get::<Vec<RedactedQuestion>>(&key).await {
            Ok(Some(questions)) => {
                debug!("Cache hit for questions of book {book}");
                return Ok(questions);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "cache read failed, going to store")
            }
        }

        let questions = self.load(book).await?;
        Ok(questions.iter().map(Question::redacted).collect())
    }

    async fn load(
        &self, book: ObjectId,
    ) -> Result<Vec<Question>, QuestionError> {
        let questions =
            self.question_dao.find_by_book(book, false).await?;

        // Tagged with the book as well: the per-question tags cannot
        // outlive their questions, and a freshly created question is
        // reachable only through the book tag.
        let mut deps: Vec<EntityId> =
            questions.iter().map(|q| EntityId::of(&q.id)).collect();
        deps.push(EntityId::of(&book));

        let redacted: Vec<RedactedQuestion> =
            questions.iter().map(Question::redacted).collect();

        if let Err(err) = self
            .cache
            .put(
                &book_questions_key(&book, Mode::Full),
                &deps,
                &questions,
                Some(LIST_TTL),
            )
            .await
        {
            warn!(error = %err, "failed to warm full question list cache");
        }
        if let Err(err) = self
            .cache
            .put(
                &book_questions_key(&book, Mode::Redacted),
                &deps,
                &redacted,
                Some(LIST_TTL),
            )
            .await
        {
            warn!(
                error = %err,
                "failed to warm redacted question list cache"
            );
        }

        Ok(questions)
    }
}
