use std::time::Duration;

use database_traits::dao::GenericDao;
use derived_cache::{DerivedCache, EntityId, Mode};
use mongo_connection::MongoConnect;
use mongodb::bson::oid::ObjectId;
use question_domain::{
    Question, QuestionDao, QuestionError, QuestionOption,
};
use quiz_domain::{QuizDao, QuizError};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::cache_keys::quiz_key;

pub(crate) const ENTITY_TTL: Duration = Duration::from_secs(300);

/// A quiz with its questions pulled in — answers included.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizView {
    pub id: ObjectId,
    pub book: ObjectId,
    pub questions: Vec<Question>,
}

/// The quiz as handed to a test taker: question ids and prompts stay,
/// answers are gone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RedactedQuizView {
    pub id: ObjectId,
    pub book: ObjectId,
    pub questions: Vec<RedactedQuizSlot>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RedactedQuizSlot {
    pub id: ObjectId,
    pub question: String,
    pub options: Vec<QuestionOption>,
}

impl QuizView {
    fn redacted(&self) -> RedactedQuizView {
        RedactedQuizView {
            id: self.id,
            book: self.book,
            questions: self
                .questions
                .iter()
                .map(|q| {
                    RedactedQuizSlot {
                        id: q.id,
                        question: q.question.clone(),
                        options: q.options.clone(),
                    }
                })
                .collect(),
        }
    }
}

fn question_err(err: QuestionError) -> QuizError {
    match err {
        QuestionError::IdNotFound { id } => QuizError::MissingQuestion { id },
        QuestionError::Database(e) => QuizError::Database(e),
        QuestionError::Cache(e) => QuizError::Cache(e),
    }
}

/// Quiz lookup with questions expanded — the cache entry depends on
/// the quiz *and* every question in it, so either side changing drops
/// the view.
#[derive(Clone)]
pub struct GetQuizQueryHandler {
    quiz_dao: QuizDao,
    question_dao: QuestionDao,
    cache: DerivedCache,
}

impl GetQuizQueryHandler {
    pub fn new(db: MongoConnect, cache: DerivedCache) -> Self {
        Self {
            quiz_dao: QuizDao::new(db.clone()),
            question_dao: QuestionDao::new(db),
            cache,
        }
    }

    #[instrument(skip(self))]
    pub async fn full(&self, id: ObjectId) -> Result<QuizView, QuizError> {
        let key = quiz_key(&id, Mode::Full);
        match self.cache.get::<QuizView>(&key).await {
            Ok(Some(view)) => {
                debug!("Cache hit for quiz {id}");
                return Ok(view);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "cache read failed, going to store")
            }
        }

        debug!("Cache miss for quiz {id}, fetching from store");
        self.load(id).await
    }

    #[instrument(skip(self))]
    pub async fn redacted(
        &self, id: ObjectId,
    ) -> Result<RedactedQuizView, QuizError> {
        let key = quiz_key(&id, Mode::Redacted);
        match self.cache.get::<RedactedQuizView>(&key).await {
            Ok(Some(view)) => {
                debug!("Cache hit for quiz {id}");
                return Ok(view);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "cache read failed, going to store")
            }
        }

        debug!("Cache miss for quiz {id}, fetching from store");
        Ok(self.load(id).await?.redacted())
    }

    async fn load(&self, id: ObjectId) -> Result<QuizView, QuizError> {
        let quiz = self.quiz_dao.find_by_id(id).await?;

        let mut questions = Vec::with_capacity(quiz.questions.len());
        for slot in &quiz.questions {
            questions.push(
                self.question_dao
                    .find_by_id(slot.id)
                    .await
                    .map_err(question_err)?,
            );
        }

        let view = QuizView {
            id: quiz.id,
            book: quiz.book,
            questions,
        };

        // Every constituent tags the entry: the quiz itself plus each
        // question whose text or answer feeds the view.
        let mut deps = vec![EntityId::of(&quiz.id)];
        deps.extend(view.questions.iter().map(|q| EntityId::of(&q.id)));

        if let Err(err) = self
            .cache
            .put(&quiz_key(&id, Mode::Full), &deps, &view, Some(ENTITY_TTL))
            .await
        {
            warn!(error = %err, "failed to warm full quiz cache");
        }
        if let Err(err) = self
            .cache
            .put(
                &quiz_key(&id, Mode::Redacted),
                &deps,
                &view.redacted(),
                Some(ENTITY_TTL),
            )
            .await
        {
            warn!(error = %err, "failed to warm redacted quiz cache");
        }

        Ok(view)
    }
}
