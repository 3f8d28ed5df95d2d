//! Service tests: MongoDB container (requires Docker) plus the
//! in-process cache backend.

use derived_cache::{DerivedCache, MemoryConfig, Mode};
use mongodb::bson::oid::ObjectId;
use question_domain::UpdateQuestion;
use question_service::UpdateQuestionHandler;
use quiz_domain::QuizError;
use quiz_service::{
    DeleteQuizHandler, GetQuizQueryHandler, QuizView, cache_keys::quiz_key,
};
use test_utils::{
    TestMongoContainer, create_test_book, create_test_question,
    create_test_quiz,
};

struct Ctx {
    container: TestMongoContainer,
    cache: DerivedCache,
}

async fn setup() -> anyhow::Result<Ctx> {
    let container = TestMongoContainer::new().await?;
    let cache = DerivedCache::memory(MemoryConfig::default());
    Ok(Ctx { container, cache })
}

async fn seed_quiz(ctx: &Ctx) -> anyhow::Result<(ObjectId, ObjectId, ObjectId)> {
    let book =
        create_test_book(&ctx.container.db, "Melville", "Moby-Dick").await?;
    let q1 =
        create_test_question(&ctx.container.db, book, "First?").await?;
    let q2 =
        create_test_question(&ctx.container.db, book, "Second?").await?;
    let quiz = create_test_quiz(
        &ctx.container.db,
        book,
        &[(q1, "A"), (q2, "B")],
    )
    .await?;
    Ok((quiz, q1, q2))
}

#[tokio::test]
async fn test_full_view_expands_questions_and_warms_redacted() {
    let ctx = setup().await.unwrap();
    let (quiz, q1, _q2) = seed_quiz(&ctx).await.unwrap();

    let handler = GetQuizQueryHandler::new(
        ctx.container.connect(),
        ctx.cache.clone(),
    );

    let view = handler.full(quiz).await.unwrap();
    assert_eq!(view.questions.len(), 2);
    assert!(view.questions.iter().any(|q| q.id == q1));

    let redacted = handler.redacted(quiz).await.unwrap();
    assert_eq!(redacted.questions.len(), 2);

    let json = serde_json::to_string(&redacted).unwrap();
    assert!(!json.contains("answer"));
}

#[tokio::test]
async fn test_quiz_view_dies_when_a_question_changes() {
    let ctx = setup().await.unwrap();
    let (quiz, q1, _q2) = seed_quiz(&ctx).await.unwrap();

    let queries = GetQuizQueryHandler::new(
        ctx.container.connect(),
        ctx.cache.clone(),
    );
    let update_question = UpdateQuestionHandler::new(
        ctx.container.connect(),
        ctx.cache.clone(),
    );

    queries.full(quiz).await.unwrap();

    // The quiz itself never changed, but one of its questions did.
    update_question
        .execute(
            q1,
            UpdateQuestion {
                question: Some("First, revised?".into()),
                ..UpdateQuestion::default()
            },
        )
        .await
        .unwrap();

    for mode in [Mode::Full, Mode::Redacted] {
        let key = quiz_key(&quiz, mode);
        let cached: Option<QuizView> = ctx.cache.get(&key).await.unwrap();
        assert!(cached.is_none());
    }

    let refreshed = queries.full(quiz).await.unwrap();
    let revised = refreshed.questions.iter().find(|q| q.id == q1).unwrap();
    assert_eq!(revised.question, "First, revised?");
}

#[tokio::test]
async fn test_deleting_a_quiz_drops_its_views() {
    let ctx = setup().await.unwrap();
    let (quiz, ..) = seed_quiz(&ctx).await.unwrap();

    let queries = GetQuizQueryHandler::new(
        ctx.container.connect(),
        ctx.cache.clone(),
    );
    let delete = DeleteQuizHandler::new(
        ctx.container.connect(),
        ctx.cache.clone(),
    );

    queries.full(quiz).await.unwrap();
    delete.execute(quiz).await.unwrap();

    let key = quiz_key(&quiz, Mode::Full);
    let cached: Option<QuizView> = ctx.cache.get(&key).await.unwrap();
    assert_eq!(cached, None);

    assert!(matches!(
        queries.full(quiz).await,
        Err(QuizError::IdNotFound { .. })
    ));
}

#[tokio::test]
async fn test_unknown_quiz_is_not_found() {
    let ctx = setup().await.unwrap();
    let handler = GetQuizQueryHandler::new(
        ctx.container.connect(),
        ctx.cache.clone(),
    );

    assert!(matches!(
        handler.redacted(ObjectId::new()).await,
        Err(QuizError::IdNotFound { .. })
    ));
}
