//! Service tests: MongoDB container (requires Docker) plus the
//! in-process cache backend.

use derived_cache::{DerivedCache, MemoryConfig, Mode};
use mongodb::bson::oid::ObjectId;
use question_domain::{
    NewQuestion, Question, QuestionOption, RedactedQuestion, UpdateQuestion,
};
use question_service::{
    BookQuestionsQueryHandler, CreateQuestionHandler,
    DeleteQuestionHandler, GetQuestionQueryHandler, UpdateQuestionHandler,
    cache_keys::{book_questions_key, question_key},
};
use test_utils::{TestMongoContainer, create_test_book, create_test_question};

struct Ctx {
    container: TestMongoContainer,
    cache: DerivedCache,
}

async fn setup() -> anyhow::Result<Ctx> {
    let container = TestMongoContainer::new().await?;
    let cache = DerivedCache::memory(MemoryConfig::default());
    Ok(Ctx { container, cache })
}

#[tokio::test]
async fn test_redacted_lookup_warms_full_and_hides_answer() {
    let ctx = setup().await.unwrap();
    let book = create_test_book(&ctx.container.db, "Melville", "Moby-Dick")
        .await
        .unwrap();
    let qid =
        create_test_question(&ctx.container.db, book, "Who narrates?")
            .await
            .unwrap();

    let handler = GetQuestionQueryHandler::new(
        ctx.container.connect(),
        ctx.cache.clone(),
    );

    let redacted = handler.redacted(qid).await.unwrap();
    assert_eq!(redacted.question, "Who narrates?");

    // The full projection must be warm after a redacted lookup.
    let full_key = question_key(&qid, Mode::Full);
    let warmed: Option<Question> = ctx.cache.get(&full_key).await.unwrap();
    assert_eq!(warmed.map(|q| q.answer), Some("A".to_string()));
}

#[tokio::test]
async fn test_book_question_list_dies_when_a_member_changes() {
    let ctx = setup().await.unwrap();
    let book = create_test_book(&ctx.container.db, "Melville", "Moby-Dick")
        .await
        .unwrap();
    let q1 = create_test_question(&ctx.container.db, book, "First?")
        .await
        .unwrap();
    create_test_question(&ctx.container.db, book, "Second?")
        .await
        .unwrap();

    let list = BookQuestionsQueryHandler::new(
        ctx.container.connect(),
        ctx.cache.clone(),
    );
    let update = UpdateQuestionHandler::new(
        ctx.container.connect(),
        ctx.cache.clone(),
    );

    let questions = list.full(book).await.unwrap();
    assert_eq!(questions.len(), 2);

    update
        .execute(
            q1,
            UpdateQuestion {
                answer: Some("B".into()),
                ..UpdateQuestion::default()
            },
        )
        .await
        .unwrap();

    let key = book_questions_key(&book, Mode::Full);
    let cached: Option<Vec<Question>> = ctx.cache.get(&key).await.unwrap();
    assert_eq!(cached, None);

    let refreshed = list.full(book).await.unwrap();
    let changed = refreshed.iter().find(|q| q.id == q1).unwrap();
    assert_eq!(changed.answer, "B");
}

#[tokio::test]
async fn test_creating_a_question_invalidates_the_book_list() {
    let ctx = setup().await.unwrap();
    let book = create_test_book(&ctx.container.db, "Melville", "Moby-Dick")
        .await
        .unwrap();
    create_test_question(&ctx.container.db, book, "First?")
        .await
        .unwrap();

    let list = BookQuestionsQueryHandler::new(
        ctx.container.connect(),
        ctx.cache.clone(),
    );
    let create = CreateQuestionHandler::new(
        ctx.container.connect(),
        ctx.cache.clone(),
    );

    assert_eq!(list.redacted(book).await.unwrap().len(), 1);

    create
        .execute(NewQuestion {
            book,
            question: "Second?".into(),
            options: vec![QuestionOption {
                label: "A".into(),
                text: "an option".into(),
            }],
            answer: "A".into(),
            difficulty: None,
            open: None,
        })
        .await
        .unwrap();

    // The cached list predates the insert; the book tag must have
    // dropped it.
    let key = book_questions_key(&book, Mode::Redacted);
    let cached: Option<Vec<RedactedQuestion>> =
        ctx.cache.get(&key).await.unwrap();
    assert_eq!(cached, None);

    assert_eq!(list.redacted(book).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_deleting_a_question_drops_its_projections() {
    let ctx = setup().await.unwrap();
    let book = create_test_book(&ctx.container.db, "Melville", "Moby-Dick")
        .await
        .unwrap();
    let qid = create_test_question(&ctx.container.db, book, "First?")
        .await
        .unwrap();

    let queries = GetQuestionQueryHandler::new(
        ctx.container.connect(),
        ctx.cache.clone(),
    );
    let delete = DeleteQuestionHandler::new(
        ctx.container.connect(),
        ctx.cache.clone(),
    );

    queries.full(qid).await.unwrap();
    delete.execute(qid).await.unwrap();

    for mode in [Mode::Full, Mode::Redacted] {
        let key = question_key(&qid, mode);
        let cached: Option<Question> = ctx.cache.get(&key).await.unwrap();
        assert!(cached.is_none());
    }
}

#[tokio::test]
async fn test_unknown_question_is_not_found() {
    let ctx = setup().await.unwrap();
    let handler = GetQuestionQueryHandler::new(
        ctx.container.connect(),
        ctx.cache.clone(),
    );

    let missing = ObjectId::new();
    assert!(handler.full(missing).await.is_err());

    let key = question_key(&missing, Mode::Full);
    let cached: Option<Question> = ctx.cache.get(&key).await.unwrap();
    assert_eq!(cached, None);
}
