//! DAO tests against a MongoDB container (requires Docker).

use book_domain::{BookDao, BookError, NewBook, UpdateBook};
use database_traits::dao::GenericDao;
use mongodb::bson::oid::ObjectId;
use test_utils::TestMongoContainer;

async fn setup() -> anyhow::Result<(TestMongoContainer, BookDao)> {
    let container = TestMongoContainer::new().await?;
    let dao = BookDao::new(container.connect());
    Ok((container, dao))
}

fn new_book(author: &str, name: &str) -> NewBook {
    NewBook {
        name: name.into(),
        author: author.into(),
        category: vec!["novel".into()],
        cover: None,
        description: Some("test".into()),
        creator: Some("tests".into()),
    }
}

#[tokio::test]
async fn test_create_and_find_by_author_name() {
    let (_container, dao) = setup().await.unwrap();

    let created =
        dao.create(new_book("Melville", "Moby-Dick")).await.unwrap();

    let found = dao
        .find_by_author_name("Melville", "Moby-Dick")
        .await
        .unwrap()
        .expect("book should exist");
    assert_eq!(found, created);
    assert!(!found.open);
}

#[tokio::test]
async fn test_duplicate_create_is_rejected() {
    let (_container, dao) = setup().await.unwrap();

    dao.create(new_book("Melville", "Moby-Dick")).await.unwrap();
    let result = dao.create(new_book("Melville", "Moby-Dick")).await;
    assert!(matches!(result, Err(BookError::Duplicate)));
}

#[tokio::test]
async fn test_update_merges_partial_fields() {
    let (_container, dao) = setup().await.unwrap();

    let created =
        dao.create(new_book("Melville", "Moby-Dick")).await.unwrap();

    let updated = dao
        .update(
            created.id,
            UpdateBook {
                description: Some("the whale one".into()),
                open: Some(true),
                ..UpdateBook::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Moby-Dick");
    assert_eq!(updated.description.as_deref(), Some("the whale one"));
    assert!(updated.open);
}

#[tokio::test]
async fn test_delete_then_find_is_not_found() {
    let (_container, dao) = setup().await.unwrap();

    let created =
        dao.create(new_book("Melville", "Moby-Dick")).await.unwrap();
    dao.delete(created.id).await.unwrap();

    assert!(matches!(
        dao.find_by_id(created.id).await,
        Err(BookError::IdNotFound { .. })
    ));
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let (_container, dao) = setup().await.unwrap();

    let missing = ObjectId::new();
    assert!(matches!(
        dao.find_by_id(missing).await,
        Err(BookError::IdNotFound { id }) if id == missing
    ));
    assert!(matches!(
        dao.delete(missing).await,
        Err(BookError::IdNotFound { .. })
    ));
}
