use anyhow::Result;
use mongodb::{
    Database,
    bson::{DateTime, Document, doc, oid::ObjectId},
};

/// Insert a book document and return its id.
pub async fn create_test_book(
    db: &Database, author: &str, name: &str,
) -> Result<ObjectId> {
    let id = ObjectId::new();
    db.collection::<Document>("books")
        .insert_one(doc! {
            "_id": id,
            "name": name,
            "author": author,
            "open": false,
            "category": ["novel"],
            "cover": "https://covers.example/placeholder.png",
            "description": "test fixture",
            "creator": "fixtures",
            "quiz": [],
        })
        .await?;
    Ok(id)
}

pub async fn create_test_question(
    db: &Database, book: ObjectId, text: &str,
) -> Result<ObjectId> {
    let id = ObjectId::new();
    db.collection::<Document>("questions")
        .insert_one(doc! {
            "_id": id,
            "book": book,
            "question": text,
            "options": [
                { "label": "A", "text": "first option" },
                { "label": "B", "text": "second option" },
            ],
            "answer": "A",
            "difficulty": 1,
            "open": true,
        })
        .await?;
    Ok(id)
}

pub async fn create_test_quiz(
    db: &Database, book: ObjectId, questions: &[(ObjectId, &str)],
) -> Result<ObjectId> {
    let id = ObjectId::new();
    let questions: Vec<Document> = questions
        .iter()
        .map(|(qid, answer)| doc! { "id": qid, "answer": *answer })
        .collect();
    db.collection::<Document>("quizzes")
        .insert_one(doc! {
            "_id": id,
            "book": book,
            "questions": questions,
        })
        .await?;
    Ok(id)
}

pub async fn create_test_user(
    db: &Database, username: &str,
) -> Result<ObjectId> {
    let id = ObjectId::new();
    db.collection::<Document>("users")
        .insert_one(doc! {
            "_id": id,
            "username": username,
            "name": "Test User",
            "password": "$argon2id$test-only-hash",
            "created_time": DateTime::now(),
            "school": "test school",
            "student_id": "20260001",
            "group": "student",
            "status": "ok",
        })
        .await?;
    Ok(id)
}

pub async fn create_test_group(
    db: &Database, title: &str,
) -> Result<ObjectId> {
    let id = ObjectId::new();
    db.collection::<Document>("groups")
        .insert_one(doc! {
            "_id": id,
            "title": title,
            "permission": ["ReadBook", "TakeQuiz"],
        })
        .await?;
    Ok(id)
}
