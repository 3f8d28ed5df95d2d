use derived_cache::{CacheKey, Mode, fingerprint};
use mongodb::bson::oid::ObjectId;

pub const QUESTION_KIND: &str = "question";
/// Derived value "every question of one book".
pub const BOOK_QUESTIONS_KIND: &str = "book-questions";

pub fn question_key(id: &ObjectId, mode: Mode) -> CacheKey {
    let hex = id.to_hex();
    fingerprint(QUESTION_KIND, &[hex.as_str()], mode)
}

pub fn book_questions_key(book: &ObjectId, mode: Mode) -> CacheKey {
    let hex = book.to_hex();
    fingerprint(BOOK_QUESTIONS_KIND, &[hex.as_str()], mode)
}
