use derived_cache::CacheError;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuestionError {
    #[error("Question not found: {id}")]
    IdNotFound { id: ObjectId },
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("Cache invalidation failed: {0}")]
    Cache(#[from] CacheError),
}
