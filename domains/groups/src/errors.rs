use derived_cache::CacheError;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GroupError {
    #[error("Group not found: {title}")]
    NotFound { title: String },
    #[error("Group not found: {id}")]
    IdNotFound { id: ObjectId },
    #[error("A group with this title already exists")]
    Duplicate,
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("Cache invalidation failed: {0}")]
    Cache(#[from] CacheError),
}
