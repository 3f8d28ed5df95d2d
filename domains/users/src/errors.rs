use derived_cache::CacheError;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {username}")]
    NotFound { username: String },
    #[error("User not found: {id}")]
    IdNotFound { id: ObjectId },
    #[error("Username already taken")]
    UsernameTaken,
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("Cache invalidation failed: {0}")]
    Cache(#[from] CacheError),
}
