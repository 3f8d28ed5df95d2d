use derived_cache::CacheError;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookError {
    #[error("Book not found: {name} by {author}")]
    NotFound { author: String, name: String },
    #[error("Book not found: {id}")]
    IdNotFound { id: ObjectId },
    #[error("A book with this name and author already exists")]
    Duplicate,
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("Cache invalidation failed: {0}")]
    Cache(#[from] CacheError),
}
