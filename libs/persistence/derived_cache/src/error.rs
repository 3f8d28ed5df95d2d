use redis_connection::value::CodecError;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The cache store could not be reached or a command failed.
    /// Read paths treat this as a miss and fall back to the content
    /// store; mutation paths surface it as a failed mutation.
    #[error("cache store unavailable: {0}")]
    Unavailable(String),

    /// `put` called with no dependent entity ids. Such an entry could
    /// never be invalidated, so it is rejected before anything is
    /// written.
    #[error("cache entry declared no dependent entities")]
    EmptyDependencySet,

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Deserialization failed: {0}")]
    Deserialization(String),
}

pub type CacheResult<T> = Result<T, CacheError>;

impl From<deadpool_redis::PoolError> for CacheError {
    fn from(err: deadpool_redis::PoolError) -> Self {
        CacheError::Unavailable(err.to_string())
    }
}

impl From<CodecError> for CacheError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Serialization(msg) => CacheError::Serialization(msg),
            CodecError::Deserialization(msg) => {
                CacheError::Deserialization(msg)
            }
        }
    }
}

/// A `TypeError` out of the driver means the stored bytes did not decode
/// as the requested type; everything else is the store being unreachable.
pub(crate) fn map_redis_err(err: redis::RedisError) -> CacheError {
    match err.kind() {
        redis::ErrorKind::TypeError => {
            CacheError::Deserialization(err.to_string())
        }
        _ => CacheError::Unavailable(err.to_string()),
    }
}
