use std::ops::{Deref, DerefMut};

use deadpool_redis::redis::{
    ErrorKind, FromRedisValue, RedisError, RedisResult, RedisWrite,
    ToRedisArgs, Value,
};
use serde::{Deserialize, Serialize};

/// Byte-level codec contract for everything that travels through the
/// cache store.
pub trait CacheValue: Sized + Send + Sync {
    fn to_bytes(&self) -> Result<Vec<u8>, CodecError>;

    fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Serialization failed: {0}")]
    Serialization(String),
    #[error("Deserialization failed: {0}")]
    Deserialization(String),
}

/// JSON wrapper for cached payloads. Implements the Redis argument and
/// value traits so wrapped types can be passed straight to commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn new(value: T) -> Self { Self(value) }

    pub fn inner(self) -> T { self.0 }

    pub fn as_inner(&self) -> &T { &self.0 }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target { &self.0 }
}

impl<T> DerefMut for Json<T> {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.0 }
}

impl<T> From<T> for Json<T> {
    fn from(value: T) -> Self { Json(value) }
}

impl<T> CacheValue for Json<T>
where
    T: Serialize + for<'de> Deserialize<'de> + Send + Sync,
{
    fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(&self.0)
            .map_err(|e| CodecError::Serialization(e.to_string()))
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        serde_json::from_slice(bytes)
            .map(Json)
            .map_err(|e| CodecError::Deserialization(e.to_string()))
    }
}

impl<T> ToRedisArgs for Json<T>
where
    T: Serialize + for<'de> Deserialize<'de> + Send + Sync,
{
    fn write_redis_args<W>(&self, out: &mut W)
    where
        W: ?Sized + RedisWrite,
    {
        match self.to_bytes() {
            Ok(bytes) => out.write_arg(&bytes),
            Err(_) => out.write_arg(b""),
        }
    }
}

impl<T> FromRedisValue for Json<T>
where
    T: Serialize + for<'de> Deserialize<'de> + Send + Sync,
{
    fn from_redis_value(v: &Value) -> RedisResult<Self> {
        match v {
            Value::BulkString(data) => {
                Self::from_bytes(data).map_err(|e| {
                    RedisError::from((
                        ErrorKind::TypeError,
                        "JSON deserialization failed",
                        e.to_string(),
                    ))
                })
            }
            Value::Nil => {
                Err(RedisError::from((
                    ErrorKind::TypeError,
                    "Cannot convert nil to JSON value",
                )))
            }
            _ => {
                Err(RedisError::from((
                    ErrorKind::TypeError,
                    "Expected bulk string for JSON",
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
    struct Entry {
        id: String,
        title: String,
        open: bool,
    }

    #[test]
    fn test_json_roundtrip() {
        let entry = Entry {
            id: "5f1d7a3e2c".into(),
            title: "The Old Man and the Sea".into(),
            open: true,
        };
        let json = Json(entry.clone());

        let bytes = json.to_bytes().unwrap();
        let recovered = Json::<Entry>::from_bytes(&bytes).unwrap();

        assert_eq!(recovered.0, entry);
    }

    #[test]
    fn test_from_redis_nil_is_type_error() {
        let err = Json::<Entry>::from_redis_value(&Value::Nil).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeError);
    }
}
