use std::fmt;

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which projection of an entity a derived value carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Every field, privileged callers only.
    Full,
    /// Only the fields safe to expose to end users.
    Redacted,
}

impl Mode {
    pub fn is_redacted(self) -> bool { matches!(self, Mode::Redacted) }

    /// The opposite projection; read-through paths warm both.
    pub fn other(self) -> Self {
        match self {
            Mode::Full => Mode::Redacted,
            Mode::Redacted => Mode::Full,
        }
    }
}

/// Canonical string identifier of an underlying record, used as the
/// tag-index key. Opaque to the cache layer; in practice the hex form
/// of a document id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

    /// Tag id from anything with a stable canonical rendering
    /// (document ids, usernames used as natural keys, ...).
    pub fn of<T: fmt::Display>(id: &T) -> Self { Self(id.to_string()) }

    /// Sentinel id standing for a whole collection. List-shaped derived
    /// values are tagged with it so inserts and deletes, which no
    /// per-entity tag can reach, still invalidate them.
    pub fn collection(kind: &str) -> Self {
        Self(format!("{kind}:collection"))
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self { Self(id) }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self { Self(id.to_string()) }
}

/// Deterministic fingerprint of "what was requested, in which
/// projection". 32 hex chars of the MD5 digest of a canonical JSON
/// descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn digest(kind: &str, elems: Vec<Value>) -> CacheKey {
    let mut descriptor = Map::new();
    descriptor.insert(kind.to_string(), Value::Array(elems));

    let mut hasher = Md5::new();
    hasher.update(Value::Object(descriptor).to_string().as_bytes());
    CacheKey(hex::encode(hasher.finalize()))
}

/// Fingerprint a single-entity request. The descriptor is
/// `{kind: [parts...]}` with a trailing `"safe"` marker for the
/// redacted projection.
pub fn fingerprint(kind: &str, parts: &[&str], mode: Mode) -> CacheKey {
    let mut elems: Vec<Value> = parts
        .iter()
        .map(|part| Value::String((*part).to_string()))
        .collect();
    if mode.is_redacted() {
        elems.push(Value::String("safe".into()));
    }
    digest(kind, elems)
}

/// Fingerprint a batch request. Members are sorted before hashing so
/// request order never affects the key, and a batch of exactly one
/// member collapses to the single-entity scheme. The normalization
/// lives here, once, so call sites can never diverge on it.
pub fn fingerprint_batch(
    kind: &str, members: &[Vec<&str>], mode: Mode,
) -> CacheKey {
    if members.len() == 1 {
        return fingerprint(kind, &members[0], mode);
    }

    let mut sorted: Vec<Vec<&str>> = members.to_vec();
    sorted.sort();

    let mut elems: Vec<Value> = sorted
        .iter()
        .map(|member| {
            Value::Array(
                member
                    .iter()
                    .map(|part| Value::String((*part).to_string()))
                    .collect(),
            )
        })
        .collect();
    if mode.is_redacted() {
        elems.push(Value::String("safe".into()));
    }
    digest(kind, elems)
}
