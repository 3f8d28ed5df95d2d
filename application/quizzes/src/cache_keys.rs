use derived_cache::{CacheKey, Mode, fingerprint};
use mongodb::bson::oid::ObjectId;

pub const QUIZ_KIND: &str = "quiz";

pub fn quiz_key(id: &ObjectId, mode: Mode) -> CacheKey {
    let hex = id.to_hex();
    fingerprint(QUIZ_KIND, &[hex.as_str()], mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_modes_are_separate() {
        let id = ObjectId::new();
        assert_ne!(quiz_key(&id, Mode::Full), quiz_key(&id, Mode::Redacted));
    }
}
