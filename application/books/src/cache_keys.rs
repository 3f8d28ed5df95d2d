use derived_cache::{
    CacheKey, EntityId, Mode, fingerprint, fingerprint_batch,
};

pub const BOOK_KIND: &str = "book";

/// Author + title pair addressing one book.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct BookRef {
    pub author: String,
    pub name: String,
}

impl BookRef {
    pub fn new(author: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            name: name.into(),
        }
    }
}

pub fn book_key(author: &str, name: &str, mode: Mode) -> CacheKey {
    fingerprint(BOOK_KIND, &[author, name], mode)
}

pub fn book_batch_key(refs: &[BookRef], mode: Mode) -> CacheKey {
    let members: Vec<Vec<&str>> = refs
        .iter()
        .map(|r| vec![r.author.as_str(), r.name.as_str()])
        .collect();
    fingerprint_batch(BOOK_KIND, &members, mode)
}

pub fn book_list_key(mode: Mode) -> CacheKey {
    fingerprint(BOOK_KIND, &["list"], mode)
}

/// Sentinel tag for list-shaped book caches; inserts and deletes
/// invalidate it.
pub fn book_collection_tag() -> EntityId { EntityId::collection(BOOK_KIND) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_key_is_order_insensitive() {
        let forward = vec![
            BookRef::new("Melville", "Moby-Dick"),
            BookRef::new("Hemingway", "The Old Man and the Sea"),
        ];
        let reversed = vec![
            BookRef::new("Hemingway", "The Old Man and the Sea"),
            BookRef::new("Melville", "Moby-Dick"),
        ];

        assert_eq!(
            book_batch_key(&forward, Mode::Redacted),
            book_batch_key(&reversed, Mode::Redacted)
        );
    }

    #[test]
    fn test_single_and_list_keys_do_not_collide() {
        let single = book_key("Melville", "Moby-Dick", Mode::Full);
        let list = book_list_key(Mode::Full);
        assert_ne!(single, list);
    }
}
