use derived_cache::{CacheKey, Mode, fingerprint};

pub const GROUP_KIND: &str = "group";

pub fn group_key(title: &str, mode: Mode) -> CacheKey {
    fingerprint(GROUP_KIND, &[title], mode)
}
