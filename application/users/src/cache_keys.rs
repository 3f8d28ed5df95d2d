use derived_cache::{CacheKey, Mode, fingerprint};

pub const ACCOUNT_KIND: &str = "account";

pub fn account_key(username: &str, mode: Mode) -> CacheKey {
    fingerprint(ACCOUNT_KIND, &[username], mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_modes_are_separate() {
        assert_ne!(
            account_key("ishmael", Mode::Full),
            account_key("ishmael", Mode::Redacted)
        );
    }

    #[test]
    fn test_usernames_get_distinct_keys() {
        assert_ne!(
            account_key("ishmael", Mode::Full),
            account_key("queequeg", Mode::Full)
        );
    }
}
