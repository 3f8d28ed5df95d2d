//! Service tests: MongoDB container (requires Docker) plus the
//! in-process cache backend.

use derived_cache::{DerivedCache, MemoryConfig, Mode};
use test_utils::{TestMongoContainer, create_test_user};
use user_domain::{RedactedUser, User, UserError, UserStatus};
use user_service::{
    BanUserHandler, GetUserQueryHandler, cache_keys::account_key,
};

struct Ctx {
    container: TestMongoContainer,
    cache: DerivedCache,
}

async fn setup() -> anyhow::Result<Ctx> {
    let container = TestMongoContainer::new().await?;
    let cache = DerivedCache::memory(MemoryConfig::default());
    Ok(Ctx { container, cache })
}

#[tokio::test]
async fn test_redacted_lookup_warms_full_and_hides_credentials() {
    let ctx = setup().await.unwrap();
    create_test_user(&ctx.container.db, "ishmael").await.unwrap();

    let handler = GetUserQueryHandler::new(
        ctx.container.connect(),
        ctx.cache.clone(),
    );

    let redacted = handler.redacted("ishmael").await.unwrap();
    assert_eq!(redacted.username, "ishmael");

    let full_key = account_key("ishmael", Mode::Full);
    let warmed: Option<User> = ctx.cache.get(&full_key).await.unwrap();
    assert!(warmed.is_some());
}

#[tokio::test]
async fn test_missing_user_is_not_found_and_never_cached() {
    let ctx = setup().await.unwrap();
    let handler = GetUserQueryHandler::new(
        ctx.container.connect(),
        ctx.cache.clone(),
    );

    assert!(matches!(
        handler.full("nobody").await,
        Err(UserError::NotFound { .. })
    ));

    let key = account_key("nobody", Mode::Full);
    let cached: Option<User> = ctx.cache.get(&key).await.unwrap();
    assert_eq!(cached, None);
}

#[tokio::test]
async fn test_ban_invalidates_the_cached_account() {
    let ctx = setup().await.unwrap();
    let id = create_test_user(&ctx.container.db, "ishmael")
        .await
        .unwrap();

    let queries = GetUserQueryHandler::new(
        ctx.container.connect(),
        ctx.cache.clone(),
    );
    let ban =
        BanUserHandler::new(ctx.container.connect(), ctx.cache.clone());

    let before = queries.full("ishmael").await.unwrap();
    assert_eq!(before.status, UserStatus::Ok);

    ban.execute(id).await.unwrap();

    // Both projections of the pre-ban account must be gone.
    for mode in [Mode::Full, Mode::Redacted] {
        let key = account_key("ishmael", mode);
        let cached: Option<RedactedUser> =
            ctx.cache.get(&key).await.unwrap();
        assert!(cached.is_none());
    }

    let after = queries.full("ishmael").await.unwrap();
    assert_eq!(after.status, UserStatus::Banned);
}
