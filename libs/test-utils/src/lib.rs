pub mod mongo;
pub mod redis;
pub mod test_helpers;

pub use mongo::TestMongoContainer;
pub use redis::TestRedisContainer;
pub use test_helpers::*;

/// Best-effort tracing init for tests; repeated calls are fine.
pub fn init_test_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
