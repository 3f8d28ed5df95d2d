use std::sync::OnceLock;

use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use tracing::{info, instrument};

use crate::config::{DbConnectConfig, DbOptionsConfig};

static MONGO_DATABASE: OnceLock<Database> = OnceLock::new();

#[instrument(skip_all, name = "connect-mongodb")]
pub async fn connect_mongo_db<C>(config: &C) -> Result<(), anyhow::Error>
where
    C: DbConnectConfig + DbOptionsConfig,
{
    info!(
        mongodb.uri = config.uri(),
        mongodb.db = config.name(),
        mongodb.max_pool = ?config.max_pool_size(),
        mongodb.min_pool = ?config.min_pool_size(),
    );

    let mut options = ClientOptions::parse(config.uri()).await?;
    options.max_pool_size = config.max_pool_size();
    options.min_pool_size = config.min_pool_size();

    let client = Client::with_options(options)?;

    // Ping before publishing the handle so a dead URI fails loudly at
    // startup instead of on the first query.
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await?;

    info!("content store connection established");

    let db = client.database(config.name());

    if MONGO_DATABASE.set(db).is_err() {
        panic!("Mongo database handle already established")
    }

    Ok(())
}

pub fn get_mongo_database() -> &'static Database {
    MONGO_DATABASE
        .get()
        .expect("Mongo database handle not established")
}
