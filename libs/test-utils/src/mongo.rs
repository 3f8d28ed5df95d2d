use anyhow::{Context, Result};
use mongo_connection::MongoConnect;
use mongodb::{Client, Database, bson::doc};
use testcontainers_modules::{
    mongo::Mongo,
    testcontainers::{ContainerAsync, runners::AsyncRunner},
};

/// MongoDB test container exposing a fresh database per test.
pub struct TestMongoContainer {
    pub client: Client,
    pub db: Database,
    pub connection_string: String,
    // Keep the container alive for the lifetime of this struct
    _container: ContainerAsync<Mongo>,
}

impl TestMongoContainer {
    pub async fn new() -> Result<Self> {
        crate::init_test_tracing();

        let container = Mongo::default()
            .start()
            .await
            .context("Failed to start MongoDB container")?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(27017).await?;
        let connection_string = format!("mongodb://{host}:{port}");

        let client = Client::with_uri_str(&connection_string)
            .await
            .context("Failed to connect to MongoDB container")?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .context("MongoDB container did not answer ping")?;

        let db = client.database("lectern_test");

        Ok(Self {
            client,
            db,
            connection_string,
            _container: container,
        })
    }

    pub fn connect(&self) -> MongoConnect {
        MongoConnect::new(self.db.clone())
    }
}
