pub trait DbConnectConfig: serde::de::DeserializeOwned {
    fn uri(&self) -> &str;
    fn name(&self) -> &str;
}

/// Client pool sizing knobs forwarded to the driver.
pub trait DbOptionsConfig {
    fn max_pool_size(&self) -> Option<u32> { None }
    fn min_pool_size(&self) -> Option<u32> { None }
}

#[derive(Debug, serde::Deserialize)]
pub struct MongoDbConfig {
    #[serde(default = "uri_default")]
    pub uri: String,
    #[serde(default = "name_default")]
    pub name: String,
    pub max_pool_size: Option<u32>,
    pub min_pool_size: Option<u32>,
}

impl DbConnectConfig for MongoDbConfig {
    fn uri(&self) -> &str { &self.uri }

    fn name(&self) -> &str { &self.name }
}

impl DbOptionsConfig for MongoDbConfig {
    fn max_pool_size(&self) -> Option<u32> { self.max_pool_size }

    fn min_pool_size(&self) -> Option<u32> { self.min_pool_size }
}

fn uri_default() -> String { "mongodb://127.0.0.1:27017".into() }
fn name_default() -> String { "lectern".into() }
