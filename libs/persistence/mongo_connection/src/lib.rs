pub use config::{DbConnectConfig, DbOptionsConfig, MongoDbConfig};
pub use database_traits;
pub use impl_get_connect::MongoConnect;
pub use mongodb;

pub mod config;
mod impl_get_connect;
mod static_vars;

pub use static_vars::{connect_mongo_db, get_mongo_database};
