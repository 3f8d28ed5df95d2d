use database_traits::connection::GetDatabaseConnect;
use mongodb::{Collection, Database};

use crate::static_vars::get_mongo_database;

/// Cloneable facade over the process-wide content-store handle.
#[derive(Debug, Clone)]
pub struct MongoConnect {
    db: Database,
}

impl MongoConnect {
    pub fn new(db: Database) -> Self { Self { db } }

    pub fn from_global() -> Self {
        Self {
            db: get_mongo_database().clone(),
        }
    }

    pub fn database(&self) -> &Database { &self.db }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}

impl Default for MongoConnect {
    fn default() -> Self { Self::from_global() }
}

impl GetDatabaseConnect for MongoConnect {
    type Connect = Database;

    fn get_connect(&self) -> &Self::Connect { &self.db }
}
