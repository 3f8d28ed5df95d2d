use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Ok,
    Banned,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Password hash; never leaves the full projection.
    pub password: String,
    pub created_time: DateTime,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
    pub group: String,
    pub status: UserStatus,
}

impl User {
    /// Projection safe to expose to end users.
    pub fn redacted(&self) -> RedactedUser {
        RedactedUser {
            id: self.id,
            username: self.username.clone(),
            created_time: self.created_time,
            group: self.group.clone(),
            student_id: self.student_id.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RedactedUser {
    pub id: ObjectId,
    pub username: String,
    pub created_time: DateTime,
    pub group: String,
    pub student_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub name: Option<String>,
    /// Already-hashed credential; hashing happens upstream.
    pub password: String,
    pub school: Option<String>,
    pub student_id: Option<String>,
    pub group: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub password: Option<String>,
    pub school: Option<String>,
    pub student_id: Option<String>,
    pub group: Option<String>,
    pub status: Option<UserStatus>,
}
