use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Permission group ("student", "teacher", ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(default)]
    pub permission: Vec<String>,
}

impl Group {
    /// End users see that a group exists, not what it may do.
    pub fn redacted(&self) -> RedactedGroup {
        RedactedGroup {
            id: self.id,
            title: self.title.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RedactedGroup {
    pub id: ObjectId,
    pub title: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewGroup {
    pub title: String,
    #[serde(default)]
    pub permission: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateGroup {
    pub title: Option<String>,
    pub permission: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_drops_permission_list() {
        let group = Group {
            id: ObjectId::new(),
            title: "teacher".into(),
            permission: vec!["CreateBook".into(), "ModifyBookInfo".into()],
        };

        let json = serde_json::to_value(group.redacted()).unwrap();
        assert_eq!(json["title"], "teacher");
        assert!(json.get("permission").is_none());
    }
}
