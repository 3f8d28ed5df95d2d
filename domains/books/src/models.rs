use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub author: String,
    #[serde(default)]
    pub open: bool,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
    /// Quizzes generated for this book.
    #[serde(default)]
    pub quiz: Vec<ObjectId>,
}

impl Book {
    /// Projection safe to expose to end users.
    pub fn redacted(&self) -> RedactedBook {
        RedactedBook {
            id: self.id,
            name: self.name.clone(),
            author: self.author.clone(),
            open: self.open,
            category: self.category.clone(),
            cover: self.cover.clone(),
            description: self.description.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RedactedBook {
    pub id: ObjectId,
    pub name: String,
    pub author: String,
    pub open: bool,
    pub category: Vec<String>,
    pub cover: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewBook {
    pub name: String,
    pub author: String,
    #[serde(default)]
    pub category: Vec<String>,
    pub cover: Option<String>,
    pub description: Option<String>,
    pub creator: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateBook {
    pub name: Option<String>,
    pub author: Option<String>,
    pub category: Option<Vec<String>>,
    pub cover: Option<String>,
    pub description: Option<String>,
    pub open: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_drops_privileged_fields() {
        let book = Book {
            id: ObjectId::new(),
            name: "Moby-Dick".into(),
            author: "Melville".into(),
            open: true,
            category: vec!["novel".into()],
            cover: Some("cover.png".into()),
            description: Some("a whale".into()),
            creator: Some("admin".into()),
            quiz: vec![ObjectId::new()],
        };

        let redacted = book.redacted();
        assert_eq!(redacted.id, book.id);
        assert_eq!(redacted.name, book.name);
        assert_eq!(redacted.author, book.author);

        // The serialized form must not leak creator or quiz links.
        let json = serde_json::to_value(&redacted).unwrap();
        assert!(json.get("creator").is_none());
        assert!(json.get("quiz").is_none());
    }
}
