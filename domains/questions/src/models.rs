use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub label: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// The book this question belongs to.
    pub book: ObjectId,
    pub question: String,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    pub answer: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: i32,
    #[serde(default = "default_open")]
    pub open: bool,
}

fn default_difficulty() -> i32 { 1 }
fn default_open() -> bool { true }

impl Question {
    /// Projection without the answer.
    pub fn redacted(&self) -> RedactedQuestion {
        RedactedQuestion {
            question: self.question.clone(),
            options: self.options.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RedactedQuestion {
    pub question: String,
    pub options: Vec<QuestionOption>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewQuestion {
    pub book: ObjectId,
    pub question: String,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    pub answer: String,
    pub difficulty: Option<i32>,
    pub open: Option<bool>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateQuestion {
    pub question: Option<String>,
    pub options: Option<Vec<QuestionOption>>,
    pub answer: Option<String>,
    pub difficulty: Option<i32>,
    pub open: Option<bool>,
}
