use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// One slot of a quiz: which question, and the accepted answer as it
/// was when the quiz was assembled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: ObjectId,
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub book: ObjectId,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    /// Projection with the answers stripped; question ids stay so the
    /// client can fetch redacted questions.
    pub fn redacted(&self) -> RedactedQuiz {
        RedactedQuiz {
            id: self.id,
            book: self.book,
            questions: self.questions.iter().map(|q| q.id).collect(),
        }
    }

    pub fn question_ids(&self) -> Vec<ObjectId> {
        self.questions.iter().map(|q| q.id).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RedactedQuiz {
    pub id: ObjectId,
    pub book: ObjectId,
    pub questions: Vec<ObjectId>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewQuiz {
    pub book: ObjectId,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateQuiz {
    pub questions: Option<Vec<QuizQuestion>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_strips_answers_keeps_question_ids() {
        let q1 = ObjectId::new();
        let q2 = ObjectId::new();
        let quiz = Quiz {
            id: ObjectId::new(),
            book: ObjectId::new(),
            questions: vec![
                QuizQuestion {
                    id: q1,
                    answer: "A".into(),
                },
                QuizQuestion {
                    id: q2,
                    answer: "C".into(),
                },
            ],
        };

        let redacted = quiz.redacted();
        assert_eq!(redacted.questions, vec![q1, q2]);

        let json = serde_json::to_string(&redacted).unwrap();
        assert!(!json.contains("answer"));
    }
}
