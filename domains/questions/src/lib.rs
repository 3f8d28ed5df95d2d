pub mod dao;
pub mod errors;
pub mod models;

pub use dao::QuestionDao;
pub use errors::QuestionError;
pub use models::{
    NewQuestion, Question, QuestionOption, RedactedQuestion, UpdateQuestion,
};
