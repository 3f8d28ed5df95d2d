pub mod dao;
pub mod errors;
pub mod models;

pub use dao::QuizDao;
pub use errors::QuizError;
pub use models::{NewQuiz, Quiz, QuizQuestion, RedactedQuiz, UpdateQuiz};
