pub mod cache_keys;
pub mod commands;
pub mod queries;

pub use commands::{CreateQuizHandler, DeleteQuizHandler};
pub use queries::{
    GetQuizQueryHandler, QuizView, RedactedQuizSlot, RedactedQuizView,
};
