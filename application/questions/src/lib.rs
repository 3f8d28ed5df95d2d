pub mod cache_keys;
pub mod commands;
pub mod queries;

pub use commands::{
    CreateQuestionHandler, DeleteQuestionHandler, UpdateQuestionHandler,
};
pub use queries::{BookQuestionsQueryHandler, GetQuestionQueryHandler};
