pub mod dao;
pub mod errors;
pub mod models;

pub use dao::BookDao;
pub use errors::BookError;
pub use models::{Book, NewBook, RedactedBook, UpdateBook};
