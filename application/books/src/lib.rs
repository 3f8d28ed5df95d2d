pub mod cache_keys;
pub mod commands;
pub mod queries;

pub use cache_keys::BookRef;
pub use commands::{
    CreateBookHandler, DeleteBookHandler, UpdateBookHandler,
};
pub use queries::{
    GetBookQueryHandler, GetBooksQueryHandler, ListBooksQueryHandler,
};
