pub mod cache_keys;
pub mod commands;
pub mod queries;

pub use commands::{
    BanUserHandler, CreateUserHandler, DeleteUserHandler, UpdateUserHandler,
};
pub use queries::GetUserQueryHandler;
