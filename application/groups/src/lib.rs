pub mod cache_keys;
pub mod commands;
pub mod queries;

pub use commands::{
    CreateGroupHandler, DeleteGroupHandler, UpdateGroupHandler,
};
pub use queries::GetGroupQueryHandler;
