pub mod dao;
pub mod errors;
pub mod models;

pub use dao::GroupDao;
pub use errors::GroupError;
pub use models::{Group, NewGroup, RedactedGroup, UpdateGroup};
