pub mod dao;
pub mod errors;
pub mod models;

pub use dao::UserDao;
pub use errors::UserError;
pub use models::{NewUser, RedactedUser, UpdateUser, User, UserStatus};
