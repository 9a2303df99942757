//! Domain models

pub mod role;
pub mod user;

pub use role::{Role, RoleStatus};
pub use user::{User, UserStatus};
