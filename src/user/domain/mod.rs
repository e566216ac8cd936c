//! Domain model for user reference data.

mod error;
mod user;

pub use error::{ParseUserRoleError, UserDomainError};
pub use user::{ProfileUpdate, User, UserId, UserRole};
