//! Error types for user domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing user values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The user identifier is empty after trimming.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// The display name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyName,

    /// The email address has no `local@domain` shape.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),
}

/// Error returned while parsing user roles.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user role: {0}")]
pub struct ParseUserRoleError(pub String);
