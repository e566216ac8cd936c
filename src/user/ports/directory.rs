//! Directory port owning the user reference set.

use crate::user::domain::{ProfileUpdate, User, UserDomainError, UserId};
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// Owner of the user reference set.
///
/// Lookups are synchronous against a fixed in-process set. Writes go through
/// [`UserDirectory::register`] and [`UserDirectory::update_profile`] only.
pub trait UserDirectory: Send + Sync {
    /// Returns every registered user in registration order.
    fn list_users(&self) -> Vec<User>;

    /// Looks up a user by identifier.
    ///
    /// Returns `None` when no user has the identifier.
    fn find_by_id(&self, id: &UserId) -> Option<User>;

    /// Adds a user to the directory.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::DuplicateUser`] when the identifier is
    /// taken or [`UserDirectoryError::DuplicateEmail`] when the email is.
    fn register(&self, user: User) -> UserDirectoryResult<()>;

    /// Applies profile changes to an existing user and returns the result.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::NotFound`] for unknown users and
    /// [`UserDirectoryError::Domain`] when the changed fields are invalid.
    fn update_profile(&self, id: &UserId, update: ProfileUpdate) -> UserDirectoryResult<User>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// Another user already holds the email address.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// The user was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Profile validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),

    /// Storage-layer failure.
    #[error("directory error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
