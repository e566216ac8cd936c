//! Errors surfaced by the task store.

use crate::task::{
    domain::{TaskDomainError, TaskId},
    ports::TaskRemoteError,
};
use crate::user::domain::UserId;
use thiserror::Error;

/// Store-level errors. Local state is always consistent when one is returned.
#[derive(Debug, Error)]
pub enum TaskStoreError {
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The referenced user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// Caller-supplied fields were rejected before any remote call.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// The remote collaborator failed; optimistic changes were rolled back.
    #[error(transparent)]
    Remote(TaskRemoteError),
}

/// Coarse classification of [`TaskStoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStoreErrorKind {
    /// A task or user reference did not resolve.
    NotFound,
    /// Input failed shape validation.
    Validation,
    /// The remote call itself failed.
    Remote,
}

impl TaskStoreError {
    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> TaskStoreErrorKind {
        match self {
            Self::TaskNotFound(_) | Self::UserNotFound(_) => TaskStoreErrorKind::NotFound,
            Self::Validation(_) => TaskStoreErrorKind::Validation,
            Self::Remote(_) => TaskStoreErrorKind::Remote,
        }
    }
}

impl From<TaskRemoteError> for TaskStoreError {
    fn from(err: TaskRemoteError) -> Self {
        match err {
            TaskRemoteError::NotFound(id) => Self::TaskNotFound(id),
            other => Self::Remote(other),
        }
    }
}

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;
