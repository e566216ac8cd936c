//! Remote collaborator port holding the authoritative task collection.

use crate::task::domain::{Task, TaskDraft, TaskEvent, TaskId, TaskPatch};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for remote task operations.
pub type TaskRemoteResult<T> = Result<T, TaskRemoteError>;

/// Authoritative task service.
///
/// Every call may suspend; callers must not hold local locks across them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRemote: Send + Sync {
    /// Returns the full task collection in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRemoteError::Unavailable`] when the service cannot be
    /// reached.
    async fn list(&self) -> TaskRemoteResult<Vec<Task>>;

    /// Fetches a single task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRemoteError::NotFound`] when the task does not exist.
    async fn get_by_id(&self, id: TaskId) -> TaskRemoteResult<Task>;

    /// Creates a task, assigning its identifier and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRemoteError::Rejected`] when the draft is refused.
    async fn create(&self, draft: &TaskDraft, created_by: &UserId) -> TaskRemoteResult<Task>;

    /// Applies a patch and returns the authoritative result.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRemoteError::NotFound`] when the task does not exist.
    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskRemoteResult<Task>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRemoteError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRemoteResult<()>;

    /// Returns previously recorded audit events, most recent first.
    ///
    /// Collaborators without an audit trail return an empty history.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRemoteError::Unavailable`] when the service cannot be
    /// reached.
    async fn history(&self) -> TaskRemoteResult<Vec<TaskEvent>> {
        Ok(Vec::new())
    }
}

/// Errors returned by remote task collaborators.
#[derive(Debug, Clone, Error)]
pub enum TaskRemoteError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The collaborator refused the request.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The collaborator could not be reached or failed internally.
    #[error("remote unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRemoteError {
    /// Wraps a transport or server error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
