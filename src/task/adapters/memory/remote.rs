//! Simulated remote task service with latency and failure injection.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use crate::task::{
    domain::{Task, TaskDraft, TaskEvent, TaskId, TaskPatch},
    ports::{TaskRemote, TaskRemoteError, TaskRemoteResult},
};
use crate::user::domain::UserId;

/// Operation exposed by the simulated remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    /// Listing the collection.
    List,
    /// Fetching a single task.
    Fetch,
    /// Creating a task.
    Create,
    /// Updating a task.
    Update,
    /// Deleting a task.
    Delete,
    /// Reading the audit history.
    History,
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "list",
            Self::Fetch => "fetch",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::History => "history",
        })
    }
}

/// Thread-safe stand-in for the backend task API.
///
/// Each call sleeps for the configured latency before touching state, so
/// concurrent callers interleave the way they would against a network API.
pub struct InMemoryTaskRemote<C = DefaultClock> {
    state: Arc<RwLock<RemoteState>>,
    clock: Arc<C>,
    latency: Duration,
}

#[derive(Debug, Default)]
struct RemoteState {
    tasks: Vec<Task>,
    history: Vec<TaskEvent>,
    pending_failures: HashMap<RemoteOperation, usize>,
    calls: HashMap<RemoteOperation, usize>,
}

impl<C> Clone for InMemoryTaskRemote<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
            latency: self.latency,
        }
    }
}

fn lock_error(err: impl ToString) -> TaskRemoteError {
    TaskRemoteError::unavailable(std::io::Error::other(err.to_string()))
}

impl<C> InMemoryTaskRemote<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty service with no latency.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(RemoteState::default())),
            clock,
            latency: Duration::ZERO,
        }
    }

    /// Replaces the stored tasks.
    #[must_use]
    pub fn with_tasks(self, tasks: impl IntoIterator<Item = Task>) -> Self {
        self.write_recovering().tasks = tasks.into_iter().collect();
        self
    }

    /// Replaces the stored audit history, most recent first.
    #[must_use]
    pub fn with_history(self, events: impl IntoIterator<Item = TaskEvent>) -> Self {
        self.write_recovering().history = events.into_iter().collect();
        self
    }

    /// Sets the simulated latency applied to every call.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Makes the next call of `operation` fail with
    /// [`TaskRemoteError::Unavailable`]. Calls accumulate.
    pub fn fail_next(&self, operation: RemoteOperation) {
        *self
            .write_recovering()
            .pending_failures
            .entry(operation)
            .or_default() += 1;
    }

    /// Returns how many times `operation` has been invoked.
    #[must_use]
    pub fn call_count(&self, operation: RemoteOperation) -> usize {
        self.read_recovering()
            .calls
            .get(&operation)
            .copied()
            .unwrap_or_default()
    }

    /// Returns a copy of the authoritative collection.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Task> {
        self.read_recovering().tasks.clone()
    }

    fn read_recovering(&self) -> RwLockReadGuard<'_, RemoteState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_recovering(&self) -> RwLockWriteGuard<'_, RemoteState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records the call, waits out the latency, then consumes any injected
    /// failure for the operation.
    async fn simulate(&self, operation: RemoteOperation) -> TaskRemoteResult<()> {
        {
            let mut state = self.state.write().map_err(lock_error)?;
            *state.calls.entry(operation).or_default() += 1;
        }

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut state = self.state.write().map_err(lock_error)?;
        if let Some(remaining) = state.pending_failures.get_mut(&operation) {
            if *remaining > 0 {
                *remaining -= 1;
                tracing::debug!(%operation, "injecting simulated remote failure");
                return Err(TaskRemoteError::unavailable(std::io::Error::other(
                    format!("simulated {operation} failure"),
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<C> TaskRemote for InMemoryTaskRemote<C>
where
    C: Clock + Send + Sync,
{
    async fn list(&self) -> TaskRemoteResult<Vec<Task>> {
        self.simulate(RemoteOperation::List).await?;
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.clone())
    }

    async fn get_by_id(&self, id: TaskId) -> TaskRemoteResult<Task> {
        self.simulate(RemoteOperation::Fetch).await?;
        let state = self.state.read().map_err(lock_error)?;
        state
            .tasks
            .iter()
            .find(|task| task.id() == id)
            .cloned()
            .ok_or(TaskRemoteError::NotFound(id))
    }

    async fn create(&self, draft: &TaskDraft, created_by: &UserId) -> TaskRemoteResult<Task> {
        self.simulate(RemoteOperation::Create).await?;
        let task = Task::from_draft(draft, created_by.clone(), &*self.clock)
            .map_err(|err| TaskRemoteError::Rejected(err.to_string()))?;
        let mut state = self.state.write().map_err(lock_error)?;
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskRemoteResult<Task> {
        self.simulate(RemoteOperation::Update).await?;
        let mut state = self.state.write().map_err(lock_error)?;
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or(TaskRemoteError::NotFound(id))?;
        task.apply_patch(patch, &*self.clock)
            .map_err(|err| TaskRemoteError::Rejected(err.to_string()))?;
        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> TaskRemoteResult<()> {
        self.simulate(RemoteOperation::Delete).await?;
        let mut state = self.state.write().map_err(lock_error)?;
        let index = state
            .tasks
            .iter()
            .position(|task| task.id() == id)
            .ok_or(TaskRemoteError::NotFound(id))?;
        state.tasks.remove(index);
        Ok(())
    }

    async fn history(&self) -> TaskRemoteResult<Vec<TaskEvent>> {
        self.simulate(RemoteOperation::History).await?;
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.history.clone())
    }
}
