//! Task paired with its resolved assignee.

use super::Task;
use crate::user::domain::User;
use serde::Serialize;

/// Board-facing task with the assignee reference resolved.
///
/// `assignee` is `None` both for unassigned tasks and for references that do
/// not resolve in the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    #[serde(flatten)]
    task: Task,
    assignee: Option<User>,
}

impl TaskView {
    /// Pairs a task with its resolved assignee.
    #[must_use]
    pub const fn new(task: Task, assignee: Option<User>) -> Self {
        Self { task, assignee }
    }

    /// Returns the task record.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the resolved assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&User> {
        self.assignee.as_ref()
    }

    /// Discards the resolved assignee and returns the task.
    #[must_use]
    pub fn into_task(self) -> Task {
        self.task
    }
}

impl AsRef<Task> for TaskView {
    fn as_ref(&self) -> &Task {
        &self.task
    }
}
