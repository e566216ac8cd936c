//! Status-partitioned task lists.

use crate::task::domain::TaskStatus;

/// One list per board column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumns<T> {
    todo: Vec<T>,
    in_progress: Vec<T>,
    review: Vec<T>,
    done: Vec<T>,
}

impl<T> BoardColumns<T> {
    /// Creates four empty columns.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            todo: Vec::new(),
            in_progress: Vec::new(),
            review: Vec::new(),
            done: Vec::new(),
        }
    }

    /// Returns the tasks in `status`, in projected order.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[T] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Review => &self.review,
            TaskStatus::Done => &self.done,
        }
    }

    /// Consumes the columns and returns the list for `status`.
    #[must_use]
    pub fn into_column(self, status: TaskStatus) -> Vec<T> {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Review => self.review,
            TaskStatus::Done => self.done,
        }
    }

    /// Iterates the columns in board order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskStatus, &[T])> {
        TaskStatus::ALL
            .into_iter()
            .map(move |status| (status, self.column(status)))
    }

    /// Returns the number of tasks across all columns.
    #[must_use]
    pub fn total(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.review.len() + self.done.len()
    }

    pub(super) fn push(&mut self, status: TaskStatus, item: T) {
        let bucket = match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Review => &mut self.review,
            TaskStatus::Done => &mut self.done,
        };
        bucket.push(item);
    }
}

impl<T> Default for BoardColumns<T> {
    fn default() -> Self {
        Self::new()
    }
}
