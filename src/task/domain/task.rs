//! Task record and its mutation rules.

use super::{TaskDomainError, TaskDraft, TaskId, TaskPatch, TaskPriority, TaskStatus};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task record shown as a card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    assigned_to: Option<UserId>,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    due_date: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a stored task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Stored task identifier.
    pub id: TaskId,
    /// Stored title.
    pub title: String,
    /// Stored description.
    pub description: String,
    /// Stored column.
    pub status: TaskStatus,
    /// Stored priority.
    pub priority: TaskPriority,
    /// Stored assignee, if any.
    pub assigned_to: Option<UserId>,
    /// Stored creator.
    pub created_by: UserId,
    /// Stored creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Stored latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Stored due date, if any.
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new task from a validated draft.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the draft title is blank.
    pub fn from_draft(
        draft: &TaskDraft,
        created_by: UserId,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        draft.validate()?;
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title: draft.title().trim().to_owned(),
            description: draft.description().to_owned(),
            status: draft.status(),
            priority: draft.priority(),
            assigned_to: draft.assigned_to().cloned(),
            created_by,
            created_at: timestamp,
            updated_at: timestamp,
            due_date: draft.due_date(),
        })
    }

    /// Reconstructs a task from storage.
    ///
    /// An `updated_at` earlier than `created_at` is raised to `created_at`.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            assigned_to: data.assigned_to,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at.max(data.created_at),
            due_date: data.due_date,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, possibly empty.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the board column.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the assignee reference, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<&UserId> {
        self.assigned_to.as_ref()
    }

    /// Returns the creator reference.
    #[must_use]
    pub const fn created_by(&self) -> &UserId {
        &self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Applies a patch and refreshes `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the patch is empty or sets a blank
    /// title; the task is left unchanged in that case.
    pub fn apply_patch(
        &mut self,
        patch: &TaskPatch,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        patch.validate()?;
        if let Some(title) = patch.title() {
            self.title = title.trim().to_owned();
        }
        if let Some(description) = patch.description() {
            description.clone_into(&mut self.description);
        }
        if let Some(status) = patch.status() {
            self.status = status;
        }
        if let Some(priority) = patch.priority() {
            self.priority = priority;
        }
        patch.assigned_to().apply_to(&mut self.assigned_to);
        patch.due_date().apply_to(&mut self.due_date);
        self.touch(clock);
        Ok(())
    }

    /// Updates the `updated_at` timestamp, never moving it before creation.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc().max(self.created_at);
    }
}

impl AsRef<Self> for Task {
    fn as_ref(&self) -> &Self {
        self
    }
}
