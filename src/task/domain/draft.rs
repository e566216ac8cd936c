//! Creation drafts and explicit update patches.

use super::{TaskDomainError, TaskPriority, TaskStatus};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Change applied to an optional task field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange<T> {
    /// Leave the current value untouched.
    Keep,
    /// Replace the current value.
    Set(T),
    /// Remove the current value.
    Clear,
}

impl<T> Default for FieldChange<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T: Clone> FieldChange<T> {
    /// Returns `true` when the field is left untouched.
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Applies the change to `current`.
    pub fn apply_to(&self, current: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Set(value) => *current = Some(value.clone()),
            Self::Clear => *current = None,
        }
    }
}

/// Caller-supplied fields for a new task.
///
/// Identifier, creator and timestamps are assigned when the task is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    assigned_to: Option<UserId>,
    due_date: Option<DateTime<Utc>>,
}

impl TaskDraft {
    /// Creates a draft with the given title, `todo` status and `medium`
    /// priority.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            assigned_to: None,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the initial column.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, user_id: UserId) -> Self {
        self.assigned_to = Some(user_id);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Returns the title as supplied.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the initial column.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<&UserId> {
        self.assigned_to.as_ref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Checks the minimal shape requirements of a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        if self.title.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(())
    }
}

/// Typed partial update of a task.
///
/// Only the fields listed here can change; identifier, creator and creation
/// time are immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    assigned_to: FieldChange<UserId>,
    due_date: FieldChange<DateTime<Utc>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Changes the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Moves the task to another column.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Changes the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Assigns the task to a user.
    #[must_use]
    pub fn assign_to(mut self, user_id: UserId) -> Self {
        self.assigned_to = FieldChange::Set(user_id);
        self
    }

    /// Removes the current assignee.
    #[must_use]
    pub fn unassign(mut self) -> Self {
        self.assigned_to = FieldChange::Clear;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = FieldChange::Set(due_date);
        self
    }

    /// Removes the due date.
    #[must_use]
    pub fn clear_due_date(mut self) -> Self {
        self.due_date = FieldChange::Clear;
        self
    }

    /// Returns the new title, if changed.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the new description, if changed.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the new status, if changed.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the new priority, if changed.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Returns the assignee change.
    #[must_use]
    pub const fn assigned_to(&self) -> &FieldChange<UserId> {
        &self.assigned_to
    }

    /// Returns the due date change.
    #[must_use]
    pub const fn due_date(&self) -> &FieldChange<DateTime<Utc>> {
        &self.due_date
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    /// Names of the fields this patch changes, in declaration order.
    #[must_use]
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let flags = [
            ("title", self.title.is_some()),
            ("description", self.description.is_some()),
            ("status", self.status.is_some()),
            ("priority", self.priority.is_some()),
            ("assigned_to", !self.assigned_to.is_keep()),
            ("due_date", !self.due_date.is_keep()),
        ];
        flags
            .into_iter()
            .filter_map(|(name, changed)| changed.then_some(name))
            .collect()
    }

    /// Checks the patch before it is applied anywhere.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyPatch`] when nothing changes and
    /// [`TaskDomainError::EmptyTitle`] when the new title is blank.
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        if self.is_empty() {
            return Err(TaskDomainError::EmptyPatch);
        }
        if self.title.as_deref().is_some_and(|title| title.trim().is_empty()) {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(())
    }

    /// Describes the changed fields as a JSON object, used as audit metadata.
    ///
    /// Cleared fields are recorded as `null`.
    #[must_use]
    pub fn to_metadata(&self) -> Map<String, Value> {
        let mut changes = Map::new();
        if let Some(title) = &self.title {
            changes.insert("title".to_owned(), Value::from(title.trim()));
        }
        if let Some(description) = &self.description {
            changes.insert("description".to_owned(), Value::from(description.as_str()));
        }
        if let Some(status) = self.status {
            changes.insert("status".to_owned(), Value::from(status.as_str()));
        }
        if let Some(priority) = self.priority {
            changes.insert("priority".to_owned(), Value::from(priority.as_str()));
        }
        match &self.assigned_to {
            FieldChange::Keep => {}
            FieldChange::Set(user_id) => {
                changes.insert("assigned_to".to_owned(), Value::from(user_id.as_str()));
            }
            FieldChange::Clear => {
                changes.insert("assigned_to".to_owned(), Value::Null);
            }
        }
        match &self.due_date {
            FieldChange::Keep => {}
            FieldChange::Set(due_date) => {
                changes.insert("due_date".to_owned(), Value::from(due_date.to_rfc3339()));
            }
            FieldChange::Clear => {
                changes.insert("due_date".to_owned(), Value::Null);
            }
        }
        changes
    }
}
