//! Append-only audit records for task mutations.

use super::{EventId, ParseTaskActionError, TaskId};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Kind of mutation recorded by a [`TaskEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskAction {
    /// Task was created.
    Created,
    /// Task fields were edited.
    Updated,
    /// Task was removed.
    Deleted,
    /// Task assignee changed.
    Assigned,
    /// Task moved to another column.
    StatusChanged,
}

impl TaskAction {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Assigned => "assigned",
            Self::StatusChanged => "status-changed",
        }
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskAction {
    type Error = ParseTaskActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            "deleted" => Ok(Self::Deleted),
            "assigned" => Ok(Self::Assigned),
            "status-changed" => Ok(Self::StatusChanged),
            _ => Err(ParseTaskActionError(value.to_owned())),
        }
    }
}

/// Immutable audit record appended after each confirmed mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEvent {
    id: EventId,
    task_id: TaskId,
    user_id: UserId,
    action: TaskAction,
    timestamp: DateTime<Utc>,
    metadata: Map<String, Value>,
}

impl TaskEvent {
    /// Records a new event stamped with the current clock time.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        user_id: UserId,
        action: TaskAction,
        metadata: Map<String, Value>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: EventId::new(),
            task_id,
            user_id,
            action,
            timestamp: clock.utc(),
            metadata,
        }
    }

    /// Reconstructs a previously recorded event.
    #[must_use]
    pub const fn recorded(
        id: EventId,
        task_id: TaskId,
        user_id: UserId,
        action: TaskAction,
        timestamp: DateTime<Utc>,
        metadata: Map<String, Value>,
    ) -> Self {
        Self {
            id,
            task_id,
            user_id,
            action,
            timestamp,
            metadata,
        }
    }

    /// Returns the event identifier.
    #[must_use]
    pub const fn id(&self) -> EventId {
        self.id
    }

    /// Returns the task the event refers to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the acting user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the recorded action.
    #[must_use]
    pub const fn action(&self) -> TaskAction {
        self.action
    }

    /// Returns when the action was confirmed.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the free-form description of what changed.
    #[must_use]
    pub const fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }
}
