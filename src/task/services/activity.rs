//! Audit metadata and activity messages derived from confirmed mutations.

use crate::task::domain::{Task, TaskAction, TaskEvent, TaskPatch, TaskStatus};
use serde_json::{Map, Value};

/// Which update-shaped operation produced a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MutationKind {
    Update,
    StatusChange,
    Assignment,
}

impl MutationKind {
    /// Verb used in failure notifications.
    pub(crate) const fn verb(self) -> &'static str {
        match self {
            Self::Update | Self::StatusChange => "update",
            Self::Assignment => "assign",
        }
    }

    /// Audit action and metadata for a confirmed mutation.
    pub(crate) fn describe(
        self,
        previous: &Task,
        current: &Task,
        patch: &TaskPatch,
    ) -> (TaskAction, Map<String, Value>) {
        match self {
            Self::Update => (TaskAction::Updated, patch.to_metadata()),
            Self::StatusChange => (
                TaskAction::StatusChanged,
                transition(
                    Value::from(previous.status().as_str()),
                    Value::from(current.status().as_str()),
                ),
            ),
            Self::Assignment => (
                TaskAction::Assigned,
                transition(
                    previous
                        .assigned_to()
                        .map_or(Value::Null, |id| Value::from(id.as_str())),
                    current
                        .assigned_to()
                        .map_or(Value::Null, |id| Value::from(id.as_str())),
                ),
            ),
        }
    }
}

fn transition(from: Value, to: Value) -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert("from".to_owned(), from);
    metadata.insert("to".to_owned(), to);
    metadata
}

/// Builds the activity message announced to board members.
///
/// `assignee` is the resolved name of the new assignee for
/// [`TaskAction::Assigned`] events and for updates that reassign the task.
/// `patch` is the confirmed patch behind an [`TaskAction::Updated`] event;
/// without it the summary falls back to the recorded metadata keys.
pub(crate) fn activity_message(
    actor: &str,
    event: &TaskEvent,
    title: &str,
    assignee: Option<&str>,
    patch: Option<&TaskPatch>,
) -> String {
    match event.action() {
        TaskAction::Created => format!("{actor} created: {title}"),
        TaskAction::Updated => {
            let summary = patch.map_or_else(
                || {
                    let fields: Vec<&str> =
                        event.metadata().keys().map(|key| field_label(key)).collect();
                    fields.join(", ")
                },
                |patch| update_summary(patch, assignee),
            );
            format!("{actor} updated {title} ({summary})")
        }
        TaskAction::Deleted => format!("{actor} deleted task: {title}"),
        TaskAction::StatusChanged => {
            let column = event
                .metadata()
                .get("to")
                .and_then(Value::as_str)
                .and_then(|raw| TaskStatus::try_from(raw).ok())
                .map_or("another column", TaskStatus::title);
            format!("{actor} moved {title} to {column}")
        }
        TaskAction::Assigned => {
            format!(
                "{actor} assigned {title} to {}",
                assignee.unwrap_or("Unassigned")
            )
        }
    }
}

/// Describes a confirmed patch. Reassignment takes precedence over a status
/// change; otherwise the changed fields are listed in declaration order.
fn update_summary(patch: &TaskPatch, assignee: Option<&str>) -> String {
    if !patch.assigned_to().is_keep() {
        return format!("assignment to {}", assignee.unwrap_or("Unassigned"));
    }
    if let Some(status) = patch.status() {
        return format!("status to {status}");
    }
    let fields: Vec<&str> = patch.changed_fields().into_iter().map(field_label).collect();
    fields.join(", ")
}

fn field_label(field: &str) -> &str {
    match field {
        "assigned_to" => "assignee",
        "due_date" => "due date",
        other => other,
    }
}
