//! Seed data for the mocked backend.
//!
//! Four users and a handful of tasks spread across every column, plus the
//! status-change history that produced them. Task and event identifiers are
//! stable so callers can refer to them.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::task::domain::{
    EventId, PersistedTaskData, Task, TaskAction, TaskEvent, TaskId, TaskPriority, TaskStatus,
};
use crate::user::domain::{User, UserDomainError, UserId, UserRole};

/// Returns the identifier of the `n`th seeded task (1-based).
#[must_use]
pub const fn task_id(n: u128) -> TaskId {
    TaskId::from_uuid(Uuid::from_u128(n))
}

/// Returns the seeded user directory contents.
///
/// # Errors
///
/// Returns [`UserDomainError`] if a seeded record fails validation.
pub fn users() -> Result<Vec<User>, UserDomainError> {
    let seeds = [
        ("1", "John Admin", "admin@example.com", UserRole::Admin, "0D8ABC"),
        ("2", "Jane User", "user@example.com", UserRole::User, "FF5733"),
        ("3", "Mike Dev", "mike@example.com", UserRole::User, "27AE60"),
        ("4", "Sarah QA", "sarah@example.com", UserRole::User, "8E44AD"),
    ];
    seeds
        .into_iter()
        .map(|(id, name, email, role, colour)| {
            let avatar = format!(
                "https://ui-avatars.com/api/?name={}&background={colour}&color=fff",
                name.replace(' ', "+")
            );
            Ok(User::new(UserId::new(id)?, name, email, role)?.with_avatar(avatar))
        })
        .collect()
}

struct TaskSeed {
    n: u128,
    title: &'static str,
    description: &'static str,
    status: TaskStatus,
    priority: TaskPriority,
    assigned_to: &'static str,
    created_by: &'static str,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    due_date: DateTime<Utc>,
}

/// Returns the seeded task collection in insertion order.
///
/// # Errors
///
/// Returns [`UserDomainError`] if a seeded user reference is blank.
pub fn tasks() -> Result<Vec<Task>, UserDomainError> {
    let seeds = [
        TaskSeed {
            n: 1,
            title: "Implement authentication",
            description: "Set up JWT authentication in NestJS backend",
            status: TaskStatus::Todo,
            priority: TaskPriority::High,
            assigned_to: "3",
            created_by: "1",
            created_at: at(1, 10, 0),
            updated_at: at(1, 10, 0),
            due_date: end_of_day(10),
        },
        TaskSeed {
            n: 2,
            title: "Create dashboard UI",
            description: "Design and implement the main dashboard interface",
            status: TaskStatus::InProgress,
            priority: TaskPriority::Medium,
            assigned_to: "2",
            created_by: "1",
            created_at: at(1, 11, 30),
            updated_at: at(2, 9, 15),
            due_date: end_of_day(8),
        },
        TaskSeed {
            n: 3,
            title: "Set up WebSocket connections",
            description: "Implement real-time updates with Socket.io",
            status: TaskStatus::Review,
            priority: TaskPriority::High,
            assigned_to: "3",
            created_by: "1",
            created_at: at(2, 14, 20),
            updated_at: at(4, 16, 45),
            due_date: end_of_day(7),
        },
        TaskSeed {
            n: 4,
            title: "Write unit tests for auth service",
            description: "Create Jest tests for the authentication service",
            status: TaskStatus::Done,
            priority: TaskPriority::Medium,
            assigned_to: "4",
            created_by: "3",
            created_at: at(3, 9, 0),
            updated_at: at(5, 11, 30),
            due_date: end_of_day(6),
        },
        TaskSeed {
            n: 5,
            title: "Implement task assignment feature",
            description: "Allow users to assign tasks to team members",
            status: TaskStatus::Todo,
            priority: TaskPriority::Low,
            assigned_to: "2",
            created_by: "1",
            created_at: at(4, 13, 45),
            updated_at: at(4, 13, 45),
            due_date: end_of_day(12),
        },
        TaskSeed {
            n: 6,
            title: "Add responsive design",
            description: "Make the UI work well on mobile devices",
            status: TaskStatus::InProgress,
            priority: TaskPriority::Medium,
            assigned_to: "2",
            created_by: "1",
            created_at: at(4, 15, 20),
            updated_at: at(5, 10, 10),
            due_date: end_of_day(9),
        },
        TaskSeed {
            n: 7,
            title: "Set up CI/CD pipeline",
            description: "Configure GitHub Actions for automated deployment",
            status: TaskStatus::Todo,
            priority: TaskPriority::Low,
            assigned_to: "3",
            created_by: "1",
            created_at: at(5, 9, 30),
            updated_at: at(5, 9, 30),
            due_date: end_of_day(15),
        },
    ];

    seeds
        .into_iter()
        .map(|seed| {
            Ok(Task::from_persisted(PersistedTaskData {
                id: task_id(seed.n),
                title: seed.title.to_owned(),
                description: seed.description.to_owned(),
                status: seed.status,
                priority: seed.priority,
                assigned_to: Some(UserId::new(seed.assigned_to)?),
                created_by: UserId::new(seed.created_by)?,
                created_at: seed.created_at,
                updated_at: seed.updated_at,
                due_date: Some(seed.due_date),
            }))
        })
        .collect()
}

/// Returns the seeded audit history, most recent first.
///
/// # Errors
///
/// Returns [`UserDomainError`] if a seeded user reference is blank.
pub fn events() -> Result<Vec<TaskEvent>, UserDomainError> {
    let seeds = [
        (3, 4, "4", TaskStatus::Review, TaskStatus::Done, at(5, 11, 30)),
        (2, 3, "3", TaskStatus::InProgress, TaskStatus::Review, at(4, 16, 45)),
        (1, 2, "2", TaskStatus::Todo, TaskStatus::InProgress, at(2, 9, 15)),
    ];
    seeds
        .into_iter()
        .map(|(event_n, task_n, user, from, to, timestamp)| {
            let mut metadata = Map::new();
            metadata.insert("from".to_owned(), Value::from(from.as_str()));
            metadata.insert("to".to_owned(), Value::from(to.as_str()));
            Ok(TaskEvent::recorded(
                EventId::from_uuid(Uuid::from_u128(1000 + event_n)),
                task_id(task_n),
                UserId::new(user)?,
                TaskAction::StatusChanged,
                timestamp,
                metadata,
            ))
        })
        .collect()
}

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn end_of_day(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, day, 23, 59, 59)
        .single()
        .unwrap_or_default()
}
