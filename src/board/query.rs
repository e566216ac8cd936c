//! View parameters chosen in the dashboard toolbar.

use super::ParseBoardQueryError;
use crate::task::domain::TaskPriority;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Priority filter: everything, or a single priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PriorityFilter {
    /// Keep every task.
    #[default]
    All,
    /// Keep only tasks with this priority.
    Only(TaskPriority),
}

impl PriorityFilter {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(priority) => priority.as_str(),
        }
    }

    /// Returns `true` when a task with `priority` passes the filter.
    #[must_use]
    pub fn matches(self, priority: TaskPriority) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == priority,
        }
    }
}

impl TryFrom<&str> for PriorityFilter {
    type Error = ParseBoardQueryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        TaskPriority::try_from(value)
            .map(Self::Only)
            .map_err(|_| ParseBoardQueryError::PriorityFilter(value.to_owned()))
    }
}

/// Field the board is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Creation time.
    #[default]
    CreatedAt,
    /// Due date; tasks without one always sort last.
    DueDate,
    /// Priority weight.
    Priority,
    /// Title text.
    Title,
}

impl SortKey {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::DueDate => "dueDate",
            Self::Priority => "priority",
            Self::Title => "title",
        }
    }
}

impl TryFrom<&str> for SortKey {
    type Error = ParseBoardQueryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "createdAt" => Ok(Self::CreatedAt),
            "dueDate" => Ok(Self::DueDate),
            "priority" => Ok(Self::Priority),
            "title" => Ok(Self::Title),
            _ => Err(ParseBoardQueryError::SortKey(value.to_owned())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl SortDirection {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Orients an ascending comparison result.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl TryFrom<&str> for SortDirection {
    type Error = ParseBoardQueryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParseBoardQueryError::SortDirection(value.to_owned())),
        }
    }
}

/// Complete set of view parameters.
///
/// The default is the dashboard's initial view: no search, every priority,
/// newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardQuery {
    search: String,
    priority: PriorityFilter,
    sort_key: SortKey,
    direction: SortDirection,
}

impl BoardQuery {
    /// Creates the default query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text search.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Sets the priority filter.
    #[must_use]
    pub fn with_priority(mut self, priority: PriorityFilter) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the sort key.
    #[must_use]
    pub fn with_sort_key(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    /// Sets the sort direction.
    #[must_use]
    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Returns the free-text search.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Returns the priority filter.
    #[must_use]
    pub const fn priority(&self) -> PriorityFilter {
        self.priority
    }

    /// Returns the sort key.
    #[must_use]
    pub const fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Returns the sort direction.
    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }
}
