//! Filter, sort and group pipeline.

use super::{BoardColumns, BoardQuery, SortDirection, SortKey};
use crate::task::domain::Task;
use std::cmp::Ordering;

/// Derives the board columns from `tasks` under `query`.
///
/// Steps, in order:
/// 1. keep tasks whose title or description contains the search text,
///    ignoring case (an empty search keeps everything);
/// 2. keep tasks matching the priority filter;
/// 3. stable-sort by the query's key and direction;
/// 4. partition by status, preserving the sorted order.
///
/// The input slice is only read; the returned columns hold clones.
#[must_use]
pub fn project<T>(tasks: &[T], query: &BoardQuery) -> BoardColumns<T>
where
    T: AsRef<Task> + Clone,
{
    let needle = query.search().to_lowercase();
    let mut selected: Vec<&T> = tasks
        .iter()
        .filter(|item| matches_search(item.as_ref(), &needle))
        .filter(|item| query.priority().matches(item.as_ref().priority()))
        .collect();

    selected.sort_by(|left, right| {
        compare(
            left.as_ref(),
            right.as_ref(),
            query.sort_key(),
            query.direction(),
        )
    });

    let mut columns = BoardColumns::new();
    for item in selected {
        columns.push(item.as_ref().status(), item.clone());
    }
    columns
}

fn matches_search(task: &Task, needle: &str) -> bool {
    needle.is_empty()
        || task.title().to_lowercase().contains(needle)
        || task.description().to_lowercase().contains(needle)
}

fn compare(left: &Task, right: &Task, key: SortKey, direction: SortDirection) -> Ordering {
    match key {
        SortKey::Title => direction.apply(left.title().cmp(right.title())),
        SortKey::Priority => {
            direction.apply(left.priority().weight().cmp(&right.priority().weight()))
        }
        SortKey::CreatedAt => direction.apply(left.created_at().cmp(&right.created_at())),
        // Missing due dates stay last in both directions.
        SortKey::DueDate => match (left.due_date(), right.due_date()) {
            (Some(left_due), Some(right_due)) => direction.apply(left_due.cmp(&right_due)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}
