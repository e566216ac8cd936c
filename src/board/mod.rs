//! View projection for the task board.
//!
//! [`project`] derives the four status columns from the full task collection
//! and the current view parameters. It is a pure function: it performs no
//! I/O, never mutates its input, and returns identical columns for identical
//! inputs.
//!
//! The pipeline runs in a fixed order: search filter, priority filter, sort,
//! then grouping by status. Grouping preserves the sorted order within each
//! column.

mod columns;
mod error;
mod projection;
mod query;

pub use columns::BoardColumns;
pub use error::ParseBoardQueryError;
pub use projection::project;
pub use query::{BoardQuery, PriorityFilter, SortDirection, SortKey};

#[cfg(test)]
mod tests;
