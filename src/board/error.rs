//! Errors raised while parsing view parameters.

use thiserror::Error;

/// View parameter that failed to parse.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseBoardQueryError {
    /// Unknown priority filter value.
    #[error("unknown priority filter: {0}")]
    PriorityFilter(String),

    /// Unknown sort key.
    #[error("unknown sort key: {0}")]
    SortKey(String),

    /// Unknown sort direction.
    #[error("unknown sort direction: {0}")]
    SortDirection(String),
}
