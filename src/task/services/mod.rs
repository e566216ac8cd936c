//! Application services for the task board.

pub(crate) mod activity;
mod error;
mod store;

pub use error::{TaskStoreError, TaskStoreErrorKind, TaskStoreResult};
pub use store::TaskStore;
