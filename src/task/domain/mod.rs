//! Domain model for the task board.
//!
//! The task domain models task records, the explicit patch structure used to
//! edit them, and the append-only audit trail, while keeping the remote
//! collaborator and presentation concerns outside of the domain boundary.

mod draft;
mod error;
mod event;
mod ids;
mod status;
mod task;
mod view;

pub use draft::{FieldChange, TaskDraft, TaskPatch};
pub use error::{
    ParseTaskActionError, ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError,
};
pub use event::{TaskAction, TaskEvent};
pub use ids::{EventId, TaskId};
pub use status::{TaskPriority, TaskStatus};
pub use task::{PersistedTaskData, Task};
pub use view::TaskView;
