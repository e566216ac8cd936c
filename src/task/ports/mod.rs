//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by the task store.

pub mod notifier;
pub mod remote;

pub use notifier::{Notification, NotificationLevel, Notifier};
pub use remote::{TaskRemote, TaskRemoteError, TaskRemoteResult};

#[cfg(test)]
pub use remote::MockTaskRemote;
