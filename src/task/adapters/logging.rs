//! Notifier that forwards notifications to `tracing`.

use crate::task::ports::{Notification, NotificationLevel, Notifier};

/// Notifier emitting each notification as a structured log event.
///
/// Used when no interactive surface is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => {
                tracing::warn!(level = %notification.level, message = %notification.message, "notification");
            }
            NotificationLevel::Success | NotificationLevel::Info => {
                tracing::info!(level = %notification.level, message = %notification.message, "notification");
            }
        }
    }
}
