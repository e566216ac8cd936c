//! In-memory adapters used by the board while the backend API is mocked.

mod notifier;
mod remote;

pub use notifier::RecordingNotifier;
pub use remote::{InMemoryTaskRemote, RemoteOperation};
