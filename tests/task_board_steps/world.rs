//! Shared world state for task board BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    board::BoardQuery,
    config::StoreConfig,
    fixtures,
    task::{
        adapters::memory::{InMemoryTaskRemote, RecordingNotifier},
        services::{TaskStore, TaskStoreError},
    },
    user::{adapters::memory::InMemoryUserDirectory, domain::UserId},
};

/// Store type used by the BDD world.
pub type TestTaskStore = TaskStore<InMemoryTaskRemote, DefaultClock>;

/// Scenario world for task board behaviour tests.
pub struct BoardWorld {
    pub store: Option<TestTaskStore>,
    pub remote: Option<InMemoryTaskRemote>,
    pub notifier: RecordingNotifier,
    pub query: BoardQuery,
    pub last_outcome: Option<Result<(), TaskStoreError>>,
}

impl BoardWorld {
    /// Creates a world with no board yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: None,
            remote: None,
            notifier: RecordingNotifier::new(),
            query: BoardQuery::default(),
            last_outcome: None,
        }
    }

    /// Wires a store to seeded in-memory collaborators, acting as user "1".
    ///
    /// # Errors
    ///
    /// Returns an error if the seed data is invalid.
    pub fn seed(&mut self) -> Result<(), eyre::Report> {
        let clock = Arc::new(DefaultClock);
        let remote = InMemoryTaskRemote::new(Arc::clone(&clock))
            .with_tasks(fixtures::tasks()?)
            .with_history(fixtures::events()?);
        let store = TaskStore::new(
            Arc::new(remote.clone()),
            Arc::new(InMemoryUserDirectory::with_users(fixtures::users()?)),
            Arc::new(self.notifier.clone()),
            clock,
            UserId::new("1")?,
        )
        .with_config(StoreConfig::instant());
        self.remote = Some(remote);
        self.store = Some(store);
        Ok(())
    }

    /// Returns the scenario store.
    ///
    /// # Errors
    ///
    /// Returns an error if no board has been seeded.
    pub fn store(&self) -> Result<&TestTaskStore, eyre::Report> {
        self.store
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing store in scenario world"))
    }

    /// Returns the simulated remote.
    ///
    /// # Errors
    ///
    /// Returns an error if no board has been seeded.
    pub fn remote(&self) -> Result<&InMemoryTaskRemote, eyre::Report> {
        self.remote
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing remote in scenario world"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
