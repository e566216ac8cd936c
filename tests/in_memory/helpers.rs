//! Shared test helpers for in-memory task board integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use taskboard::{
    config::StoreConfig,
    fixtures,
    task::{
        adapters::memory::{InMemoryTaskRemote, RecordingNotifier},
        domain::{Task, TaskId, TaskView},
        services::TaskStore,
    },
    user::{adapters::memory::InMemoryUserDirectory, domain::UserId},
};

/// Store type wired to in-memory adapters.
pub type BoardStore = TaskStore<InMemoryTaskRemote, DefaultClock>;

/// A store together with handles on its collaborators.
pub struct Board {
    pub store: BoardStore,
    pub remote: InMemoryTaskRemote,
    pub directory: Arc<InMemoryUserDirectory>,
    pub notifier: RecordingNotifier,
}

/// Builds a board seeded with the mocked backend data, acting as `actor`.
///
/// # Errors
///
/// Returns an error if the seed data or actor identifier is invalid.
pub fn seeded_board(actor: &str, config: StoreConfig) -> Result<Board, eyre::Report> {
    let clock = Arc::new(DefaultClock);
    let remote = InMemoryTaskRemote::new(Arc::clone(&clock))
        .with_tasks(fixtures::tasks()?)
        .with_history(fixtures::events()?)
        .with_latency(config.remote_latency());
    let directory = Arc::new(InMemoryUserDirectory::with_users(fixtures::users()?));
    let notifier = RecordingNotifier::new();
    let store = TaskStore::new(
        Arc::new(remote.clone()),
        directory.clone(),
        Arc::new(notifier.clone()),
        clock,
        UserId::new(actor)?,
    )
    .with_config(config);

    Ok(Board {
        store,
        remote,
        directory,
        notifier,
    })
}

/// Builds and loads a seeded board with instant timings.
///
/// # Errors
///
/// Returns an error if seeding or the initial load fails.
pub async fn loaded_board(actor: &str) -> Result<Board, eyre::Report> {
    let board = seeded_board(actor, StoreConfig::instant())?;
    board.store.load().await?;
    Ok(board)
}

/// Asserts that the local collection matches the authoritative one.
///
/// # Errors
///
/// Returns an error describing the first divergence.
pub fn ensure_no_drift(board: &Board) -> Result<(), eyre::Report> {
    let mut local: Vec<Task> = board
        .store
        .tasks()
        .into_iter()
        .map(TaskView::into_task)
        .collect();
    let mut remote = board.remote.snapshot();
    local.sort_by_key(|task| task.id().into_inner());
    remote.sort_by_key(|task| task.id().into_inner());
    eyre::ensure!(
        local == remote,
        "local state diverged from remote: {} local vs {} remote tasks",
        local.len(),
        remote.len()
    );
    Ok(())
}

/// Returns the title the store currently holds for `id`.
///
/// # Errors
///
/// Returns an error if the task is not held locally.
pub fn local_title(board: &Board, id: TaskId) -> Result<String, eyre::Report> {
    board
        .store
        .get(id)
        .map(|view| view.task().title().to_owned())
        .ok_or_else(|| eyre::eyre!("task {id} is not held locally"))
}
