//! Rollback and reporting when the remote collaborator fails.

use taskboard::{
    fixtures,
    task::{
        adapters::memory::RemoteOperation,
        domain::{TaskDraft, TaskId, TaskPatch, TaskStatus},
        ports::NotificationLevel,
        services::TaskStoreErrorKind,
    },
};

use super::helpers::{ensure_no_drift, loaded_board, local_title};

#[tokio::test(flavor = "multi_thread")]
async fn every_failed_mutation_leaves_state_as_before() -> Result<(), eyre::Report> {
    let board = loaded_board("1").await?;
    let before = board.store.tasks();
    let events_before = board.store.events();
    let id = fixtures::task_id(2);

    board.remote.fail_next(RemoteOperation::Create);
    board.remote.fail_next(RemoteOperation::Update);
    board.remote.fail_next(RemoteOperation::Update);
    board.remote.fail_next(RemoteOperation::Delete);

    let outcomes = [
        board.store.create(TaskDraft::new("Never lands")).await.err(),
        board
            .store
            .update(id, TaskPatch::new().with_title("Never lands"))
            .await
            .err(),
        board
            .store
            .change_status(id, TaskStatus::Done)
            .await
            .err(),
        board.store.delete(id).await.err(),
    ];

    for outcome in &outcomes {
        let kind = outcome.as_ref().map(taskboard::task::services::TaskStoreError::kind);
        eyre::ensure!(
            kind == Some(TaskStoreErrorKind::Remote),
            "expected a remote failure, got {outcome:?}"
        );
    }
    eyre::ensure!(board.store.tasks() == before, "collection changed");
    eyre::ensure!(board.store.events() == events_before, "events recorded");
    eyre::ensure!(
        board.notifier.messages(NotificationLevel::Error).len() == 4,
        "expected one error notification per failure"
    );
    eyre::ensure!(!board.store.is_mutating(), "mutation flag left raised");
    ensure_no_drift(&board)
}

#[tokio::test(flavor = "multi_thread")]
async fn store_recovers_after_transient_failure() -> Result<(), eyre::Report> {
    let board = loaded_board("1").await?;
    let id = fixtures::task_id(1);
    board.remote.fail_next(RemoteOperation::Update);

    let failed = board
        .store
        .update(id, TaskPatch::new().with_title("Retry me"))
        .await;
    eyre::ensure!(failed.is_err(), "first attempt should fail");
    eyre::ensure!(
        local_title(&board, id)? == "Implement authentication",
        "rollback did not restore title"
    );

    board
        .store
        .update(id, TaskPatch::new().with_title("Retry me"))
        .await?;
    eyre::ensure!(local_title(&board, id)? == "Retry me", "retry not applied");
    ensure_no_drift(&board)
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_task_is_reported_as_not_found() -> Result<(), eyre::Report> {
    let board = loaded_board("1").await?;

    let error = board
        .store
        .change_status(TaskId::new(), TaskStatus::Done)
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("expected failure"))?;

    eyre::ensure!(
        error.kind() == TaskStoreErrorKind::NotFound,
        "unexpected error {error}"
    );
    eyre::ensure!(board.store.tasks().len() == 7, "collection changed");
    Ok(())
}
