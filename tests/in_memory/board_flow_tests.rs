//! End-to-end flows over the seeded board.

use taskboard::{
    board::{BoardQuery, PriorityFilter, SortDirection, SortKey},
    fixtures,
    task::{
        domain::{TaskAction, TaskDraft, TaskPatch, TaskPriority, TaskStatus},
        ports::NotificationLevel,
    },
    user::domain::UserId,
};

use super::helpers::{ensure_no_drift, loaded_board, local_title};

#[tokio::test(flavor = "multi_thread")]
async fn working_a_task_across_the_board() -> Result<(), eyre::Report> {
    let board = loaded_board("2").await?;

    let created = board
        .store
        .create(
            TaskDraft::new("Write release notes")
                .with_description("Summarise the sprint")
                .with_priority(TaskPriority::High),
        )
        .await?;
    let id = created.task().id();
    board.store.assign(id, UserId::new("3")?).await?;
    for status in [TaskStatus::InProgress, TaskStatus::Review, TaskStatus::Done] {
        board.store.change_status(id, status).await?;
    }

    let done = board.store.get(id).ok_or_else(|| eyre::eyre!("task missing"))?;
    eyre::ensure!(done.task().status() == TaskStatus::Done, "task not done");
    eyre::ensure!(
        done.assignee().map(|user| user.name()) == Some("Mike Dev"),
        "assignee not resolved"
    );

    let actions: Vec<TaskAction> = board
        .store
        .events()
        .iter()
        .filter(|event| event.task_id() == id)
        .map(|event| event.action())
        .collect();
    eyre::ensure!(
        actions
            == [
                TaskAction::StatusChanged,
                TaskAction::StatusChanged,
                TaskAction::StatusChanged,
                TaskAction::Assigned,
                TaskAction::Created,
            ],
        "unexpected event history: {actions:?}"
    );
    eyre::ensure!(
        board.notifier.messages(NotificationLevel::Success).len() == 5,
        "expected one success notification per mutation"
    );
    ensure_no_drift(&board)
}

#[tokio::test(flavor = "multi_thread")]
async fn toolbar_query_narrows_and_orders_columns() -> Result<(), eyre::Report> {
    let board = loaded_board("1").await?;
    let query = BoardQuery::new()
        .with_search("implement")
        .with_priority(PriorityFilter::try_from("low")?)
        .with_sort_key(SortKey::try_from("dueDate")?)
        .with_direction(SortDirection::Asc);

    let columns = board.store.board(&query);

    eyre::ensure!(columns.total() == 1, "expected a single match");
    let todo = columns.column(TaskStatus::Todo);
    let first = todo.first().ok_or_else(|| eyre::eyre!("empty todo column"))?;
    eyre::ensure!(
        first.task().title() == "Implement task assignment feature",
        "unexpected match {}",
        first.task().title()
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn edits_are_visible_to_a_fresh_store() -> Result<(), eyre::Report> {
    let board = loaded_board("1").await?;
    let id = fixtures::task_id(6);
    board
        .store
        .update(id, TaskPatch::new().with_title("Polish mobile layout"))
        .await?;
    board.store.delete(fixtures::task_id(7)).await?;

    board.store.refetch().await?;

    eyre::ensure!(local_title(&board, id)? == "Polish mobile layout", "edit lost");
    eyre::ensure!(board.store.tasks().len() == 6, "delete lost");
    ensure_no_drift(&board)
}
