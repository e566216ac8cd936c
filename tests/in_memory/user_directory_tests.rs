//! Directory edits as seen through the task store.

use taskboard::{
    fixtures,
    task::ports::NotificationLevel,
    user::{
        domain::{ProfileUpdate, User, UserId, UserRole},
        ports::{UserDirectory, UserDirectoryError},
    },
};

use super::helpers::loaded_board;

#[tokio::test(flavor = "multi_thread")]
async fn newly_registered_user_can_be_assigned() -> Result<(), eyre::Report> {
    let board = loaded_board("1").await?;
    let newcomer = User::new(
        UserId::new("5")?,
        "Priya Ops",
        "priya@example.com",
        UserRole::User,
    )?;
    board.directory.register(newcomer)?;

    let view = board
        .store
        .assign(fixtures::task_id(7), UserId::new("5")?)
        .await?;

    eyre::ensure!(
        view.assignee().map(User::name) == Some("Priya Ops"),
        "assignee not resolved"
    );
    eyre::ensure!(
        board.notifier.messages(NotificationLevel::Info)
            == ["John Admin assigned Set up CI/CD pipeline to Priya Ops"],
        "unexpected activity feed"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn profile_edits_show_after_refetch() -> Result<(), eyre::Report> {
    let board = loaded_board("1").await?;
    board.directory.update_profile(
        &UserId::new("3")?,
        ProfileUpdate::new().with_name("Michael Dev"),
    )?;

    board.store.refetch().await?;

    let view = board
        .store
        .get(fixtures::task_id(1))
        .ok_or_else(|| eyre::eyre!("task missing"))?;
    eyre::ensure!(
        view.assignee().map(User::name) == Some("Michael Dev"),
        "profile edit not visible"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_is_rejected() -> Result<(), eyre::Report> {
    let board = loaded_board("1").await?;
    let clash = User::new(
        UserId::new("6")?,
        "Impostor",
        "Admin@Example.com",
        UserRole::User,
    )?;

    let result = board.directory.register(clash);

    eyre::ensure!(
        matches!(result, Err(UserDirectoryError::DuplicateEmail(_))),
        "expected duplicate email, got {result:?}"
    );
    eyre::ensure!(board.directory.list_users().len() == 4, "directory changed");
    Ok(())
}
