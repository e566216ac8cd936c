//! Then steps for task board BDD scenarios.

use super::world::BoardWorld;
use rstest_bdd_macros::then;
use taskboard::{
    fixtures,
    task::{
        domain::{TaskAction, TaskStatus},
        ports::NotificationLevel,
    },
};

#[then(r#"task {n:u64} is in column "{status}""#)]
fn task_is_in_column(world: &BoardWorld, n: u64, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())?;
    let view = world
        .store()?
        .get(fixtures::task_id(u128::from(n)))
        .ok_or_else(|| eyre::eyre!("task {n} is not on the board"))?;
    eyre::ensure!(
        view.task().status() == expected,
        "expected {expected}, found {}",
        view.task().status()
    );
    Ok(())
}

#[then(r#"task {n:u64} is titled "{title}""#)]
fn task_is_titled(world: &BoardWorld, n: u64, title: String) -> Result<(), eyre::Report> {
    let view = world
        .store()?
        .get(fixtures::task_id(u128::from(n)))
        .ok_or_else(|| eyre::eyre!("task {n} is not on the board"))?;
    eyre::ensure!(
        view.task().title() == title,
        "expected title {title:?}, found {:?}",
        view.task().title()
    );
    Ok(())
}

#[then(r#"the latest event is "{action}""#)]
fn latest_event_is(world: &BoardWorld, action: String) -> Result<(), eyre::Report> {
    let expected = TaskAction::try_from(action.as_str())?;
    let latest = world
        .store()?
        .events()
        .into_iter()
        .next()
        .ok_or_else(|| eyre::eyre!("no events recorded"))?;
    eyre::ensure!(
        latest.action() == expected,
        "expected {expected}, found {}",
        latest.action()
    );
    Ok(())
}

#[then(r#"the activity feed says "{message}""#)]
fn activity_feed_says(world: &BoardWorld, message: String) -> Result<(), eyre::Report> {
    let feed = world.notifier.messages(NotificationLevel::Info);
    eyre::ensure!(
        feed.contains(&message),
        "message {message:?} not in feed {feed:?}"
    );
    Ok(())
}

#[then("the mutation fails")]
fn mutation_fails(world: &BoardWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing mutation outcome"))?;
    eyre::ensure!(outcome.is_err(), "expected failure, got {outcome:?}");
    Ok(())
}

#[then("an error notification is shown")]
fn error_notification_is_shown(world: &BoardWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        !world.notifier.messages(NotificationLevel::Error).is_empty(),
        "no error notification delivered"
    );
    Ok(())
}

#[then("the board holds {count:usize} tasks")]
fn board_holds(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let held = world.store()?.tasks().len();
    eyre::ensure!(held == count, "expected {count} tasks, found {held}");
    Ok(())
}

#[then(r#"the first task is titled "{title}""#)]
fn first_task_is_titled(world: &BoardWorld, title: String) -> Result<(), eyre::Report> {
    let tasks = world.store()?.tasks();
    let first = tasks
        .first()
        .ok_or_else(|| eyre::eyre!("board is empty"))?;
    eyre::ensure!(
        first.task().title() == title,
        "expected {title:?}, found {:?}",
        first.task().title()
    );
    Ok(())
}

#[then(r#"column "{status}" lists "{title}""#)]
fn column_lists(world: &BoardWorld, status: String, title: String) -> Result<(), eyre::Report> {
    let column = TaskStatus::try_from(status.as_str())?;
    let columns = world.store()?.board(&world.query);
    let titles: Vec<&str> = columns
        .column(column)
        .iter()
        .map(|view| view.task().title())
        .collect();
    eyre::ensure!(titles == [title.as_str()], "column {status} holds {titles:?}");
    Ok(())
}

#[then(r#"column "{status}" is empty"#)]
fn column_is_empty(world: &BoardWorld, status: String) -> Result<(), eyre::Report> {
    let column = TaskStatus::try_from(status.as_str())?;
    let columns = world.store()?.board(&world.query);
    eyre::ensure!(
        columns.column(column).is_empty(),
        "column {status} is not empty"
    );
    Ok(())
}
