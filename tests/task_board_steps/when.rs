//! When steps for task board BDD scenarios.

use super::world::{BoardWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::{
    fixtures,
    task::domain::{TaskDraft, TaskPatch, TaskStatus},
};

#[when(r#"task {n:u64} is moved to "{status}""#)]
fn task_is_moved(world: &mut BoardWorld, n: u64, status: String) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())?;
    let result = run_async(
        world
            .store()?
            .change_status(fixtures::task_id(u128::from(n)), target),
    );
    world.last_outcome = Some(result.map(|_| ()));
    Ok(())
}

#[when(r#"task {n:u64} is renamed to "{title}""#)]
fn task_is_renamed(world: &mut BoardWorld, n: u64, title: String) -> Result<(), eyre::Report> {
    let result = run_async(world.store()?.update(
        fixtures::task_id(u128::from(n)),
        TaskPatch::new().with_title(title),
    ));
    world.last_outcome = Some(result.map(|_| ()));
    Ok(())
}

#[when("task {n:u64} is deleted")]
fn task_is_deleted(world: &mut BoardWorld, n: u64) -> Result<(), eyre::Report> {
    let result = run_async(world.store()?.delete(fixtures::task_id(u128::from(n))));
    world.last_outcome = Some(result);
    Ok(())
}

#[when(r#"a task titled "{title}" is created"#)]
fn task_is_created(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let result = run_async(world.store()?.create(TaskDraft::new(title)));
    world.last_outcome = Some(result.map(|_| ()));
    Ok(())
}

#[when(r#"the board is searched for "{search}""#)]
fn board_is_searched(world: &mut BoardWorld, search: String) {
    world.query = world.query.clone().with_search(search);
}
