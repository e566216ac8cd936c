//! Given steps for task board BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::task::adapters::memory::RemoteOperation;

#[given("the seeded board is loaded")]
fn seeded_board_is_loaded(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    world.seed()?;
    run_async(world.store()?.load()).wrap_err("load seeded board")?;
    Ok(())
}

#[given(r#"the remote will reject the next "{operation}""#)]
fn remote_rejects_next(world: &mut BoardWorld, operation: String) -> Result<(), eyre::Report> {
    let target = match operation.as_str() {
        "create" => RemoteOperation::Create,
        "update" => RemoteOperation::Update,
        "delete" => RemoteOperation::Delete,
        other => return Err(eyre::eyre!("unsupported remote operation: {other}")),
    };
    world.remote()?.fail_next(target);
    Ok(())
}
