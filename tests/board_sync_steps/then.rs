//! Then steps for board synchronization scenarios.

use super::world::BoardWorld;
use rstest_bdd_macros::then;

#[then("the operation succeeds")]
fn operation_succeeds(world: &BoardWorld) -> Result<(), eyre::Report> {
    match world.last_outcome.as_ref() {
        Some(Ok(())) => Ok(()),
        Some(Err(err)) => Err(eyre::eyre!("expected success, got {err}")),
        None => Err(eyre::eyre!("no operation ran in this scenario")),
    }
}

#[then("the operation fails")]
fn operation_fails(world: &BoardWorld) -> Result<(), eyre::Report> {
    match world.last_outcome.as_ref() {
        Some(Err(_)) => Ok(()),
        Some(Ok(())) => Err(eyre::eyre!("expected the operation to fail")),
        None => Err(eyre::eyre!("no operation ran in this scenario")),
    }
}

#[then(r#"the error mentions "{text}""#)]
fn error_mentions(world: &BoardWorld, text: String) -> Result<(), eyre::Report> {
    let message = world
        .sync
        .last_error()
        .ok_or_else(|| eyre::eyre!("expected an error to be recorded"))?;
    if !message.contains(&text) {
        return Err(eyre::eyre!("error {message:?} does not mention {text:?}"));
    }
    Ok(())
}

#[then("no error is recorded")]
fn no_error_recorded(world: &BoardWorld) -> Result<(), eyre::Report> {
    if let Some(message) = world.sync.last_error() {
        return Err(eyre::eyre!("unexpected error recorded: {message}"));
    }
    Ok(())
}

#[then(r#"lane "{lane}" holds {count:u64} tasks"#)]
fn lane_holds(world: &BoardWorld, lane: String, count: u64) -> Result<(), eyre::Report> {
    let lane_id = world.lane_id(&lane)?;
    let held = world
        .sync
        .lane(&lane_id)
        .ok_or_else(|| eyre::eyre!("lane {lane:?} missing from snapshot"))?
        .tasks()
        .len();
    if u64::try_from(held)? != count {
        return Err(eyre::eyre!("lane {lane:?} holds {held} tasks, expected {count}"));
    }
    Ok(())
}

#[then("the board matches the service")]
fn board_matches_service(world: &BoardWorld) -> Result<(), eyre::Report> {
    let snapshot = world
        .sync
        .snapshot()
        .ok_or_else(|| eyre::eyre!("no snapshot loaded"))?;
    snapshot
        .check_invariants()
        .map_err(|violation| eyre::eyre!("snapshot invariant violated: {violation}"))?;
    if snapshot != world.service.board() {
        return Err(eyre::eyre!("snapshot diverged from the service board"));
    }
    Ok(())
}
