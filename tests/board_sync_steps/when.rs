//! When steps for board synchronization scenarios.

use super::world::{BoardWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#"a task titled "{title}" is created in lane "{lane}""#)]
fn create_task(world: &mut BoardWorld, title: String, lane: String) -> Result<(), eyre::Report> {
    let lane_id = world.lane_id(&lane)?;
    let result = run_async(world.sync.create_task(&lane_id, &title, ""));
    if let Ok(task) = &result {
        world.tasks.insert(title, task.id().clone());
    }
    world.last_outcome = Some(result.map(|_| ()));
    Ok(())
}

#[when(r#"task "{title}" is moved to lane "{lane}""#)]
fn move_task(world: &mut BoardWorld, title: String, lane: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    let lane_id = world.lane_id(&lane)?;
    let result = run_async(world.sync.move_task(&task_id, &lane_id));
    world.last_outcome = Some(result.map(|_| ()));
    Ok(())
}

#[when(r#"lane "{lane}" is deleted"#)]
fn delete_lane(world: &mut BoardWorld, lane: String) -> Result<(), eyre::Report> {
    let lane_id = world.lane_id(&lane)?;
    world.last_outcome = Some(run_async(world.sync.delete_lane(&lane_id)));
    Ok(())
}

#[when("the board is refreshed")]
fn refresh_board(world: &mut BoardWorld) {
    world.last_outcome = Some(run_async(world.sync.refresh()));
}
