//! End-to-end synchronizer flows against the in-memory board service.

use std::sync::Arc;

use super::helpers::{TestService, connect, ensure_consistent, seed_lanes, service};
use rstest::rstest;
use taskboard::board::{domain::TaskId, services::SyncError};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn snapshot_mirrors_service_after_mixed_mutations(
    service: Arc<TestService>,
) -> Result<(), eyre::Report> {
    let sync = connect(&service).await?;
    let lanes = seed_lanes(&sync, &["Todo", "Doing", "Done"]).await?;
    let [todo, doing, done] = lanes.as_slice() else {
        eyre::bail!("expected three lanes");
    };

    let docs = sync.create_task(todo, "Write docs", "").await?;
    let build = sync.create_task(todo, "Build it", "core first").await?;
    let ship = sync.create_task(doing, "Ship it", "").await?;
    sync.move_task(docs.id(), doing).await?;
    sync.update_task(build.id(), "Build it well", "core first").await?;
    sync.move_task(ship.id(), done).await?;
    sync.delete_task(build.id()).await?;
    sync.update_lane(done, "Shipped").await?;

    let snapshot = sync
        .snapshot()
        .ok_or_else(|| eyre::eyre!("snapshot missing after load"))?;
    ensure_consistent(&snapshot)?;
    eyre::ensure!(
        snapshot == service.board(),
        "snapshot diverged from service board"
    );
    eyre::ensure!(snapshot.task_count() == 2, "expected two remaining tasks");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fresh_load_reproduces_incrementally_built_snapshot(
    service: Arc<TestService>,
) -> Result<(), eyre::Report> {
    let sync = connect(&service).await?;
    let lanes = seed_lanes(&sync, &["Todo", "Done"]).await?;
    let [todo, done] = lanes.as_slice() else {
        eyre::bail!("expected two lanes");
    };
    for title in ["one", "two", "three"] {
        sync.create_task(todo, title, "").await?;
    }
    let moved = sync.create_task(todo, "four", "").await?;
    sync.move_task(moved.id(), done).await?;

    let observer = connect(&service).await?;

    eyre::ensure!(
        observer.snapshot() == sync.snapshot(),
        "independent load disagrees with incrementally patched snapshot"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moving_within_the_same_lane_appends_to_its_end(
    service: Arc<TestService>,
) -> Result<(), eyre::Report> {
    let sync = connect(&service).await?;
    let lanes = seed_lanes(&sync, &["Todo"]).await?;
    let todo = lanes
        .first()
        .ok_or_else(|| eyre::eyre!("expected one lane"))?;
    let first = sync.create_task(todo, "first", "").await?;
    sync.create_task(todo, "second", "").await?;

    sync.move_task(first.id(), todo).await?;

    let lane = sync
        .lane(todo)
        .ok_or_else(|| eyre::eyre!("lane missing"))?;
    let titles: Vec<&str> = lane.tasks().iter().map(|t| t.title().as_str()).collect();
    eyre::ensure!(
        titles == ["second", "first"],
        "unexpected order {titles:?}"
    );
    ensure_consistent(&service.board())?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_task_removed_elsewhere_reports_not_found(
    service: Arc<TestService>,
) -> Result<(), eyre::Report> {
    let sync = connect(&service).await?;
    let lanes = seed_lanes(&sync, &["Todo"]).await?;
    let todo = lanes
        .first()
        .ok_or_else(|| eyre::eyre!("expected one lane"))?;
    let task = sync.create_task(todo, "shared", "").await?;
    let other = connect(&service).await?;
    other.delete_task(task.id()).await?;

    let result = sync.delete_task(task.id()).await;

    let Err(SyncError::Remote(remote)) = &result else {
        eyre::bail!("expected remote failure, got {result:?}");
    };
    eyre::ensure!(remote.status() == Some(404), "expected 404, got {remote}");
    eyre::ensure!(
        sync.task(task.id()).is_some(),
        "failed delete must not touch the snapshot"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_task_cannot_be_reloaded(service: Arc<TestService>) -> Result<(), eyre::Report> {
    let sync = connect(&service).await?;

    let result = sync.reload_task(&TaskId::new("missing")).await;

    eyre::ensure!(
        result == Err(SyncError::TaskNotFound(TaskId::new("missing"))),
        "unexpected result {result:?}"
    );
    Ok(())
}
