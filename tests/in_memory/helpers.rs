//! Shared test helpers for in-memory synchronizer integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::{
    adapters::memory::InMemoryBoardService,
    domain::{Board, LaneId},
    services::{BoardSynchronizer, SyncError},
};

/// Service type used across integration tests.
pub type TestService = InMemoryBoardService<DefaultClock>;

/// Synchronizer type used across integration tests.
pub type TestSync = BoardSynchronizer<TestService>;

/// Provides a fresh service holding an empty board.
#[fixture]
pub fn service() -> Arc<TestService> {
    Arc::new(InMemoryBoardService::new(Arc::new(DefaultClock)))
}

/// Creates a synchronizer over `service` and loads the board.
///
/// # Errors
///
/// Returns an error if the initial load fails.
pub async fn connect(service: &Arc<TestService>) -> Result<TestSync, SyncError> {
    let sync = BoardSynchronizer::new(Arc::clone(service));
    sync.load().await?;
    Ok(sync)
}

/// Creates lanes with the given names and returns their identifiers in order.
///
/// # Errors
///
/// Returns an error if any lane creation fails.
pub async fn seed_lanes(sync: &TestSync, names: &[&str]) -> Result<Vec<LaneId>, SyncError> {
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        let lane = sync.create_lane(name).await?;
        ids.push(lane.id().clone());
    }
    Ok(ids)
}

/// Checks the structural board invariants: unique lane and task ids, unique
/// positions, and every task held by the lane it references.
///
/// # Errors
///
/// Returns an error describing the first violation.
pub fn ensure_consistent(board: &Board) -> Result<(), eyre::Report> {
    board
        .check_invariants()
        .map_err(|violation| eyre::eyre!("board invariant violated: {violation}"))
}
