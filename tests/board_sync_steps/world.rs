//! Shared world state for board synchronization BDD scenarios.

use std::{collections::HashMap, sync::Arc};

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::{
    adapters::memory::InMemoryBoardService,
    domain::{LaneId, TaskId},
    services::{BoardSynchronizer, SyncError},
};

/// Service type used by the BDD world.
pub type TestService = InMemoryBoardService<DefaultClock>;

/// Scenario world for board synchronization behaviour tests.
pub struct BoardWorld {
    pub service: Arc<TestService>,
    pub sync: BoardSynchronizer<TestService>,
    pub lanes: HashMap<String, LaneId>,
    pub tasks: HashMap<String, TaskId>,
    pub last_outcome: Option<Result<(), SyncError>>,
}

impl BoardWorld {
    /// Creates a world around an empty board that has not been loaded yet.
    #[must_use]
    pub fn new() -> Self {
        let service = Arc::new(InMemoryBoardService::new(Arc::new(DefaultClock)));
        let sync = BoardSynchronizer::new(Arc::clone(&service));
        Self {
            service,
            sync,
            lanes: HashMap::new(),
            tasks: HashMap::new(),
            last_outcome: None,
        }
    }

    /// Resolves a lane name used in a scenario to its identifier.
    pub fn lane_id(&self, name: &str) -> Result<LaneId, eyre::Report> {
        self.lanes
            .get(name)
            .cloned()
            .ok_or_else(|| eyre::eyre!("lane {name:?} was not created in this scenario"))
    }

    /// Resolves a task title used in a scenario to its identifier.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.tasks
            .get(title)
            .cloned()
            .ok_or_else(|| eyre::eyre!("task {title:?} was not created in this scenario"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
