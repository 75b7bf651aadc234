//! In-memory board service for tests and offline hosts.
//!
//! Behaves like the REST backend: it assigns identifiers, positions and
//! creation timestamps, answers missing entities with `404`, and refuses to
//! delete a lane that still holds tasks with `409`.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use uuid::Uuid;

use crate::board::{
    domain::{Board, BoardId, Lane, LaneId, Task, TaskData, TaskId},
    ports::{
        CreateLaneRequest, CreateTaskRequest, MoveTaskRequest, RemoteBoardService, RemoteError,
        RemoteResult, UpdateLaneRequest, UpdateTaskRequest,
    },
};

const NOT_FOUND: u16 = 404;
const CONFLICT: u16 = 409;

/// Thread-safe in-memory board service.
pub struct InMemoryBoardService<C>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryBoardState>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryBoardService<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[derive(Debug)]
struct InMemoryBoardState {
    board: Board,
    pending_failures: VecDeque<RemoteError>,
    latency: Option<Duration>,
}

impl<C> InMemoryBoardService<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a service holding an empty board.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        let board = Board::new(BoardId::new(Uuid::new_v4().to_string()), Vec::new());
        Self::with_board(board, clock)
    }

    /// Creates a service seeded with an existing board.
    #[must_use]
    pub fn with_board(board: Board, clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryBoardState {
                board,
                pending_failures: VecDeque::new(),
                latency: None,
            })),
            clock,
        }
    }

    /// Makes the next operation fail with the given status and message.
    ///
    /// Queued failures are consumed one per operation, in order.
    pub fn fail_next(&self, status: u16, message: impl Into<String>) {
        self.write_state()
            .pending_failures
            .push_back(RemoteError::api(status, message));
    }

    /// Delays every subsequent response by `latency`.
    ///
    /// The operation takes effect on the stored board immediately; only the
    /// response is delayed, as with a slow network.
    pub fn set_latency(&self, latency: Option<Duration>) {
        self.write_state().latency = latency;
    }

    /// Returns a copy of the stored board.
    #[must_use]
    pub fn board(&self) -> Board {
        self.read_state().board.clone()
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, InMemoryBoardState> {
        self.state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, InMemoryBoardState> {
        self.state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Runs an operation against the stored board, then waits out the
    /// configured latency before handing back the outcome.
    async fn respond<T>(
        &self,
        operation: impl FnOnce(&mut Board, &C) -> RemoteResult<T>,
    ) -> RemoteResult<T> {
        let (outcome, latency) = {
            let mut state = self.write_state();
            let failure = state.pending_failures.pop_front();
            let outcome =
                failure.map_or_else(|| operation(&mut state.board, self.clock.as_ref()), Err);
            (outcome, state.latency)
        };
        if let Some(delay) = latency {
            tokio::time::sleep(delay).await;
        }
        outcome
    }
}

fn lane_not_found(id: &LaneId) -> RemoteError {
    RemoteError::api(NOT_FOUND, format!("Lane {id} not found"))
}

fn task_not_found(id: &TaskId) -> RemoteError {
    RemoteError::api(NOT_FOUND, format!("Task {id} not found"))
}

fn new_task(board: &Board, request: &CreateTaskRequest, clock: &impl Clock) -> RemoteResult<Task> {
    let lane = board
        .lane(&request.lane_id)
        .ok_or_else(|| lane_not_found(&request.lane_id))?;
    Ok(Task::from_data(TaskData {
        id: TaskId::new(Uuid::new_v4().to_string()),
        title: request.title.clone(),
        description: request.description.clone(),
        lane_id: lane.id().clone(),
        position: lane.next_task_position(),
        created_at: clock.utc(),
    }))
}

fn move_within(board: &mut Board, id: &TaskId, request: &MoveTaskRequest) -> RemoteResult<Task> {
    let next_position = board
        .lane(&request.target_lane_id)
        .ok_or_else(|| RemoteError::api(NOT_FOUND, "Target lane not found"))?
        .next_task_position();
    let mut task = board.remove_task(id).ok_or_else(|| task_not_found(id))?;
    task.reassign(request.target_lane_id.clone(), next_position);
    board.append_task(task.clone());
    Ok(task)
}

#[async_trait]
impl<C> RemoteBoardService for InMemoryBoardService<C>
where
    C: Clock + Send + Sync,
{
    async fn get_board(&self) -> RemoteResult<Board> {
        self.respond(|board, _| Ok(board.clone())).await
    }

    async fn create_task(&self, request: &CreateTaskRequest) -> RemoteResult<Task> {
        self.respond(|board, clock| {
            let task = new_task(board, request, clock)?;
            board.append_task(task.clone());
            Ok(task)
        })
        .await
    }

    async fn get_task(&self, id: &TaskId) -> RemoteResult<Task> {
        self.respond(|board, _| board.task(id).cloned().ok_or_else(|| task_not_found(id)))
            .await
    }

    async fn update_task(&self, id: &TaskId, request: &UpdateTaskRequest) -> RemoteResult<Task> {
        self.respond(|board, _| {
            let task = board.task_mut(id).ok_or_else(|| task_not_found(id))?;
            task.set_content(request.title.clone(), request.description.clone());
            Ok(task.clone())
        })
        .await
    }

    async fn delete_task(&self, id: &TaskId) -> RemoteResult<()> {
        self.respond(|board, _| {
            board
                .remove_task(id)
                .map(|_| ())
                .ok_or_else(|| task_not_found(id))
        })
        .await
    }

    async fn move_task(&self, id: &TaskId, request: &MoveTaskRequest) -> RemoteResult<Task> {
        self.respond(|board, _| move_within(board, id, request)).await
    }

    async fn create_lane(&self, request: &CreateLaneRequest) -> RemoteResult<Lane> {
        self.respond(|board, _| {
            let lane = Lane::new(
                LaneId::new(Uuid::new_v4().to_string()),
                request.name.clone(),
                board.next_lane_position(),
            );
            board.push_lane(lane.clone());
            Ok(lane)
        })
        .await
    }

    async fn update_lane(&self, id: &LaneId, request: &UpdateLaneRequest) -> RemoteResult<Lane> {
        self.respond(|board, _| {
            if !board.rename_lane(id, request.name.clone()) {
                return Err(lane_not_found(id));
            }
            board
                .lane(id)
                .map(|lane| lane.clone().without_tasks())
                .ok_or_else(|| lane_not_found(id))
        })
        .await
    }

    async fn delete_lane(&self, id: &LaneId) -> RemoteResult<()> {
        self.respond(|board, _| {
            let lane = board.lane(id).ok_or_else(|| lane_not_found(id))?;
            if !lane.is_empty() {
                return Err(RemoteError::api(CONFLICT, "Cannot delete lane with tasks"));
            }
            board.remove_lane(id);
            Ok(())
        })
        .await
    }
}
