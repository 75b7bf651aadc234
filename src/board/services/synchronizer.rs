//! Board synchronizer: the client-side mirror of the service's board.
//!
//! Every mutation is confirm-then-apply. The request goes to the board
//! service first and the local snapshot is patched only with the entity the
//! service returns, so the snapshot is always a state the service produced.
//! A failed operation leaves the snapshot untouched, records its message in
//! the shared error slot and hands the error back to the caller.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

use super::SyncState;
use crate::board::{
    domain::{Board, BoardDomainError, Lane, LaneId, LaneName, Task, TaskId, TaskTitle},
    ports::{
        CreateLaneRequest, CreateTaskRequest, MoveTaskRequest, RemoteBoardService, RemoteError,
        UpdateLaneRequest, UpdateTaskRequest,
    },
};

/// Errors returned by synchronizer operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncError {
    /// The board service rejected the request or could not be reached.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The input failed validation before any request was sent.
    #[error(transparent)]
    Validation(#[from] BoardDomainError),

    /// The operation needs a loaded board.
    #[error("Board has not been loaded")]
    BoardNotLoaded,

    /// The referenced lane is not on the board.
    #[error("Lane {0} not found")]
    LaneNotFound(LaneId),

    /// The referenced task is not on the board.
    #[error("Task {0} not found")]
    TaskNotFound(TaskId),

    /// The lane still holds tasks and cannot be deleted.
    #[error("Cannot delete lane with tasks: lane {lane} holds {tasks} task(s)")]
    LaneNotEmpty {
        /// Lane whose deletion was refused.
        lane: LaneId,
        /// Number of tasks the lane holds.
        tasks: usize,
    },
}

/// Result type for synchronizer operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Owns the board snapshot and mediates every mutation through the service.
///
/// Operations take `&self`, so overlapping calls proceed concurrently; each
/// one patches whatever snapshot is current when its response arrives.
pub struct BoardSynchronizer<S>
where
    S: RemoteBoardService,
{
    service: Arc<S>,
    state: watch::Sender<SyncState>,
}

impl<S> BoardSynchronizer<S>
where
    S: RemoteBoardService,
{
    /// Creates a synchronizer with no snapshot. Call [`Self::load`] to fetch
    /// the board.
    #[must_use]
    pub fn new(service: Arc<S>) -> Self {
        let (state, _) = watch::channel(SyncState::default());
        Self { service, state }
    }

    /// Returns a receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.state.subscribe()
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn state(&self) -> SyncState {
        self.state.borrow().clone()
    }

    /// Returns a copy of the current board snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Option<Board> {
        self.state.borrow().snapshot.clone()
    }

    /// Returns whether a board fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Returns the message of the most recent failure.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    /// Returns a copy of a lane from the snapshot.
    #[must_use]
    pub fn lane(&self, id: &LaneId) -> Option<Lane> {
        self.state
            .borrow()
            .snapshot
            .as_ref()
            .and_then(|board| board.lane(id).cloned())
    }

    /// Returns a copy of a task from the snapshot.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<Task> {
        self.state
            .borrow()
            .snapshot
            .as_ref()
            .and_then(|board| board.task(id).cloned())
    }

    /// Returns whether the lane exists and holds no tasks.
    #[must_use]
    pub fn can_delete_lane(&self, id: &LaneId) -> bool {
        self.require_empty_lane(id).is_ok()
    }

    /// Clears the error slot without contacting the service.
    pub fn clear_error(&self) {
        self.state.send_if_modified(|state| state.last_error.take().is_some());
    }

    /// Fetches the board and replaces the snapshot wholesale.
    ///
    /// The error slot is cleared when the fetch starts. On failure the prior
    /// snapshot, if any, is kept. The loading flag stays set until every
    /// overlapping fetch has finished; the last response to arrive wins.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Remote`] when the fetch fails.
    #[tracing::instrument(skip_all)]
    pub async fn load(&self) -> SyncResult<()> {
        self.state.send_modify(|state| {
            state.pending_loads = state.pending_loads.saturating_add(1);
            state.last_error = None;
        });

        match self.service.get_board().await {
            Ok(mut board) => {
                board.sort_by_position();
                if let Err(violation) = board.check_invariants() {
                    tracing::warn!(%violation, "board service returned an inconsistent board");
                }
                tracing::debug!(
                    lanes = board.lanes().len(),
                    tasks = board.task_count(),
                    "board loaded"
                );
                self.state.send_modify(|state| {
                    state.snapshot = Some(board);
                    state.pending_loads = state.pending_loads.saturating_sub(1);
                });
                Ok(())
            }
            Err(err) => {
                self.state
                    .send_modify(|state| state.pending_loads = state.pending_loads.saturating_sub(1));
                self.settle(Err(err.into()))
            }
        }
    }

    /// Re-fetches the board. Equivalent to [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Remote`] when the fetch fails.
    pub async fn refresh(&self) -> SyncResult<()> {
        self.load().await
    }

    /// Creates a task at the end of a lane.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Validation`] for an empty title,
    /// [`SyncError::BoardNotLoaded`] or [`SyncError::LaneNotFound`] when the
    /// lane is not in the snapshot, and [`SyncError::Remote`] when the service
    /// rejects the request.
    #[tracing::instrument(skip_all, fields(lane_id = %lane_id))]
    pub async fn create_task(
        &self,
        lane_id: &LaneId,
        title: &str,
        description: &str,
    ) -> SyncResult<Task> {
        let outcome = self.try_create_task(lane_id, title, description).await;
        self.settle(outcome)
    }

    async fn try_create_task(
        &self,
        lane_id: &LaneId,
        title: &str,
        description: &str,
    ) -> SyncResult<Task> {
        let request = CreateTaskRequest {
            lane_id: lane_id.clone(),
            title: TaskTitle::new(title)?,
            description: description.trim().to_owned(),
        };
        self.require_lane(lane_id)?;

        let task = self.service.create_task(&request).await?;
        let created = task.clone();
        self.apply(|board| {
            let id = created.id().clone();
            if !board.append_task(created) {
                tracing::warn!(task_id = %id, "lane vanished before created task was applied");
            }
        });
        Ok(task)
    }

    /// Replaces a task's title and description.
    ///
    /// Only the confirmed text is applied; the task stays in whichever lane
    /// currently holds it. A task deleted in the meantime stays deleted.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Validation`] for an empty title,
    /// [`SyncError::BoardNotLoaded`] or [`SyncError::TaskNotFound`] when the
    /// task is not in the snapshot, and [`SyncError::Remote`] when the service
    /// rejects the request.
    #[tracing::instrument(skip_all, fields(task_id = %task_id))]
    pub async fn update_task(
        &self,
        task_id: &TaskId,
        title: &str,
        description: &str,
    ) -> SyncResult<Task> {
        let outcome = self.try_update_task(task_id, title, description).await;
        self.settle(outcome)
    }

    async fn try_update_task(
        &self,
        task_id: &TaskId,
        title: &str,
        description: &str,
    ) -> SyncResult<Task> {
        let request = UpdateTaskRequest {
            title: TaskTitle::new(title)?,
            description: description.trim().to_owned(),
        };
        self.require_task(task_id)?;

        let task = self.service.update_task(task_id, &request).await?;
        self.apply(|board| {
            if !board.patch_task_content(&task) {
                tracing::warn!(task_id = %task.id(), "task vanished before update was applied");
            }
        });
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Remote`] when the service rejects the request.
    #[tracing::instrument(skip_all, fields(task_id = %task_id))]
    pub async fn delete_task(&self, task_id: &TaskId) -> SyncResult<()> {
        let outcome = self.try_delete_task(task_id).await;
        self.settle(outcome)
    }

    async fn try_delete_task(&self, task_id: &TaskId) -> SyncResult<()> {
        self.service.delete_task(task_id).await?;
        self.apply(|board| {
            board.remove_task(task_id);
        });
        Ok(())
    }

    /// Moves a task to the end of another lane.
    ///
    /// The snapshot changes only after the service confirms the move; the
    /// returned task is appended to its new lane whatever position it carries.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::BoardNotLoaded`], [`SyncError::TaskNotFound`] or
    /// [`SyncError::LaneNotFound`] when either end of the move is missing from
    /// the snapshot, and [`SyncError::Remote`] when the service rejects the
    /// request.
    #[tracing::instrument(skip_all, fields(task_id = %task_id, target_lane_id = %target_lane_id))]
    pub async fn move_task(&self, task_id: &TaskId, target_lane_id: &LaneId) -> SyncResult<Task> {
        let outcome = self.try_move_task(task_id, target_lane_id).await;
        self.settle(outcome)
    }

    async fn try_move_task(&self, task_id: &TaskId, target_lane_id: &LaneId) -> SyncResult<Task> {
        let request = MoveTaskRequest {
            target_lane_id: target_lane_id.clone(),
            position: self.append_position(task_id, target_lane_id)?,
        };

        let task = self.service.move_task(task_id, &request).await?;
        let moved = task.clone();
        self.apply(|board| {
            let id = moved.id().clone();
            if !board.relocate_task(moved) {
                tracing::warn!(task_id = %id, "task or target lane vanished before move was applied");
            }
        });
        Ok(task)
    }

    /// Replaces a task with the service's current copy of it.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::BoardNotLoaded`] or [`SyncError::TaskNotFound`]
    /// when the task is not in the snapshot, and [`SyncError::Remote`] when
    /// the fetch fails.
    #[tracing::instrument(skip_all, fields(task_id = %task_id))]
    pub async fn reload_task(&self, task_id: &TaskId) -> SyncResult<Task> {
        let outcome = self.try_reload_task(task_id).await;
        self.settle(outcome)
    }

    async fn try_reload_task(&self, task_id: &TaskId) -> SyncResult<Task> {
        self.require_task(task_id)?;
        let task = self.service.get_task(task_id).await?;
        let fetched = task.clone();
        self.apply(|board| {
            let id = fetched.id().clone();
            if !board.replace_task(fetched) {
                tracing::warn!(task_id = %id, "task vanished before reload was applied");
            }
        });
        Ok(task)
    }

    /// Creates an empty lane at the end of the board.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Validation`] for an empty name and
    /// [`SyncError::Remote`] when the service rejects the request.
    #[tracing::instrument(skip_all)]
    pub async fn create_lane(&self, name: &str) -> SyncResult<Lane> {
        let outcome = self.try_create_lane(name).await;
        self.settle(outcome)
    }

    async fn try_create_lane(&self, name: &str) -> SyncResult<Lane> {
        let request = CreateLaneRequest {
            name: LaneName::new(name)?,
        };
        let lane = self.service.create_lane(&request).await?.without_tasks();
        let created = lane.clone();
        self.apply(|board| board.push_lane(created));
        Ok(lane)
    }

    /// Renames a lane, leaving its tasks untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Validation`] for an empty name and
    /// [`SyncError::Remote`] when the service rejects the request.
    #[tracing::instrument(skip_all, fields(lane_id = %lane_id))]
    pub async fn update_lane(&self, lane_id: &LaneId, name: &str) -> SyncResult<Lane> {
        let outcome = self.try_update_lane(lane_id, name).await;
        self.settle(outcome)
    }

    async fn try_update_lane(&self, lane_id: &LaneId, name: &str) -> SyncResult<Lane> {
        let request = UpdateLaneRequest {
            name: LaneName::new(name)?,
        };
        let lane = self.service.update_lane(lane_id, &request).await?;
        let renamed = lane.name().clone();
        self.apply(|board| {
            board.rename_lane(lane_id, renamed);
        });
        Ok(lane)
    }

    /// Deletes an empty lane.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::BoardNotLoaded`] or [`SyncError::LaneNotFound`]
    /// when the lane is not in the snapshot, [`SyncError::LaneNotEmpty`] when
    /// it still holds tasks, and [`SyncError::Remote`] when the service
    /// rejects the request.
    #[tracing::instrument(skip_all, fields(lane_id = %lane_id))]
    pub async fn delete_lane(&self, lane_id: &LaneId) -> SyncResult<()> {
        let outcome = self.try_delete_lane(lane_id).await;
        self.settle(outcome)
    }

    async fn try_delete_lane(&self, lane_id: &LaneId) -> SyncResult<()> {
        self.require_empty_lane(lane_id)?;
        self.service.delete_lane(lane_id).await?;
        self.apply(|board| {
            board.remove_lane(lane_id);
        });
        Ok(())
    }

    /// Patches the snapshot in place. Without a snapshot there is nothing to
    /// patch.
    fn apply(&self, patch: impl FnOnce(&mut Board)) {
        self.state.send_modify(|state| {
            if let Some(board) = state.snapshot.as_mut() {
                patch(board);
            }
        });
    }

    /// Records a failure in the error slot and passes the outcome through.
    fn settle<T>(&self, outcome: SyncResult<T>) -> SyncResult<T> {
        match &outcome {
            Ok(_) => tracing::debug!("board operation confirmed"),
            Err(err) => {
                tracing::warn!(error = %err, "board operation failed");
                let message = err.to_string();
                self.state
                    .send_modify(|state| state.last_error = Some(message));
            }
        }
        outcome
    }

    fn with_board<T>(&self, check: impl FnOnce(&Board) -> SyncResult<T>) -> SyncResult<T> {
        let state = self.state.borrow();
        let board = state.snapshot.as_ref().ok_or(SyncError::BoardNotLoaded)?;
        check(board)
    }

    fn require_lane(&self, lane_id: &LaneId) -> SyncResult<()> {
        self.with_board(|board| {
            board
                .lane(lane_id)
                .map(|_| ())
                .ok_or_else(|| SyncError::LaneNotFound(lane_id.clone()))
        })
    }

    fn require_task(&self, task_id: &TaskId) -> SyncResult<()> {
        self.with_board(|board| {
            board
                .task(task_id)
                .map(|_| ())
                .ok_or_else(|| SyncError::TaskNotFound(task_id.clone()))
        })
    }

    fn require_empty_lane(&self, lane_id: &LaneId) -> SyncResult<()> {
        self.with_board(|board| {
            let lane = board
                .lane(lane_id)
                .ok_or_else(|| SyncError::LaneNotFound(lane_id.clone()))?;
            if lane.is_empty() {
                Ok(())
            } else {
                Err(SyncError::LaneNotEmpty {
                    lane: lane_id.clone(),
                    tasks: lane.tasks().len(),
                })
            }
        })
    }

    /// Index one past the last task of the target lane, not counting the task
    /// being moved. Sent to the service as the insertion hint.
    fn append_position(&self, task_id: &TaskId, target_lane_id: &LaneId) -> SyncResult<i64> {
        self.with_board(|board| {
            if board.task(task_id).is_none() {
                return Err(SyncError::TaskNotFound(task_id.clone()));
            }
            let lane = board
                .lane(target_lane_id)
                .ok_or_else(|| SyncError::LaneNotFound(target_lane_id.clone()))?;
            let remaining = lane
                .tasks()
                .iter()
                .filter(|task| task.id() != task_id)
                .count();
            Ok(i64::try_from(remaining).unwrap_or(i64::MAX))
        })
    }
}
