//! Port for the remote board service that owns the canonical board state.

use crate::board::domain::{Board, Lane, LaneId, LaneName, Task, TaskId, TaskTitle};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Message used when a failed response carries no readable body.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Result type for remote board service operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Contract of the service that persists the board.
///
/// Every mutation returns the canonical representation of the affected entity
/// as the service stored it.
#[async_trait]
pub trait RemoteBoardService: Send + Sync {
    /// Fetches the board with its lanes and nested tasks.
    async fn get_board(&self) -> RemoteResult<Board>;

    /// Creates a task at the end of a lane.
    async fn create_task(&self, request: &CreateTaskRequest) -> RemoteResult<Task>;

    /// Fetches a single task.
    async fn get_task(&self, id: &TaskId) -> RemoteResult<Task>;

    /// Replaces a task's title and description.
    async fn update_task(&self, id: &TaskId, request: &UpdateTaskRequest) -> RemoteResult<Task>;

    /// Deletes a task.
    async fn delete_task(&self, id: &TaskId) -> RemoteResult<()>;

    /// Moves a task to another lane and returns its post-move state.
    async fn move_task(&self, id: &TaskId, request: &MoveTaskRequest) -> RemoteResult<Task>;

    /// Creates an empty lane.
    async fn create_lane(&self, request: &CreateLaneRequest) -> RemoteResult<Lane>;

    /// Renames a lane.
    async fn update_lane(&self, id: &LaneId, request: &UpdateLaneRequest) -> RemoteResult<Lane>;

    /// Deletes a lane. The service rejects lanes that still hold tasks.
    async fn delete_lane(&self, id: &LaneId) -> RemoteResult<()>;
}

/// Payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Lane receiving the task.
    pub lane_id: LaneId,
    /// Task title.
    pub title: TaskTitle,
    /// Task description, possibly empty.
    pub description: String,
}

/// Payload for updating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateTaskRequest {
    /// New title.
    pub title: TaskTitle,
    /// New description, possibly empty.
    pub description: String,
}

/// Payload for moving a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTaskRequest {
    /// Destination lane.
    pub target_lane_id: LaneId,
    /// Suggested insertion index within the destination lane.
    pub position: i64,
}

/// Payload for creating a lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateLaneRequest {
    /// Lane name.
    pub name: LaneName,
}

/// Payload for renaming a lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateLaneRequest {
    /// New lane name.
    pub name: LaneName,
}

/// Errors returned by remote board service implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// The service answered with a non-success status.
    #[error("API Error {status}: {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Human-readable message from the response body.
        message: String,
    },

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Builds an API error from a status code and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Returns the HTTP status for API errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}
