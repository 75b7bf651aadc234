//! Error types for board domain validation and invariant checks.

use super::{LaneId, TaskId};
use thiserror::Error;

/// Errors returned while constructing or validating board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task title is empty after trimming.
    #[error("Title is required")]
    EmptyTaskTitle,

    /// The lane name is empty after trimming.
    #[error("Lane name is required")]
    EmptyLaneName,

    /// Two lanes on the board share an identifier.
    #[error("duplicate lane identifier: {0}")]
    DuplicateLane(LaneId),

    /// Two lanes on the board share a position.
    #[error("duplicate lane position {0}")]
    DuplicateLanePosition(i64),

    /// A task identifier appears more than once on the board.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// Two tasks in the same lane share a position.
    #[error("duplicate task position {position} in lane {lane}")]
    DuplicateTaskPosition {
        /// Lane holding the conflicting tasks.
        lane: LaneId,
        /// Position claimed by more than one task.
        position: i64,
    },

    /// A task is held by a lane other than the one it references.
    #[error("task {task} references lane {referenced} but is held by lane {holder}")]
    ForeignTask {
        /// Offending task.
        task: TaskId,
        /// Lane named by the task.
        referenced: LaneId,
        /// Lane whose sequence contains the task.
        holder: LaneId,
    },
}
