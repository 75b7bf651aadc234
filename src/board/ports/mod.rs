//! Port contracts for board synchronization.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod remote;

pub use remote::{
    CreateLaneRequest, CreateTaskRequest, MoveTaskRequest, RemoteBoardService, RemoteError,
    RemoteResult, UNKNOWN_ERROR_MESSAGE, UpdateLaneRequest, UpdateTaskRequest,
};
