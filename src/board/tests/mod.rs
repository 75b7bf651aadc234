//! Unit tests for board synchronization.


use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;

use crate::board::{
    domain::{Board, BoardId, Lane, LaneId, LaneName, Task, TaskData, TaskId, TaskTitle},
    ports::{
        CreateLaneRequest, CreateTaskRequest, MoveTaskRequest, RemoteBoardService, RemoteResult,
        UpdateLaneRequest, UpdateTaskRequest,
    },
};

mock! {
    pub Remote {}

    #[async_trait]
    impl RemoteBoardService for Remote {
        async fn get_board(&self) -> RemoteResult<Board>;
        async fn create_task(&self, request: &CreateTaskRequest) -> RemoteResult<Task>;
        async fn get_task(&self, id: &TaskId) -> RemoteResult<Task>;
        async fn update_task(&self, id: &TaskId, request: &UpdateTaskRequest) -> RemoteResult<Task>;
        async fn delete_task(&self, id: &TaskId) -> RemoteResult<()>;
        async fn move_task(&self, id: &TaskId, request: &MoveTaskRequest) -> RemoteResult<Task>;
        async fn create_lane(&self, request: &CreateLaneRequest) -> RemoteResult<Lane>;
        async fn update_lane(&self, id: &LaneId, request: &UpdateLaneRequest) -> RemoteResult<Lane>;
        async fn delete_lane(&self, id: &LaneId) -> RemoteResult<()>;
    }
}

/// Builds a task with a fixed title derived from its identifier.
fn task(id: &str, lane_id: &str, position: i64) -> Task {
    Task::from_data(TaskData {
        id: TaskId::new(id),
        title: TaskTitle::new(format!("Task {id}")).expect("valid title"),
        description: String::new(),
        lane_id: LaneId::new(lane_id),
        position,
        created_at: Utc::now(),
    })
}

/// Builds a lane holding the given tasks in order.
fn lane(id: &str, name: &str, position: i64, tasks: Vec<Task>) -> Lane {
    let mut lane = Lane::new(
        LaneId::new(id),
        LaneName::new(name).expect("valid lane name"),
        position,
    );
    for held in tasks {
        lane.push_task(held);
    }
    lane
}

/// Board with an empty "Todo" lane and a "Doing" lane holding `task-1`.
fn sample_board() -> Board {
    Board::new(
        BoardId::new("board-1"),
        vec![
            lane("lane-todo", "Todo", 0, Vec::new()),
            lane("lane-doing", "Doing", 1, vec![task("task-1", "lane-doing", 0)]),
        ],
    )
}
