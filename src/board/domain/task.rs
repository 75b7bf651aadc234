//! Task entity held inside a lane.

use super::{LaneId, TaskId, TaskTitle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unit of work positioned within a lane.
///
/// Tasks travel over the wire in camelCase with the position encoded as
/// `order`, matching the board service's JSON representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    #[serde(default)]
    description: String,
    lane_id: LaneId,
    #[serde(rename = "order")]
    position: i64,
    created_at: DateTime<Utc>,
}

/// Parameter object for constructing a task from service-provided values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskData {
    /// Service-assigned identifier.
    pub id: TaskId,
    /// Task title.
    pub title: TaskTitle,
    /// Free-form description, possibly empty.
    pub description: String,
    /// Lane the task belongs to.
    pub lane_id: LaneId,
    /// Order within the owning lane.
    pub position: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Builds a task from its parts.
    #[must_use]
    pub fn from_data(data: TaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            lane_id: data.lane_id,
            position: data.position,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the identifier of the owning lane.
    #[must_use]
    pub const fn lane_id(&self) -> &LaneId {
        &self.lane_id
    }

    /// Returns the position within the owning lane.
    #[must_use]
    pub const fn position(&self) -> i64 {
        self.position
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn set_content(&mut self, title: TaskTitle, description: String) {
        self.title = title;
        self.description = description;
    }

    pub(crate) fn reassign(&mut self, lane_id: LaneId, position: i64) {
        self.lane_id = lane_id;
        self.position = position;
    }
}
