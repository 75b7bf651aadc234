//! Lane entity: an ordered column of tasks.

use super::{LaneId, LaneName, Task, TaskId};
use serde::{Deserialize, Serialize};

/// An ordered column grouping tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lane {
    id: LaneId,
    name: LaneName,
    #[serde(rename = "order")]
    position: i64,
    #[serde(default)]
    tasks: Vec<Task>,
}

impl Lane {
    /// Creates a lane with no tasks.
    #[must_use]
    pub const fn new(id: LaneId, name: LaneName, position: i64) -> Self {
        Self {
            id,
            name,
            position,
            tasks: Vec::new(),
        }
    }

    /// Returns the lane identifier.
    #[must_use]
    pub const fn id(&self) -> &LaneId {
        &self.id
    }

    /// Returns the lane name.
    #[must_use]
    pub const fn name(&self) -> &LaneName {
        &self.name
    }

    /// Returns the position among lanes.
    #[must_use]
    pub const fn position(&self) -> i64 {
        self.position
    }

    /// Returns the tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the task with the given identifier, if held by this lane.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns whether this lane holds the given task.
    #[must_use]
    pub fn contains_task(&self, id: &TaskId) -> bool {
        self.task(id).is_some()
    }

    /// Returns whether the lane holds no tasks and may therefore be deleted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the same lane with its task sequence cleared.
    #[must_use]
    pub fn without_tasks(mut self) -> Self {
        self.tasks.clear();
        self
    }

    pub(crate) fn rename(&mut self, name: LaneName) {
        self.name = name;
    }

    pub(crate) fn push_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub(crate) fn remove_task(&mut self, id: &TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id() == id)?;
        Some(self.tasks.remove(index))
    }

    /// Replaces a held task in place, returning `false` when it is absent.
    pub(crate) fn replace_task(&mut self, task: Task) -> bool {
        let Some(slot) = self.tasks.iter_mut().find(|held| held.id() == task.id()) else {
            return false;
        };
        *slot = task;
        true
    }

    pub(crate) fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == id)
    }

    /// Position one past the highest task position in this lane.
    pub(crate) fn next_task_position(&self) -> i64 {
        self.tasks
            .iter()
            .map(Task::position)
            .max()
            .map_or(0, |highest| highest.saturating_add(1))
    }

    pub(crate) fn sort_tasks(&mut self) {
        self.tasks.sort_by_key(Task::position);
    }
}
