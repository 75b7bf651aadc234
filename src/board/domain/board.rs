//! Board aggregate root and the patch operations applied to it.
//!
//! Patches are only applied after the board service confirms a mutation, so
//! every method here takes the service's canonical entity as input.

use super::{BoardDomainError, BoardId, Lane, LaneId, LaneName, Task, TaskId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The full collection of lanes and their tasks for one workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    id: BoardId,
    #[serde(default)]
    lanes: Vec<Lane>,
}

impl Board {
    /// Creates a board from its lanes, kept in the given order.
    #[must_use]
    pub const fn new(id: BoardId, lanes: Vec<Lane>) -> Self {
        Self { id, lanes }
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> &BoardId {
        &self.id
    }

    /// Returns the lanes in display order.
    #[must_use]
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// Returns the lane with the given identifier.
    #[must_use]
    pub fn lane(&self, id: &LaneId) -> Option<&Lane> {
        self.lanes.iter().find(|lane| lane.id() == id)
    }

    /// Returns the task with the given identifier from whichever lane holds it.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.lanes.iter().find_map(|lane| lane.task(id))
    }

    /// Returns the lane currently holding the given task.
    #[must_use]
    pub fn lane_of(&self, id: &TaskId) -> Option<&Lane> {
        self.lanes.iter().find(|lane| lane.contains_task(id))
    }

    /// Returns the number of tasks across all lanes.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.lanes.iter().map(|lane| lane.tasks().len()).sum()
    }

    /// Checks that names and titles are not blank, that identifiers and
    /// positions are unique, and that every task is held by the lane it
    /// references.
    ///
    /// # Errors
    ///
    /// Returns the first [`BoardDomainError`] invariant violation found.
    pub fn check_invariants(&self) -> Result<(), BoardDomainError> {
        let mut lane_ids = HashSet::new();
        let mut lane_positions = HashSet::new();
        let mut task_ids = HashSet::new();

        for lane in &self.lanes {
            if lane.name().as_str().trim().is_empty() {
                return Err(BoardDomainError::EmptyLaneName);
            }
            if !lane_ids.insert(lane.id()) {
                return Err(BoardDomainError::DuplicateLane(lane.id().clone()));
            }
            if !lane_positions.insert(lane.position()) {
                return Err(BoardDomainError::DuplicateLanePosition(lane.position()));
            }

            let mut task_positions = HashSet::new();
            for task in lane.tasks() {
                if task.title().as_str().trim().is_empty() {
                    return Err(BoardDomainError::EmptyTaskTitle);
                }
                if !task_ids.insert(task.id()) {
                    return Err(BoardDomainError::DuplicateTask(task.id().clone()));
                }
                if task.lane_id() != lane.id() {
                    return Err(BoardDomainError::ForeignTask {
                        task: task.id().clone(),
                        referenced: task.lane_id().clone(),
                        holder: lane.id().clone(),
                    });
                }
                if !task_positions.insert(task.position()) {
                    return Err(BoardDomainError::DuplicateTaskPosition {
                        lane: lane.id().clone(),
                        position: task.position(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Orders lanes by position and each lane's tasks by position.
    ///
    /// The sort is stable, so entries sharing a position keep their relative
    /// order.
    pub fn sort_by_position(&mut self) {
        self.lanes.sort_by_key(Lane::position);
        for lane in &mut self.lanes {
            lane.sort_tasks();
        }
    }

    pub(crate) fn lane_mut(&mut self, id: &LaneId) -> Option<&mut Lane> {
        self.lanes.iter_mut().find(|lane| lane.id() == id)
    }

    pub(crate) fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.lanes.iter_mut().find_map(|lane| lane.task_mut(id))
    }

    /// Position one past the highest lane position.
    pub(crate) fn next_lane_position(&self) -> i64 {
        self.lanes
            .iter()
            .map(Lane::position)
            .max()
            .map_or(0, |highest| highest.saturating_add(1))
    }

    /// Appends a task to the end of the lane it references.
    ///
    /// Returns `false` when that lane is not on the board.
    pub(crate) fn append_task(&mut self, task: Task) -> bool {
        let Some(lane) = self.lane_mut(task.lane_id()) else {
            return false;
        };
        lane.push_task(task);
        true
    }

    /// Replaces the title and description of a task the board holds,
    /// leaving it where it is.
    ///
    /// Returns `false` when the board does not hold the task.
    pub(crate) fn patch_task_content(&mut self, task: &Task) -> bool {
        let Some(held) = self.task_mut(task.id()) else {
            return false;
        };
        held.set_content(task.title().clone(), task.description().to_owned());
        true
    }

    /// Replaces a task the board already holds. The entry is swapped in place
    /// when its lane is unchanged and moved to the end of its new lane
    /// otherwise.
    ///
    /// Returns `false`, leaving the board untouched, when the task is not held.
    pub(crate) fn replace_task(&mut self, task: Task) -> bool {
        let Some(holder) = self.lane_of(task.id()).map(|lane| lane.id().clone()) else {
            return false;
        };
        if &holder != task.lane_id() {
            return self.relocate_task(task);
        }
        self.lane_mut(&holder)
            .is_some_and(|lane| lane.replace_task(task))
    }

    /// Moves a task the board holds to the end of the lane it references.
    ///
    /// Returns `false`, leaving the board untouched, when the task is not held
    /// or the lane it references is missing.
    pub(crate) fn relocate_task(&mut self, task: Task) -> bool {
        if self.lane(task.lane_id()).is_none() || self.remove_task(task.id()).is_none() {
            return false;
        }
        self.append_task(task)
    }

    /// Removes a task from whichever lane holds it.
    pub(crate) fn remove_task(&mut self, id: &TaskId) -> Option<Task> {
        self.lanes
            .iter_mut()
            .find_map(|lane| lane.remove_task(id))
    }

    pub(crate) fn push_lane(&mut self, lane: Lane) {
        self.lanes.push(lane);
    }

    /// Renames a lane in place, leaving its tasks untouched.
    pub(crate) fn rename_lane(&mut self, id: &LaneId, name: LaneName) -> bool {
        let Some(lane) = self.lane_mut(id) else {
            return false;
        };
        lane.rename(name);
        true
    }

    pub(crate) fn remove_lane(&mut self, id: &LaneId) -> Option<Lane> {
        let index = self.lanes.iter().position(|lane| lane.id() == id)?;
        Some(self.lanes.remove(index))
    }
}
