//! Domain model for the task board.
//!
//! Boards own lanes, lanes own ordered tasks. Identifiers are assigned by the
//! board service and never change once assigned; the domain keeps no
//! infrastructure concerns.

mod board;
mod error;
mod ids;
mod lane;
mod task;

pub use board::Board;
pub use error::BoardDomainError;
pub use ids::{BoardId, LaneId, LaneName, TaskId, TaskTitle};
pub use lane::Lane;
pub use task::{Task, TaskData};
