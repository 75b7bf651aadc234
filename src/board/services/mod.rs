//! Application services for board synchronization.

mod state;
mod synchronizer;

pub use state::SyncState;
pub use synchronizer::{BoardSynchronizer, SyncError, SyncResult};
