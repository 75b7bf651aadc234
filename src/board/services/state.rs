//! Observable state owned by a board synchronizer.

use crate::board::domain::Board;

/// Snapshot, loading flag and error slot published by a synchronizer.
///
/// Views read this value; only the owning synchronizer changes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncState {
    pub(crate) snapshot: Option<Board>,
    pub(crate) pending_loads: usize,
    pub(crate) last_error: Option<String>,
}

impl SyncState {
    /// Returns the last board confirmed by the service, if one was loaded.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&Board> {
        self.snapshot.as_ref()
    }

    /// Returns whether a board fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending_loads > 0
    }

    /// Returns the message of the most recent failure, until cleared.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
