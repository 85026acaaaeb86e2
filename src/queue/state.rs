//! The persisted shape of a queue.

use serde::{Deserialize, Serialize};

use crate::library::Track;

/// Sentinel stored in `current_index` when nothing is current.
pub(crate) const NO_CURRENT: i64 = -1;

/// Snapshot written to `queue_state.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueState {
    pub tracks: Vec<Track>,
    pub current_index: i64,
    pub is_shuffled: bool,
    pub is_repeat: bool,
    pub is_playing: bool,
    pub original_order: Vec<Track>,
}

impl QueueState {
    /// The current position, if it points inside `tracks`.
    pub(crate) fn current(&self) -> Option<usize> {
        usize::try_from(self.current_index)
            .ok()
            .filter(|&i| i < self.tracks.len())
    }

    pub(crate) fn encode_current(current: Option<usize>) -> i64 {
        current
            .and_then(|i| i64::try_from(i).ok())
            .unwrap_or(NO_CURRENT)
    }
}
