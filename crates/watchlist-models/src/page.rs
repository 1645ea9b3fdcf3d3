use serde::{Deserialize, Serialize};

use crate::entry::WatchlistEntry;
use crate::status::WatchStatus;

/// One page of the watchlist listing. `status_counts` always covers the
/// full unfiltered collection so filter tabs keep stable numbers while
/// the user switches between them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistPage {
    pub items: Vec<WatchlistEntry>,
    pub total: u64,
    pub status_counts: StatusCounts,
}

impl WatchlistPage {
    pub fn page_count(&self, page_size: u32) -> u32 {
        if page_size == 0 || self.total == 0 {
            return 1;
        }
        self.total.div_ceil(page_size as u64) as u32
    }
}

/// Per-status entry counts over the whole collection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCounts {
    #[serde(default)]
    pub want_to_watch: u64,
    #[serde(default)]
    pub watching: u64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub dropped: u64,
}

impl StatusCounts {
    pub fn get(&self, status: WatchStatus) -> u64 {
        match status {
            WatchStatus::WantToWatch => self.want_to_watch,
            WatchStatus::Watching => self.watching,
            WatchStatus::Completed => self.completed,
            WatchStatus::Dropped => self.dropped,
        }
    }

    pub fn total(&self) -> u64 {
        self.want_to_watch + self.watching + self.completed + self.dropped
    }
}
