use serde::{Deserialize, Serialize};

use crate::entry::WatchlistEntry;
use crate::page::StatusCounts;

/// Aggregate view of the user's watchlist from `GET /watchlist/stats`.
/// `recent_activity` carries entries with embedded content, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistStats {
    pub status_counts: StatusCounts,
    pub total_content: u64,
    #[serde(default)]
    pub recent_activity: Vec<WatchlistEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_without_recent_activity() {
        let json = r#"{
            "status_counts": {"want_to_watch": 1, "watching": 0, "completed": 2, "dropped": 0},
            "total_content": 3
        }"#;
        let stats: WatchlistStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_content, 3);
        assert_eq!(stats.status_counts.total(), stats.total_content);
        assert!(stats.recent_activity.is_empty());
    }
}
