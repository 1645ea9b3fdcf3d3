use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::ContentSummary;
use crate::status::WatchStatus;

/// One user's tracking record for one content item. The server owns the
/// canonical collection; `id` and `updated_at` are assigned remotely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistEntry {
    pub id: String,
    pub content_id: String,
    pub status: WatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_episodes: Option<u32>,
    #[serde(alias = "updated_date")]
    pub updated_at: DateTime<Utc>,
    /// Embedded content card, present on list and stats payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentSummary>,
}

impl WatchlistEntry {
    /// Progress as `(consumed, total)`, only when both sides are known.
    /// Views render nothing otherwise.
    pub fn progress_fraction(&self) -> Option<(u32, u32)> {
        match (self.progress, self.total_episodes) {
            (Some(p), Some(t)) if t > 0 => Some((p, t)),
            _ => None,
        }
    }

    pub fn title(&self) -> &str {
        self.content
            .as_ref()
            .map(|c| c.title.as_str())
            .unwrap_or(self.content_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_without_optional_fields() {
        let json = r#"{
            "id": "e1",
            "content_id": "c1",
            "status": "want_to_watch",
            "updated_at": "2025-04-01T12:00:00Z"
        }"#;
        let entry: WatchlistEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.status, WatchStatus::WantToWatch);
        assert_eq!(entry.progress, None);
        assert_eq!(entry.total_episodes, None);
        assert_eq!(entry.progress_fraction(), None);
        assert_eq!(entry.title(), "c1");
    }

    #[test]
    fn test_accepts_legacy_updated_date_key() {
        let json = r#"{
            "id": "e1",
            "content_id": "c1",
            "status": "completed",
            "updated_date": "2025-04-01T12:00:00Z"
        }"#;
        let entry: WatchlistEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.status, WatchStatus::Completed);
    }

    #[test]
    fn test_progress_fraction_needs_both_sides() {
        let json = r#"{
            "id": "e1",
            "content_id": "c1",
            "status": "watching",
            "progress": 5,
            "total_episodes": 12,
            "updated_at": "2025-04-01T12:00:00Z"
        }"#;
        let mut entry: WatchlistEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.progress_fraction(), Some((5, 12)));

        entry.total_episodes = None;
        assert_eq!(entry.progress_fraction(), None);
    }
}
