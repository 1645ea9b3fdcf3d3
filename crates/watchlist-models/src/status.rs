use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tracking status of a watchlist entry. The server accepts exactly these
/// four values; anything else must fail at the deserialization boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WatchStatus {
    /// Saved for later
    WantToWatch,
    /// Currently watching
    Watching,
    /// Finished
    Completed,
    /// Stopped watching
    Dropped,
}

impl WatchStatus {
    /// All statuses in the order the status menu and filter tabs list them.
    pub fn all() -> [WatchStatus; 4] {
        [
            WatchStatus::WantToWatch,
            WatchStatus::Watching,
            WatchStatus::Completed,
            WatchStatus::Dropped,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            WatchStatus::WantToWatch => "Want to Watch",
            WatchStatus::Watching => "Watching",
            WatchStatus::Completed => "Completed",
            WatchStatus::Dropped => "Dropped",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WatchStatus::WantToWatch => "📌",
            WatchStatus::Watching => "▶",
            WatchStatus::Completed => "✅",
            WatchStatus::Dropped => "✖",
        }
    }

    /// Wire value as the server spells it (snake_case).
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchStatus::WantToWatch => "want_to_watch",
            WatchStatus::Watching => "watching",
            WatchStatus::Completed => "completed",
            WatchStatus::Dropped => "dropped",
        }
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "want_to_watch" => Ok(WatchStatus::WantToWatch),
            "watching" => Ok(WatchStatus::Watching),
            "completed" => Ok(WatchStatus::Completed),
            "dropped" => Ok(WatchStatus::Dropped),
            other => Err(format!(
                "unknown status '{}' (expected want_to_watch, watching, completed, or dropped)",
                other
            )),
        }
    }
}
