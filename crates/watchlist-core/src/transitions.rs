use watchlist_models::{WatchStatus, WatchlistEntry};

/// Client-side view of one content item's tracking lifecycle. There is no
/// terminal state: completed and dropped entries stay editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    NotTracked,
    Tracked(WatchStatus),
}

impl TrackingState {
    pub fn from_entry(entry: Option<&WatchlistEntry>) -> Self {
        match entry {
            Some(e) => TrackingState::Tracked(e.status),
            None => TrackingState::NotTracked,
        }
    }

    pub fn is_tracked(&self) -> bool {
        matches!(self, TrackingState::Tracked(_))
    }

    pub fn status(&self) -> Option<WatchStatus> {
        match self {
            TrackingState::Tracked(status) => Some(*status),
            TrackingState::NotTracked => None,
        }
    }
}

/// A user intent against one content item, translated by the controller
/// into store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryAction {
    Add {
        status: WatchStatus,
        total_episodes: Option<u32>,
    },
    SetStatus(WatchStatus),
    SetProgress(u32),
    Remove,
}

/// One row of the compact control's status menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub action: EntryAction,
    pub label: String,
    /// Marks the row carrying the entry's current status.
    pub current: bool,
}

/// Build the status menu for the current state: all four statuses are
/// always selectable, plus "Remove from List" once tracked. Whether a
/// status pick creates or updates depends only on the current state.
pub fn menu_entries(state: TrackingState, total_episodes: Option<u32>) -> Vec<MenuEntry> {
    let mut entries: Vec<MenuEntry> = WatchStatus::all()
        .into_iter()
        .map(|status| {
            let action = if state.is_tracked() {
                EntryAction::SetStatus(status)
            } else {
                EntryAction::Add {
                    status,
                    total_episodes,
                }
            };
            MenuEntry {
                action,
                label: format!("{} {}", status.icon(), status.label()),
                current: state.status() == Some(status),
            }
        })
        .collect();

    if state.is_tracked() {
        entries.push(MenuEntry {
            action: EntryAction::Remove,
            label: "🗑 Remove from List".to_string(),
            current: false,
        });
    }

    entries
}

/// Contextual shortcuts the list manager offers per card. These are
/// conveniences layered over the general menu, not the only transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    StartWatching,
    MarkComplete,
    EditProgress,
    Remove,
}

impl QuickAction {
    pub fn label(&self) -> &'static str {
        match self {
            QuickAction::StartWatching => "Start Watching",
            QuickAction::MarkComplete => "Mark Complete",
            QuickAction::EditProgress => "Set Episode Progress",
            QuickAction::Remove => "Remove",
        }
    }
}

pub fn quick_actions(entry: &WatchlistEntry) -> Vec<QuickAction> {
    let mut actions = Vec::new();
    match entry.status {
        WatchStatus::WantToWatch => actions.push(QuickAction::StartWatching),
        WatchStatus::Watching => {
            actions.push(QuickAction::MarkComplete);
            if entry.total_episodes.is_some() {
                actions.push(QuickAction::EditProgress);
            }
        }
        WatchStatus::Completed | WatchStatus::Dropped => {}
    }
    actions.push(QuickAction::Remove);
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(status: WatchStatus, total_episodes: Option<u32>) -> WatchlistEntry {
        WatchlistEntry {
            id: "e1".to_string(),
            content_id: "c1".to_string(),
            status,
            progress: None,
            total_episodes,
            updated_at: Utc::now(),
            content: None,
        }
    }

    #[test]
    fn test_menu_for_untracked_offers_adds_only() {
        let entries = menu_entries(TrackingState::NotTracked, Some(12));
        assert_eq!(entries.len(), 4);
        assert!(entries.iter().all(|e| matches!(
            e.action,
            EntryAction::Add {
                total_episodes: Some(12),
                ..
            }
        )));
        assert!(entries.iter().all(|e| !e.current));
    }

    #[test]
    fn test_menu_for_tracked_marks_current_and_offers_remove() {
        let entries = menu_entries(TrackingState::Tracked(WatchStatus::Watching), None);
        assert_eq!(entries.len(), 5);
        let current: Vec<_> = entries.iter().filter(|e| e.current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(
            current[0].action,
            EntryAction::SetStatus(WatchStatus::Watching)
        );
        assert_eq!(entries.last().unwrap().action, EntryAction::Remove);
    }

    #[test]
    fn test_quick_actions_want_to_watch() {
        let actions = quick_actions(&entry(WatchStatus::WantToWatch, Some(12)));
        assert_eq!(actions, vec![QuickAction::StartWatching, QuickAction::Remove]);
    }

    #[test]
    fn test_quick_actions_watching_with_known_episodes() {
        let actions = quick_actions(&entry(WatchStatus::Watching, Some(12)));
        assert_eq!(
            actions,
            vec![
                QuickAction::MarkComplete,
                QuickAction::EditProgress,
                QuickAction::Remove
            ]
        );
    }

    #[test]
    fn test_quick_actions_watching_without_episode_count() {
        let actions = quick_actions(&entry(WatchStatus::Watching, None));
        assert_eq!(actions, vec![QuickAction::MarkComplete, QuickAction::Remove]);
    }

    #[test]
    fn test_quick_actions_completed_and_dropped_keep_remove() {
        for status in [WatchStatus::Completed, WatchStatus::Dropped] {
            let actions = quick_actions(&entry(status, None));
            assert_eq!(actions, vec![QuickAction::Remove]);
        }
    }
}
