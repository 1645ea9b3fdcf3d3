use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;
use watchlist_core::{quick_actions, TrackingState};
use watchlist_models::{StatusCounts, WatchStatus, WatchlistEntry, WatchlistStats};

/// Filter tab bar over the unfiltered counts, the active tab bracketed.
/// Counts come from the full collection, so they hold steady while the
/// user flips between tabs.
pub fn tab_bar(active: Option<WatchStatus>, counts: &StatusCounts) -> String {
    let mut tabs = Vec::with_capacity(5);
    let all = format!("All ({})", counts.total());
    tabs.push(if active.is_none() {
        format!("[{}]", all)
    } else {
        all
    });
    for status in WatchStatus::all() {
        let tab = format!("{} ({})", status.label(), counts.get(status));
        tabs.push(if active == Some(status) {
            format!("[{}]", tab)
        } else {
            tab
        });
    }
    tabs.join("  ")
}

/// One line describing a single item's tracking state, for the compact
/// control.
pub fn state_line(state: &TrackingState, entry: Option<&WatchlistEntry>) -> String {
    match state {
        TrackingState::NotTracked => "Not in your list".to_string(),
        TrackingState::Tracked(status) => {
            let mut line = format!("{} {}", status.icon(), status.label());
            if let Some((p, t)) = entry.and_then(|e| e.progress_fraction()) {
                line.push_str(&format!("  {}/{} episodes", p, t));
            }
            line
        }
    }
}

pub fn progress_cell(entry: &WatchlistEntry) -> String {
    match entry.progress_fraction() {
        Some((p, t)) => format!("{}/{}", p, t),
        None => "-".to_string(),
    }
}

/// The list manager's card grid as a table: one row per entry with its
/// content card data and the quick actions valid for its status.
pub fn entry_table(entries: &[WatchlistEntry]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Title", "Year", "Type", "Status", "Progress", "Actions"]);

    for entry in entries {
        let (year, content_type) = match &entry.content {
            Some(c) => (
                c.year.map(|y| y.to_string()).unwrap_or_default(),
                c.content_type.map(|t| t.label().to_string()).unwrap_or_default(),
            ),
            None => (String::new(), String::new()),
        };
        let actions = quick_actions(entry)
            .iter()
            .map(|a| a.label())
            .collect::<Vec<_>>()
            .join(" · ");

        table.add_row(vec![
            Cell::new(entry.title()),
            Cell::new(year),
            Cell::new(content_type),
            Cell::new(format!("{} {}", entry.status.icon(), entry.status.label())),
            Cell::new(progress_cell(entry)),
            Cell::new(actions),
        ]);
    }

    table
}

pub fn pagination_line(page: u32, page_count: u32) -> String {
    format!("Page {} of {}", page, page_count)
}

pub const EMPTY_LIST_MESSAGE: &str =
    "Your watchlist is empty. Add some content to start tracking your viewing progress.";

pub const EMPTY_STATS_MESSAGE: &str =
    "Nothing tracked yet. Stats appear once your watchlist has entries.";

/// The stats panel as plain lines: count grid, totals, completion rate,
/// and recent activity.
pub fn stats_lines(stats: &WatchlistStats, completion_rate: u8) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Watchlist Overview".to_string());
    for status in WatchStatus::all() {
        lines.push(format!(
            "  {} {:<14} {}",
            status.icon(),
            status.label(),
            stats.status_counts.get(status)
        ));
    }
    lines.push(String::new());
    lines.push(format!("  Total tracked:    {}", stats.total_content));
    lines.push(format!("  Completion rate:  {}%", completion_rate));

    if !stats.recent_activity.is_empty() {
        lines.push(String::new());
        lines.push("Recent Activity".to_string());
        for entry in &stats.recent_activity {
            let mut line = format!(
                "  {} {}  {}",
                entry.status.icon(),
                entry.title(),
                entry.updated_at.format("%Y-%m-%d")
            );
            if let Some((p, t)) = entry.progress_fraction() {
                line.push_str(&format!("  ({}/{} eps)", p, t));
            }
            lines.push(line);
        }
    }

    lines
}

/// Spinner shown while a request is in flight, only on an interactive
/// terminal; non-interactive runs rely on structured logging instead.
pub fn request_spinner(msg: &str) -> Option<ProgressBar> {
    if !std::io::stderr().is_terminal() {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

pub fn finish_spinner(spinner: Option<ProgressBar>) {
    if let Some(s) = spinner {
        s.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use watchlist_models::ContentSummary;

    fn entry(status: WatchStatus, progress: Option<u32>, total: Option<u32>) -> WatchlistEntry {
        WatchlistEntry {
            id: "e1".to_string(),
            content_id: "c1".to_string(),
            status,
            progress,
            total_episodes: total,
            updated_at: Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap(),
            content: Some(ContentSummary {
                id: "c1".to_string(),
                title: "Signal".to_string(),
                year: Some(2016),
                content_type: None,
                episodes: total,
                rating: Some(9.1),
                country: Some("KR".to_string()),
                poster_url: None,
            }),
        }
    }

    #[test]
    fn test_tab_bar_counts_are_unfiltered() {
        let counts = StatusCounts {
            want_to_watch: 2,
            watching: 1,
            completed: 3,
            dropped: 0,
        };
        let bar = tab_bar(Some(WatchStatus::Watching), &counts);
        assert!(bar.contains("All (6)"));
        assert!(bar.contains("[Watching (1)]"));
        assert!(bar.contains("Want to Watch (2)"));
        assert!(bar.contains("Dropped (0)"));
    }

    #[test]
    fn test_tab_bar_marks_all_when_unfiltered() {
        let bar = tab_bar(None, &StatusCounts::default());
        assert!(bar.starts_with("[All (0)]"));
    }

    #[test]
    fn test_state_line_shows_progress_only_when_known() {
        let e = entry(WatchStatus::Watching, Some(5), Some(12));
        let line = state_line(&TrackingState::Tracked(WatchStatus::Watching), Some(&e));
        assert!(line.contains("Watching"));
        assert!(line.contains("5/12 episodes"));

        let e = entry(WatchStatus::Watching, Some(5), None);
        let line = state_line(&TrackingState::Tracked(WatchStatus::Watching), Some(&e));
        assert!(!line.contains("5/"));

        assert_eq!(state_line(&TrackingState::NotTracked, None), "Not in your list");
    }

    #[test]
    fn test_entry_table_tolerates_missing_content_card() {
        let mut e = entry(WatchStatus::WantToWatch, None, None);
        e.content = None;
        let table = entry_table(&[e]);
        let rendered = table.to_string();
        // Falls back to the content id for the title, no panic on blanks.
        assert!(rendered.contains("c1"));
    }

    #[test]
    fn test_entry_table_shows_contextual_actions() {
        let e = entry(WatchStatus::WantToWatch, None, Some(12));
        let rendered = entry_table(&[e]).to_string();
        assert!(rendered.contains("Start Watching"));
        assert!(rendered.contains("Remove"));
        assert!(!rendered.contains("Mark Complete"));
    }

    #[test]
    fn test_stats_lines_cover_counts_and_rate() {
        let stats = WatchlistStats {
            status_counts: StatusCounts {
                want_to_watch: 1,
                watching: 0,
                completed: 1,
                dropped: 0,
            },
            total_content: 2,
            recent_activity: vec![entry(WatchStatus::Completed, Some(12), Some(12))],
        };
        let lines = stats_lines(&stats, 50);
        let text = lines.join("\n");
        assert!(text.contains("Total tracked:    2"));
        assert!(text.contains("Completion rate:  50%"));
        assert!(text.contains("Recent Activity"));
        assert!(text.contains("Signal"));
        assert!(text.contains("(12/12 eps)"));
    }

    #[test]
    fn test_stats_lines_skip_recent_when_empty() {
        let stats = WatchlistStats {
            status_counts: StatusCounts::default(),
            total_content: 0,
            recent_activity: Vec::new(),
        };
        let text = stats_lines(&stats, 0).join("\n");
        assert!(!text.contains("Recent Activity"));
    }

    #[test]
    fn test_pagination_line() {
        assert_eq!(pagination_line(2, 5), "Page 2 of 5");
    }
}
