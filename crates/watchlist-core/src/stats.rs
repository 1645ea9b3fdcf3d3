use watchlist_models::{StatusCounts, WatchlistEntry};

/// Completed share of the tracked collection as an integer percentage.
/// An empty collection reads as 0, never a division by zero.
pub fn completion_rate(counts: &StatusCounts) -> u8 {
    let total = counts.total();
    if total == 0 {
        return 0;
    }
    ((counts.completed as f64 / total as f64) * 100.0).round() as u8
}

/// The `n` most recently mutated entries, newest first. The server sends
/// `recent_activity` pre-sorted but the panel re-sorts defensively since
/// it slices the top of the list.
pub fn recent(entries: &[WatchlistEntry], n: usize) -> Vec<WatchlistEntry> {
    let mut sorted: Vec<WatchlistEntry> = entries.to_vec();
    sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    sorted.truncate(n);
    sorted
}
