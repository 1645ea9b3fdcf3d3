use color_eyre::Result;
use watchlist_client::{StoreError, WatchlistStore};
use watchlist_core::{completion_rate, recent};

use crate::commands::{store_failure, SIGN_IN_PROMPT};
use crate::context::AppContext;
use crate::output::{Output, OutputFormat};
use crate::views;

const RECENT_LIMIT: usize = 5;

/// Read-only stats panel: per-status counts, total tracked, completion
/// rate, and the most recently updated entries.
pub async fn run_stats(ctx: &AppContext, output: &Output) -> Result<()> {
    if !ctx.is_signed_in() {
        output.warn(SIGN_IN_PROMPT);
        return Ok(());
    }
    let client = ctx.client()?;

    let spinner = views::request_spinner("Fetching your stats...");
    let result = client.stats().await;
    views::finish_spinner(spinner);

    let mut stats = match result {
        Ok(stats) => stats,
        Err(StoreError::Unauthenticated) => {
            output.warn(SIGN_IN_PROMPT);
            return Ok(());
        }
        Err(e) => return Err(store_failure("Fetching the stats", e)),
    };

    let rate = completion_rate(&stats.status_counts);
    stats.recent_activity = recent(&stats.recent_activity, RECENT_LIMIT);

    if output.format() != OutputFormat::Human {
        let mut value = serde_json::to_value(&stats)?;
        value["completion_rate"] = serde_json::json!(rate);
        output.json(&value);
        return Ok(());
    }

    if stats.total_content == 0 {
        output.println(views::EMPTY_STATS_MESSAGE);
        return Ok(());
    }

    for line in views::stats_lines(&stats, rate) {
        output.println(line);
    }

    Ok(())
}
