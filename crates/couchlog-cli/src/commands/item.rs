use color_eyre::Result;
use dialoguer::Select;
use serde_json::json;
use std::io::IsTerminal;
use watchlist_client::StoreError;
use watchlist_core::{menu_entries, ActionOutcome, TrackingState};

use crate::commands::{store_failure, SIGN_IN_PROMPT};
use crate::context::AppContext;
use crate::output::{Output, OutputFormat};
use crate::views;

/// The compact per-item control: membership line, and with `--menu` the
/// status picker (all four statuses, current one marked, plus removal).
pub async fn run_item(
    ctx: &AppContext,
    content_id: &str,
    menu: bool,
    output: &Output,
) -> Result<()> {
    let controller = ctx.controller()?;

    // A signed-out user just sees the untracked state, the way the site
    // shows the plain "Add to List" button without a session.
    let entry = if ctx.is_signed_in() {
        let spinner = views::request_spinner("Checking your watchlist...");
        let result = controller.entry_of(content_id).await;
        views::finish_spinner(spinner);
        match result {
            Ok(entry) => entry,
            Err(StoreError::Unauthenticated) => None,
            Err(e) => return Err(store_failure("Checking the watchlist", e)),
        }
    } else {
        None
    };
    let state = TrackingState::from_entry(entry.as_ref());

    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "content_id": content_id,
            "tracked": state.is_tracked(),
            "status": state.status().map(|s| s.as_str()),
            "progress": entry.as_ref().and_then(|e| e.progress),
            "total_episodes": entry.as_ref().and_then(|e| e.total_episodes),
        }));
        return Ok(());
    }

    output.println(format!(
        "{}: {}",
        content_id,
        views::state_line(&state, entry.as_ref())
    ));

    if !menu {
        return Ok(());
    }
    if !ctx.is_signed_in() {
        output.warn(SIGN_IN_PROMPT);
        return Ok(());
    }
    if !std::io::stdin().is_terminal() {
        output.warn("The status menu needs an interactive terminal");
        return Ok(());
    }

    let entries = menu_entries(state, entry.as_ref().and_then(|e| e.total_episodes));
    let labels: Vec<String> = entries
        .iter()
        .map(|e| {
            if e.current {
                format!("{} ✓", e.label)
            } else {
                e.label.clone()
            }
        })
        .collect();
    let default = entries.iter().position(|e| e.current).unwrap_or(0);

    let picked = Select::new()
        .with_prompt("Set status")
        .items(&labels)
        .default(default)
        .interact_opt()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))?;

    let Some(index) = picked else {
        output.info("Cancelled");
        return Ok(());
    };
    let action = entries[index].action.clone();

    let spinner = views::request_spinner("Updating your watchlist...");
    let outcome = controller.apply(content_id, action).await;
    views::finish_spinner(spinner);

    match outcome {
        Ok(ActionOutcome::SignInRequired) => {
            output.warn(SIGN_IN_PROMPT);
            return Ok(());
        }
        Ok(ActionOutcome::AlreadyTracked(existing)) => {
            output.warn(format!(
                "Already in your watchlist as {}",
                existing.status.label()
            ));
        }
        Ok(ActionOutcome::Applied(_)) => {}
        Err(e) => return Err(store_failure("Updating the watchlist", e)),
    }

    // Re-check membership for this content id only; other views re-fetch
    // on their own next run.
    let refreshed = controller
        .entry_of(content_id)
        .await
        .map_err(|e| store_failure("Refreshing the item", e))?;
    let state = TrackingState::from_entry(refreshed.as_ref());
    output.success(format!(
        "{}: {}",
        content_id,
        views::state_line(&state, refreshed.as_ref())
    ));

    Ok(())
}
