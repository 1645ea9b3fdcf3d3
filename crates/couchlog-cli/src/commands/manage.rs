use color_eyre::Result;
use watchlist_client::StoreError;
use watchlist_core::{ActionOutcome, EntryAction, TrackingState};
use watchlist_models::WatchStatus;

use crate::commands::{store_failure, SIGN_IN_PROMPT};
use crate::context::AppContext;
use crate::output::Output;
use crate::views;

/// Direct mutations: add, set-status, progress, remove. Each is one
/// fire-and-confirm round trip through the transition controller.

pub async fn run_add(
    ctx: &AppContext,
    content_id: &str,
    status: WatchStatus,
    episodes: Option<u32>,
    output: &Output,
) -> Result<()> {
    if !ctx.is_signed_in() {
        output.warn(SIGN_IN_PROMPT);
        return Ok(());
    }
    let controller = ctx.controller()?;

    let spinner = views::request_spinner("Adding to your watchlist...");
    let outcome = controller
        .apply(
            content_id,
            EntryAction::Add {
                status,
                total_episodes: episodes,
            },
        )
        .await;
    views::finish_spinner(spinner);

    match outcome {
        Ok(ActionOutcome::Applied(TrackingState::Tracked(s))) => {
            output.success(format!("Added to your watchlist as {}", s.label()));
        }
        Ok(ActionOutcome::Applied(TrackingState::NotTracked)) => {
            output.warn("The entry disappeared while adding; check the list and retry");
        }
        Ok(ActionOutcome::AlreadyTracked(existing)) => {
            output.warn(format!(
                "Already in your watchlist as {}",
                existing.status.label()
            ));
        }
        Ok(ActionOutcome::SignInRequired) => output.warn(SIGN_IN_PROMPT),
        Err(e) => return Err(store_failure("Adding to the watchlist", e)),
    }

    Ok(())
}

pub async fn run_set(
    ctx: &AppContext,
    content_id: &str,
    status: WatchStatus,
    output: &Output,
) -> Result<()> {
    if !ctx.is_signed_in() {
        output.warn(SIGN_IN_PROMPT);
        return Ok(());
    }
    let controller = ctx.controller()?;

    let spinner = views::request_spinner("Updating status...");
    let outcome = controller
        .apply(content_id, EntryAction::SetStatus(status))
        .await;
    views::finish_spinner(spinner);

    match outcome {
        Ok(ActionOutcome::Applied(TrackingState::Tracked(s))) => {
            output.success(format!("Status set to {}", s.label()));
        }
        Ok(ActionOutcome::Applied(TrackingState::NotTracked)) => {
            output.warn("Not in your watchlist anymore; refresh the list");
        }
        Ok(ActionOutcome::AlreadyTracked(_)) => unreachable!("status update cannot conflict"),
        Ok(ActionOutcome::SignInRequired) => output.warn(SIGN_IN_PROMPT),
        Err(StoreError::NotFound) => {
            return Err(color_eyre::eyre::eyre!(
                "{} is not in your watchlist; add it first: couchlog add {}",
                content_id,
                content_id
            ));
        }
        Err(e) => return Err(store_failure("Updating the status", e)),
    }

    Ok(())
}

pub async fn run_progress(
    ctx: &AppContext,
    content_id: &str,
    episodes: u32,
    output: &Output,
) -> Result<()> {
    if !ctx.is_signed_in() {
        output.warn(SIGN_IN_PROMPT);
        return Ok(());
    }
    let controller = ctx.controller()?;

    // Range checking is advisory only; the server stays the authority.
    let spinner = views::request_spinner("Checking your watchlist...");
    let current = controller.entry_of(content_id).await;
    views::finish_spinner(spinner);
    match current {
        Ok(Some(entry)) => {
            if let Some(total) = entry.total_episodes {
                if episodes > total {
                    output.warn(format!(
                        "{} episodes is more than the known total of {}",
                        episodes, total
                    ));
                }
            }
        }
        Ok(None) => {
            return Err(color_eyre::eyre::eyre!(
                "{} is not in your watchlist; add it first: couchlog add {}",
                content_id,
                content_id
            ));
        }
        Err(StoreError::Unauthenticated) => {
            output.warn(SIGN_IN_PROMPT);
            return Ok(());
        }
        Err(e) => {
            return Err(store_failure("Checking the watchlist", e));
        }
    }

    let spinner = views::request_spinner("Updating progress...");
    let outcome = controller
        .apply(content_id, EntryAction::SetProgress(episodes))
        .await;
    views::finish_spinner(spinner);

    match outcome {
        Ok(ActionOutcome::Applied(_)) => {
            let refreshed = controller
                .entry_of(content_id)
                .await
                .map_err(|e| store_failure("Refreshing the item", e))?;
            match refreshed.as_ref().and_then(|e| e.progress_fraction()) {
                Some((p, t)) => output.success(format!("Progress set to {}/{} episodes", p, t)),
                None => output.success(format!("Progress set to {} episodes", episodes)),
            }
        }
        Ok(ActionOutcome::AlreadyTracked(_)) => unreachable!("progress update cannot conflict"),
        Ok(ActionOutcome::SignInRequired) => output.warn(SIGN_IN_PROMPT),
        Err(e) => return Err(store_failure("Updating the progress", e)),
    }

    Ok(())
}

pub async fn run_remove(ctx: &AppContext, content_id: &str, output: &Output) -> Result<()> {
    if !ctx.is_signed_in() {
        output.warn(SIGN_IN_PROMPT);
        return Ok(());
    }
    let controller = ctx.controller()?;

    let spinner = views::request_spinner("Removing from your watchlist...");
    let outcome = controller.apply(content_id, EntryAction::Remove).await;
    views::finish_spinner(spinner);

    match outcome {
        // Second removes land here too: already-gone reads as success.
        Ok(ActionOutcome::Applied(TrackingState::NotTracked)) => {
            output.success("Removed from your watchlist");
        }
        Ok(ActionOutcome::Applied(TrackingState::Tracked(_)))
        | Ok(ActionOutcome::AlreadyTracked(_)) => {
            unreachable!("remove cannot leave the entry tracked")
        }
        Ok(ActionOutcome::SignInRequired) => output.warn(SIGN_IN_PROMPT),
        Err(e) => return Err(store_failure("Removing from the watchlist", e)),
    }

    Ok(())
}
