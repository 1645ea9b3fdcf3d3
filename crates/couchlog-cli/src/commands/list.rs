use color_eyre::Result;
use watchlist_client::{StoreError, WatchlistStore};
use watchlist_models::WatchStatus;

use crate::commands::{store_failure, SIGN_IN_PROMPT};
use crate::context::AppContext;
use crate::output::{Output, OutputFormat};
use crate::views;

/// The list manager: filter tabs with live counts over the whole
/// collection, one page of entry cards, and a pagination footer. Every
/// invocation is a full re-fetch of the requested page.
pub async fn run_list(
    ctx: &AppContext,
    filter: Option<WatchStatus>,
    page: u32,
    output: &Output,
) -> Result<()> {
    if !ctx.is_signed_in() {
        output.warn(SIGN_IN_PROMPT);
        return Ok(());
    }
    let client = ctx.client()?;
    let page = page.max(1);
    let page_size = ctx.page_size();

    let spinner = views::request_spinner("Fetching your watchlist...");
    let result = client.list_entries(filter, page, page_size).await;
    views::finish_spinner(spinner);

    let listing = match result {
        Ok(listing) => listing,
        Err(StoreError::Unauthenticated) => {
            output.warn(SIGN_IN_PROMPT);
            return Ok(());
        }
        Err(e) => return Err(store_failure("Fetching the watchlist", e)),
    };

    if output.format() != OutputFormat::Human {
        output.json(&serde_json::to_value(&listing)?);
        return Ok(());
    }

    output.println(views::tab_bar(filter, &listing.status_counts));
    output.println("");

    if listing.items.is_empty() {
        if listing.status_counts.total() == 0 {
            output.println(views::EMPTY_LIST_MESSAGE);
        } else if listing.total == 0 {
            output.println("Nothing under this tab. Try another status filter.");
        } else {
            output.println(format!(
                "Nothing on page {}. {}",
                page,
                views::pagination_line(page, listing.page_count(page_size))
            ));
        }
        return Ok(());
    }

    output.println(views::entry_table(&listing.items).to_string());
    output.println(views::pagination_line(page, listing.page_count(page_size)));

    Ok(())
}
