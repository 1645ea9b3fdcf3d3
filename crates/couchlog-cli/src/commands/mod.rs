pub mod item;
pub mod list;
pub mod manage;
pub mod session;
pub mod stats;

use watchlist_client::StoreError;

pub(crate) const SIGN_IN_PROMPT: &str =
    "Please sign in to use your watchlist: couchlog login";

/// Wrap a store failure into the user-facing transient message. The
/// taxonomy variants the caller wants to handle (Unauthenticated,
/// DuplicateEntry, NotFound) should be matched before reaching this.
pub(crate) fn store_failure(what: &str, e: StoreError) -> color_eyre::Report {
    tracing::debug!(error = %e, "{} failed", what);
    if e.is_transient() {
        color_eyre::eyre::eyre!("{} failed: {}, please try again", what, e)
    } else {
        color_eyre::eyre::eyre!("{} failed: {}", what, e)
    }
}
