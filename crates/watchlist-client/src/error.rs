use thiserror::Error;

/// Failure taxonomy of the remote watchlist store. Callers branch on the
/// first three variants; everything else is transient and surfaced as a
/// "try again" notice.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No session token locally, or the server rejected the credential.
    /// Mutations must short-circuit on this before any request is issued.
    #[error("not signed in")]
    Unauthenticated,

    /// The server already holds an entry for this content.
    #[error("content is already in the watchlist")]
    DuplicateEntry,

    /// The mutation target no longer exists.
    #[error("watchlist entry not found")]
    NotFound,

    /// Any other non-success response from the server.
    #[error("server error {status}: {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure, including the bounded request timeout.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a body this client cannot decode.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl StoreError {
    /// True when retrying without user intervention could help; used only
    /// to pick the user-facing wording, never for automatic retries.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Api { .. } | StoreError::Network(_) | StoreError::Decode(_))
    }
}
