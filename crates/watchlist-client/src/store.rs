use async_trait::async_trait;
use serde::Serialize;
use watchlist_models::{WatchStatus, WatchlistEntry, WatchlistPage, WatchlistStats};

use crate::error::StoreError;

/// Partial update for `PUT /watchlist/{id}`. Fields left as `None` are
/// omitted from the request body and the server keeps their prior value.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct EntryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WatchStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
}

impl EntryUpdate {
    pub fn status(status: WatchStatus) -> Self {
        Self {
            status: Some(status),
            progress: None,
        }
    }

    pub fn progress(progress: u32) -> Self {
        Self {
            status: None,
            progress: Some(progress),
        }
    }
}

/// The seam between views/controller and the remote watchlist resource.
/// The HTTP client implements this; tests substitute an in-memory store.
#[async_trait]
pub trait WatchlistStore: Send + Sync {
    /// One page of entries. `status_counts` in the result always covers
    /// the unfiltered collection regardless of the active filter.
    async fn list_entries(
        &self,
        filter: Option<WatchStatus>,
        page: u32,
        page_size: u32,
    ) -> Result<WatchlistPage, StoreError>;

    /// Membership lookup for a single content item. The remote resource
    /// has no dedicated endpoint for this, so implementations scan the
    /// listing; O(n) in the collection size, not for tight loops.
    async fn find_entry_by_content(
        &self,
        content_id: &str,
    ) -> Result<Option<WatchlistEntry>, StoreError>;

    async fn create_entry(
        &self,
        content_id: &str,
        status: WatchStatus,
        total_episodes: Option<u32>,
    ) -> Result<WatchlistEntry, StoreError>;

    async fn update_entry(
        &self,
        entry_id: &str,
        update: &EntryUpdate,
    ) -> Result<WatchlistEntry, StoreError>;

    /// Raw delete. `NotFound` propagates here; the controller decides
    /// that a second delete of the same id still counts as success.
    async fn delete_entry(&self, entry_id: &str) -> Result<(), StoreError>;

    async fn stats(&self) -> Result<WatchlistStats, StoreError>;
}
