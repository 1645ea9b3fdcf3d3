use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use watchlist_models::{WatchStatus, WatchlistEntry, WatchlistPage, WatchlistStats};

use crate::api;
use crate::error::StoreError;
use crate::store::{EntryUpdate, WatchlistStore};

/// Page size used when scanning the collection for a single content id.
/// Larger than the UI page so the scan settles in few round trips.
const SCAN_PAGE_SIZE: u32 = 100;

/// HTTP implementation of the watchlist store. Holds the bearer token of
/// the signed-in session; with no token every operation short-circuits
/// locally with `Unauthenticated` before a request is issued.
#[derive(Clone)]
pub struct HttpWatchlistClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpWatchlistClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: trim_trailing_slash(base_url.into()),
            token: None,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn token(&self) -> Result<&str, StoreError> {
        self.token.as_deref().ok_or(StoreError::Unauthenticated)
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[async_trait]
impl WatchlistStore for HttpWatchlistClient {
    async fn list_entries(
        &self,
        filter: Option<WatchStatus>,
        page: u32,
        page_size: u32,
    ) -> Result<WatchlistPage, StoreError> {
        let token = self.token()?;
        api::list_entries(&self.client, &self.base_url, token, filter, page, page_size).await
    }

    async fn find_entry_by_content(
        &self,
        content_id: &str,
    ) -> Result<Option<WatchlistEntry>, StoreError> {
        let token = self.token()?;

        // No lookup endpoint on the remote resource: walk the unfiltered
        // listing until the id shows up or the collection is exhausted.
        let mut page = 1;
        let mut seen: u64 = 0;
        loop {
            let result = api::list_entries(
                &self.client,
                &self.base_url,
                token,
                None,
                page,
                SCAN_PAGE_SIZE,
            )
            .await?;

            if let Some(entry) = result.items.iter().find(|e| e.content_id == content_id) {
                return Ok(Some(entry.clone()));
            }

            seen += result.items.len() as u64;
            if result.items.is_empty() || seen >= result.total {
                debug!(content_id, seen, "content not tracked");
                return Ok(None);
            }
            page += 1;
        }
    }

    async fn create_entry(
        &self,
        content_id: &str,
        status: WatchStatus,
        total_episodes: Option<u32>,
    ) -> Result<WatchlistEntry, StoreError> {
        let token = self.token()?;
        api::create_entry(
            &self.client,
            &self.base_url,
            token,
            content_id,
            status,
            total_episodes,
        )
        .await
    }

    async fn update_entry(
        &self,
        entry_id: &str,
        update: &EntryUpdate,
    ) -> Result<WatchlistEntry, StoreError> {
        let token = self.token()?;
        api::update_entry(&self.client, &self.base_url, token, entry_id, update).await
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<(), StoreError> {
        let token = self.token()?;
        api::delete_entry(&self.client, &self.base_url, token, entry_id).await
    }

    async fn stats(&self) -> Result<WatchlistStats, StoreError> {
        let token = self.token()?;
        api::get_stats(&self.client, &self.base_url, token).await
    }
}
