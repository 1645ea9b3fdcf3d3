use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::debug;
use watchlist_models::{WatchStatus, WatchlistEntry, WatchlistPage, WatchlistStats};

use crate::error::StoreError;
use crate::store::EntryUpdate;

#[derive(Debug, Serialize)]
struct CreateEntryBody<'a> {
    content_id: &'a str,
    status: WatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_episodes: Option<u32>,
}

/// Map a non-success response onto the store error taxonomy. Duplicate
/// detection is endpoint-specific: the server signals a duplicate create
/// as 400, so only `create_entry` routes 400 there.
pub(crate) fn classify_status(status: StatusCode, message: String) -> StoreError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Unauthenticated,
        StatusCode::NOT_FOUND => StoreError::NotFound,
        _ => StoreError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

pub(crate) fn list_query(filter: Option<WatchStatus>, page: u32, limit: u32) -> String {
    match filter {
        Some(status) => format!("status={}&page={}&limit={}", status.as_str(), page, limit),
        None => format!("page={}&limit={}", page, limit),
    }
}

async fn error_body(response: reqwest::Response) -> (StatusCode, String) {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    (status, text)
}

/// `GET /watchlist?status=&page=&limit=`
pub async fn list_entries(
    client: &Client,
    base_url: &str,
    token: &str,
    filter: Option<WatchStatus>,
    page: u32,
    limit: u32,
) -> Result<WatchlistPage, StoreError> {
    let url = format!("{}/watchlist?{}", base_url, list_query(filter, page, limit));
    debug!(%url, "fetching watchlist page");

    let response = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", token))
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let (status, text) = error_body(response).await;
        return Err(classify_status(status, text));
    }

    response
        .json::<WatchlistPage>()
        .await
        .map_err(|e| StoreError::Decode(e.to_string()))
}

/// `POST /watchlist`. Fails with `DuplicateEntry` when the server
/// already holds an entry for this content (400 on this endpoint).
pub async fn create_entry(
    client: &Client,
    base_url: &str,
    token: &str,
    content_id: &str,
    status: WatchStatus,
    total_episodes: Option<u32>,
) -> Result<WatchlistEntry, StoreError> {
    let url = format!("{}/watchlist", base_url);
    let body = CreateEntryBody {
        content_id,
        status,
        total_episodes,
    };
    debug!(content_id, status = %status, "creating watchlist entry");

    let response = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", token))
        .header("Accept", "application/json")
        .json(&body)
        .send()
        .await?;

    if response.status() == StatusCode::BAD_REQUEST {
        let (_, text) = error_body(response).await;
        debug!(content_id, body = %text, "duplicate watchlist entry");
        return Err(StoreError::DuplicateEntry);
    }

    if !response.status().is_success() {
        let (status, text) = error_body(response).await;
        return Err(classify_status(status, text));
    }

    response
        .json::<WatchlistEntry>()
        .await
        .map_err(|e| StoreError::Decode(e.to_string()))
}

/// `PUT /watchlist/{id}`. Partial update, omitted fields unchanged.
pub async fn update_entry(
    client: &Client,
    base_url: &str,
    token: &str,
    entry_id: &str,
    update: &EntryUpdate,
) -> Result<WatchlistEntry, StoreError> {
    let url = format!("{}/watchlist/{}", base_url, urlencoding::encode(entry_id));
    debug!(entry_id, ?update, "updating watchlist entry");

    let response = client
        .put(&url)
        .header("Authorization", format!("Bearer {}", token))
        .header("Accept", "application/json")
        .json(update)
        .send()
        .await?;

    if !response.status().is_success() {
        let (status, text) = error_body(response).await;
        return Err(classify_status(status, text));
    }

    response
        .json::<WatchlistEntry>()
        .await
        .map_err(|e| StoreError::Decode(e.to_string()))
}

/// `DELETE /watchlist/{id}`. Empty success. 404 surfaces as `NotFound`
/// and the controller downgrades it to success.
pub async fn delete_entry(
    client: &Client,
    base_url: &str,
    token: &str,
    entry_id: &str,
) -> Result<(), StoreError> {
    let url = format!("{}/watchlist/{}", base_url, urlencoding::encode(entry_id));
    debug!(entry_id, "deleting watchlist entry");

    let response = client
        .delete(&url)
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await?;

    if !response.status().is_success() {
        let (status, text) = error_body(response).await;
        return Err(classify_status(status, text));
    }

    Ok(())
}

/// `GET /watchlist/stats`
pub async fn get_stats(
    client: &Client,
    base_url: &str,
    token: &str,
) -> Result<WatchlistStats, StoreError> {
    let url = format!("{}/watchlist/stats", base_url);
    debug!(%url, "fetching watchlist stats");

    let response = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", token))
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let (status, text) = error_body(response).await;
        return Err(classify_status(status, text));
    }

    response
        .json::<WatchlistStats>()
        .await
        .map_err(|e| StoreError::Decode(e.to_string()))
}
