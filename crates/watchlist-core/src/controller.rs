use tracing::{debug, warn};
use watchlist_client::{EntryUpdate, StoreError, WatchlistStore};
use watchlist_models::WatchlistEntry;

use crate::transitions::{EntryAction, TrackingState};

/// What a user action amounted to once the store confirmed it.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The mutation went through; this is the resulting state.
    Applied(TrackingState),
    /// A create raced an existing entry; the store's entry is shown
    /// unmodified as the authoritative state.
    AlreadyTracked(WatchlistEntry),
    /// No valid session. Nothing was changed locally or remotely.
    SignInRequired,
}

/// Translates user actions into store operations and reconciles the
/// outcomes. All store errors are resolved or surfaced here; nothing
/// leaks into the views as a panic.
pub struct TransitionController<S: WatchlistStore> {
    store: S,
}

impl<S: WatchlistStore> TransitionController<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current tracking state for one content id, re-fetched from the
    /// store. Views call this after every action they apply.
    pub async fn state_of(&self, content_id: &str) -> Result<TrackingState, StoreError> {
        let entry = self.store.find_entry_by_content(content_id).await?;
        Ok(TrackingState::from_entry(entry.as_ref()))
    }

    pub async fn entry_of(&self, content_id: &str) -> Result<Option<WatchlistEntry>, StoreError> {
        self.store.find_entry_by_content(content_id).await
    }

    pub async fn apply(
        &self,
        content_id: &str,
        action: EntryAction,
    ) -> Result<ActionOutcome, StoreError> {
        match self.apply_inner(content_id, action).await {
            Err(StoreError::Unauthenticated) => Ok(ActionOutcome::SignInRequired),
            other => other,
        }
    }

    async fn apply_inner(
        &self,
        content_id: &str,
        action: EntryAction,
    ) -> Result<ActionOutcome, StoreError> {
        match action {
            EntryAction::Add {
                status,
                total_episodes,
            } => {
                match self
                    .store
                    .create_entry(content_id, status, total_episodes)
                    .await
                {
                    Ok(entry) => Ok(ActionOutcome::Applied(TrackingState::Tracked(entry.status))),
                    Err(StoreError::DuplicateEntry) => {
                        // The store already holds an entry for this content;
                        // re-fetch so the UI reflects its actual status.
                        match self.store.find_entry_by_content(content_id).await? {
                            Some(existing) => {
                                debug!(
                                    content_id,
                                    status = %existing.status,
                                    "create conflicted with existing entry"
                                );
                                Ok(ActionOutcome::AlreadyTracked(existing))
                            }
                            None => {
                                warn!(content_id, "duplicate reported but entry vanished");
                                Ok(ActionOutcome::Applied(TrackingState::NotTracked))
                            }
                        }
                    }
                    Err(e) => Err(e),
                }
            }

            EntryAction::SetStatus(status) => {
                let entry = self.require_entry(content_id).await?;
                let updated = self
                    .store
                    .update_entry(&entry.id, &EntryUpdate::status(status))
                    .await?;
                Ok(ActionOutcome::Applied(TrackingState::Tracked(
                    updated.status,
                )))
            }

            EntryAction::SetProgress(progress) => {
                let entry = self.require_entry(content_id).await?;
                let updated = self
                    .store
                    .update_entry(&entry.id, &EntryUpdate::progress(progress))
                    .await?;
                Ok(ActionOutcome::Applied(TrackingState::Tracked(
                    updated.status,
                )))
            }

            EntryAction::Remove => {
                let Some(entry) = self.store.find_entry_by_content(content_id).await? else {
                    // Already gone; a second remove still reads as success.
                    debug!(content_id, "remove requested for untracked content");
                    return Ok(ActionOutcome::Applied(TrackingState::NotTracked));
                };
                match self.store.delete_entry(&entry.id).await {
                    Ok(()) | Err(StoreError::NotFound) => {
                        Ok(ActionOutcome::Applied(TrackingState::NotTracked))
                    }
                    Err(e) => Err(e),
                }
            }
        }
    }

    /// Resolve the entry behind a content id for an update. A missing
    /// entry is a hard error here: the view's state is stale and must be
    /// refreshed, unlike deletes which stay idempotent.
    async fn require_entry(&self, content_id: &str) -> Result<WatchlistEntry, StoreError> {
        self.store
            .find_entry_by_content(content_id)
            .await?
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use watchlist_models::{
        StatusCounts, WatchStatus, WatchlistPage, WatchlistStats,
    };

    /// In-memory stand-in for the remote store, mirroring its semantics:
    /// one entry per content id, partial updates, full-collection counts.
    struct InMemoryStore {
        entries: Mutex<Vec<WatchlistEntry>>,
        authenticated: bool,
        next_id: AtomicU32,
    }

    impl InMemoryStore {
        fn new() -> Self {
            Self {
                entries: Mutex::new(Vec::new()),
                authenticated: true,
                next_id: AtomicU32::new(1),
            }
        }

        fn signed_out() -> Self {
            Self {
                authenticated: false,
                ..Self::new()
            }
        }

        fn seed(&self, content_id: &str, status: WatchStatus, progress: Option<u32>) -> String {
            let id = format!("e{}", self.next_id.fetch_add(1, Ordering::SeqCst));
            self.entries.lock().unwrap().push(WatchlistEntry {
                id: id.clone(),
                content_id: content_id.to_string(),
                status,
                progress,
                total_episodes: Some(12),
                updated_at: Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap(),
                content: None,
            });
            id
        }

        fn counts(&self) -> StatusCounts {
            let entries = self.entries.lock().unwrap();
            let mut counts = StatusCounts::default();
            for e in entries.iter() {
                match e.status {
                    WatchStatus::WantToWatch => counts.want_to_watch += 1,
                    WatchStatus::Watching => counts.watching += 1,
                    WatchStatus::Completed => counts.completed += 1,
                    WatchStatus::Dropped => counts.dropped += 1,
                }
            }
            counts
        }

        fn guard(&self) -> Result<(), StoreError> {
            if self.authenticated {
                Ok(())
            } else {
                Err(StoreError::Unauthenticated)
            }
        }
    }

    #[async_trait]
    impl WatchlistStore for InMemoryStore {
        async fn list_entries(
            &self,
            filter: Option<WatchStatus>,
            page: u32,
            page_size: u32,
        ) -> Result<WatchlistPage, StoreError> {
            self.guard()?;
            let counts = self.counts();
            let entries = self.entries.lock().unwrap();
            let filtered: Vec<WatchlistEntry> = entries
                .iter()
                .filter(|e| filter.map_or(true, |s| e.status == s))
                .cloned()
                .collect();
            let total = filtered.len() as u64;
            let start = ((page.max(1) - 1) * page_size) as usize;
            let items = filtered
                .into_iter()
                .skip(start)
                .take(page_size as usize)
                .collect();
            Ok(WatchlistPage {
                items,
                total,
                status_counts: counts,
            })
        }

        async fn find_entry_by_content(
            &self,
            content_id: &str,
        ) -> Result<Option<WatchlistEntry>, StoreError> {
            self.guard()?;
            let entries = self.entries.lock().unwrap();
            Ok(entries.iter().find(|e| e.content_id == content_id).cloned())
        }

        async fn create_entry(
            &self,
            content_id: &str,
            status: WatchStatus,
            total_episodes: Option<u32>,
        ) -> Result<WatchlistEntry, StoreError> {
            self.guard()?;
            let mut entries = self.entries.lock().unwrap();
            if entries.iter().any(|e| e.content_id == content_id) {
                return Err(StoreError::DuplicateEntry);
            }
            let entry = WatchlistEntry {
                id: format!("e{}", self.next_id.fetch_add(1, Ordering::SeqCst)),
                content_id: content_id.to_string(),
                status,
                progress: None,
                total_episodes,
                updated_at: Utc::now(),
                content: None,
            };
            entries.push(entry.clone());
            Ok(entry)
        }

        async fn update_entry(
            &self,
            entry_id: &str,
            update: &EntryUpdate,
        ) -> Result<WatchlistEntry, StoreError> {
            self.guard()?;
            let mut entries = self.entries.lock().unwrap();
            let entry = entries
                .iter_mut()
                .find(|e| e.id == entry_id)
                .ok_or(StoreError::NotFound)?;
            if let Some(status) = update.status {
                entry.status = status;
            }
            if let Some(progress) = update.progress {
                entry.progress = Some(progress);
            }
            entry.updated_at = Utc::now();
            Ok(entry.clone())
        }

        async fn delete_entry(&self, entry_id: &str) -> Result<(), StoreError> {
            self.guard()?;
            let mut entries = self.entries.lock().unwrap();
            let before = entries.len();
            entries.retain(|e| e.id != entry_id);
            if entries.len() == before {
                return Err(StoreError::NotFound);
            }
            Ok(())
        }

        async fn stats(&self) -> Result<WatchlistStats, StoreError> {
            self.guard()?;
            let counts = self.counts();
            Ok(WatchlistStats {
                status_counts: counts,
                total_content: counts.total(),
                recent_activity: Vec::new(),
            })
        }
    }

    #[tokio::test]
    async fn test_add_then_start_watching_moves_counts() {
        let controller = TransitionController::new(InMemoryStore::new());

        let outcome = controller
            .apply(
                "c1",
                EntryAction::Add {
                    status: WatchStatus::WantToWatch,
                    total_episodes: Some(12),
                },
            )
            .await
            .unwrap();
        assert_eq!(
            outcome,
            ActionOutcome::Applied(TrackingState::Tracked(WatchStatus::WantToWatch))
        );

        let page = controller.store().list_entries(None, 1, 20).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.status_counts.want_to_watch, 1);

        let outcome = controller
            .apply("c1", EntryAction::SetStatus(WatchStatus::Watching))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            ActionOutcome::Applied(TrackingState::Tracked(WatchStatus::Watching))
        );

        let page = controller.store().list_entries(None, 1, 20).await.unwrap();
        assert_eq!(page.status_counts.want_to_watch, 0);
        assert_eq!(page.status_counts.watching, 1);
        assert_eq!(page.status_counts.total(), page.total);
    }

    #[tokio::test]
    async fn test_duplicate_add_reconciles_to_existing_entry() {
        let store = InMemoryStore::new();
        store.seed("c1", WatchStatus::Completed, Some(12));
        let controller = TransitionController::new(store);

        let outcome = controller
            .apply(
                "c1",
                EntryAction::Add {
                    status: WatchStatus::WantToWatch,
                    total_episodes: None,
                },
            )
            .await
            .unwrap();

        // The existing entry wins, untouched by the failed create.
        match outcome {
            ActionOutcome::AlreadyTracked(existing) => {
                assert_eq!(existing.status, WatchStatus::Completed);
                assert_eq!(existing.progress, Some(12));
            }
            other => panic!("expected AlreadyTracked, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_set_status_preserves_progress() {
        let store = InMemoryStore::new();
        store.seed("c1", WatchStatus::Watching, Some(5));
        let controller = TransitionController::new(store);

        controller
            .apply("c1", EntryAction::SetStatus(WatchStatus::Completed))
            .await
            .unwrap();

        let entry = controller.entry_of("c1").await.unwrap().unwrap();
        assert_eq!(entry.status, WatchStatus::Completed);
        assert_eq!(entry.progress, Some(5));
    }

    #[tokio::test]
    async fn test_set_progress_preserves_status() {
        let store = InMemoryStore::new();
        store.seed("c1", WatchStatus::Watching, None);
        let controller = TransitionController::new(store);

        let outcome = controller
            .apply("c1", EntryAction::SetProgress(7))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            ActionOutcome::Applied(TrackingState::Tracked(WatchStatus::Watching))
        );

        let entry = controller.entry_of("c1").await.unwrap().unwrap();
        assert_eq!(entry.progress, Some(7));
        assert_eq!(entry.status, WatchStatus::Watching);
    }

    #[tokio::test]
    async fn test_remove_twice_is_idempotent() {
        let store = InMemoryStore::new();
        store.seed("c1", WatchStatus::Dropped, None);
        let controller = TransitionController::new(store);

        let first = controller.apply("c1", EntryAction::Remove).await.unwrap();
        assert_eq!(first, ActionOutcome::Applied(TrackingState::NotTracked));

        let second = controller.apply("c1", EntryAction::Remove).await.unwrap();
        assert_eq!(second, ActionOutcome::Applied(TrackingState::NotTracked));

        assert_eq!(controller.entry_of("c1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unauthenticated_mutation_changes_nothing() {
        let controller = TransitionController::new(InMemoryStore::signed_out());

        let outcome = controller
            .apply(
                "c1",
                EntryAction::Add {
                    status: WatchStatus::WantToWatch,
                    total_episodes: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(outcome, ActionOutcome::SignInRequired);
        assert!(controller.store().entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_on_untracked_content_is_hard_error() {
        let controller = TransitionController::new(InMemoryStore::new());
        let result = controller
            .apply("ghost", EntryAction::SetStatus(WatchStatus::Watching))
            .await;
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_state_of_tracks_membership() {
        let store = InMemoryStore::new();
        store.seed("c1", WatchStatus::Watching, None);
        let controller = TransitionController::new(store);

        assert_eq!(
            controller.state_of("c1").await.unwrap(),
            TrackingState::Tracked(WatchStatus::Watching)
        );
        assert_eq!(
            controller.state_of("c2").await.unwrap(),
            TrackingState::NotTracked
        );
    }
}
