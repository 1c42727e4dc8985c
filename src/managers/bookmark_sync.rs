//! Bookmark synchronization state for jobmark.
//!
//! `BookmarkSync` holds the shared in-memory projection of the bookmark
//! store. Every surface reads the same [`BookmarkSnapshot`]; after any
//! mutation the snapshot is rebuilt from a full `list()` and published as a
//! whole, never patched.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, error, warn};

use crate::managers::bookmark_store::BookmarkStoreTrait;
use crate::types::bookmark::BookmarkSnapshot;
use crate::types::errors::StorageError;
use crate::types::job::{JobId, JobRecord};

/// A write that reached the store.
#[derive(Debug, Clone)]
pub struct MutationOutcome {
    pub snapshot: Arc<BookmarkSnapshot>,
    /// The reload after the write failed, so `snapshot` predates it.
    pub stale: bool,
}

/// Shared bookmark view state, owned by the application and handed to each surface.
pub struct BookmarkSync {
    store: Arc<dyn BookmarkStoreTrait>,
    snapshot_tx: watch::Sender<Arc<BookmarkSnapshot>>,
    reload_lock: Mutex<()>,
}

impl BookmarkSync {
    /// Creates the state with an empty snapshot. Call [`reload`](Self::reload) to populate it.
    pub fn new(store: Arc<dyn BookmarkStoreTrait>) -> Self {
        let (snapshot_tx, _) = watch::channel(Arc::new(BookmarkSnapshot::default()));
        Self {
            store,
            snapshot_tx,
            reload_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<dyn BookmarkStoreTrait> {
        &self.store
    }

    /// The current snapshot. Never fails; after a failed reload this is the last good one.
    pub fn snapshot(&self) -> Arc<BookmarkSnapshot> {
        self.snapshot_tx.borrow().clone()
    }

    /// Receiver notified each time a new snapshot is published.
    pub fn subscribe(&self) -> watch::Receiver<Arc<BookmarkSnapshot>> {
        self.snapshot_tx.subscribe()
    }

    pub fn is_bookmarked(&self, job_id: &JobId) -> bool {
        self.snapshot_tx.borrow().contains(job_id)
    }

    /// Rebuilds the snapshot from the store and publishes it.
    ///
    /// On failure the previous snapshot stays published and the error is returned.
    pub async fn reload(&self) -> Result<Arc<BookmarkSnapshot>, StorageError> {
        let _guard = self.reload_lock.lock().await;
        match self.store.list().await {
            Ok(records) => {
                let snapshot = Arc::new(BookmarkSnapshot::from_records(records));
                self.snapshot_tx.send_replace(snapshot.clone());
                debug!(count = snapshot.len(), "bookmark snapshot reloaded");
                Ok(snapshot)
            }
            Err(e) => {
                warn!(error = %e, "bookmark reload failed, keeping previous snapshot");
                Err(e)
            }
        }
    }

    /// Reload that follows a successful write. A failure here is logged and
    /// absorbed: the write stands and the last good snapshot stays published.
    async fn refresh_after_write(&self) -> MutationOutcome {
        match self.reload().await {
            Ok(snapshot) => MutationOutcome { snapshot, stale: false },
            Err(e) => {
                error!(error = %e, "bookmark saved but the view could not be refreshed");
                MutationOutcome {
                    snapshot: self.snapshot(),
                    stale: true,
                }
            }
        }
    }

    /// Saves `job` as a bookmark, then reloads.
    ///
    /// Only a failed write is an error.
    pub async fn bookmark(&self, job: &JobRecord) -> Result<MutationOutcome, StorageError> {
        if let Err(e) = self.store.upsert(job).await {
            error!(job_id = %job.id, error = %e, "failed to bookmark job");
            return Err(e);
        }
        Ok(self.refresh_after_write().await)
    }

    /// Removes the bookmark for `job_id`, then reloads.
    pub async fn unbookmark(&self, job_id: &JobId) -> Result<MutationOutcome, StorageError> {
        if let Err(e) = self.store.remove(job_id).await {
            error!(job_id = %job_id, error = %e, "failed to remove bookmark");
            return Err(e);
        }
        Ok(self.refresh_after_write().await)
    }

    /// Flips the bookmark state of `job` and returns the new state.
    ///
    /// Membership is checked against the store, not the snapshot, so a stale
    /// snapshot cannot invert the action.
    pub async fn toggle(&self, job: &JobRecord) -> Result<bool, StorageError> {
        if self.store.exists(&job.id).await? {
            self.unbookmark(&job.id).await?;
            Ok(false)
        } else {
            self.bookmark(job).await?;
            Ok(true)
        }
    }
}
