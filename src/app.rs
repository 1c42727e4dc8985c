//! App Core for jobmark.
//!
//! Central struct holding the settings, the bookmark state and the job feed,
//! and running the startup sequence.

use std::sync::{Arc, Mutex};

use tracing::{error, info};

use crate::managers::bookmark_store::{BookmarkStore, BookmarkStoreTrait};
use crate::managers::bookmark_sync::BookmarkSync;
use crate::services::job_feed::{HttpJobSource, JobFeed, JobSource};
use crate::services::settings_engine::SettingsEngine;
use crate::types::job::JobListItem;

/// Central application struct.
///
/// `bookmarks` is the single shared bookmark state; every surface reads it
/// and routes mutations through it so the snapshot is reloaded after each one.
pub struct App {
    pub settings_engine: Mutex<SettingsEngine>,
    pub bookmarks: Arc<BookmarkSync>,
    pub feed: tokio::sync::Mutex<JobFeed>,
}

impl App {
    /// Builds the app from already loaded settings.
    pub fn from_settings(
        settings_engine: SettingsEngine,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let store = Arc::new(BookmarkStore::open_path(settings_engine.database_path()));
        let source = Arc::new(HttpJobSource::new(&settings_engine.settings().feed)?);
        Ok(Self::with_parts(settings_engine, store, source))
    }

    /// Builds the app around explicit collaborators.
    pub fn with_parts(
        settings_engine: SettingsEngine,
        store: Arc<dyn BookmarkStoreTrait>,
        source: Arc<dyn JobSource>,
    ) -> Self {
        let first_page = settings_engine.settings().feed.first_page;
        Self {
            settings_engine: Mutex::new(settings_engine),
            bookmarks: Arc::new(BookmarkSync::new(store)),
            feed: tokio::sync::Mutex::new(JobFeed::new(source, first_page)),
        }
    }

    /// Startup sequence: create the bookmark schema, then load the first snapshot.
    ///
    /// Storage failures are logged and leave the snapshot empty; the job feed
    /// keeps working. Returns whether bookmark storage is usable.
    pub async fn startup(&self) -> bool {
        if let Err(e) = self.bookmarks.store().initialize().await {
            error!(error = %e, "bookmark storage unavailable, continuing without bookmarks");
            return false;
        }
        match self.bookmarks.reload().await {
            Ok(snapshot) => {
                info!(bookmarks = snapshot.len(), "bookmarks loaded");
                true
            }
            Err(e) => {
                error!(error = %e, "initial bookmark load failed");
                false
            }
        }
    }

    /// Loaded jobs with their bookmark flag taken from the current snapshot.
    pub async fn job_list(&self) -> Vec<JobListItem> {
        let snapshot = self.bookmarks.snapshot();
        let feed = self.feed.lock().await;
        feed.jobs()
            .iter()
            .map(|job| JobListItem {
                bookmarked: snapshot.contains(&job.id),
                job: job.clone(),
            })
            .collect()
    }
}
