//! Bookmark Store for jobmark.
//!
//! Implements `BookmarkStoreTrait`: durable bookmark CRUD keyed by job id,
//! backed by SQLite via `rusqlite`. The connection is opened lazily on first
//! use and shared by every caller for the lifetime of the store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info};

use crate::database::connection::Database;
use crate::types::bookmark::{BookmarkRecord, NewBookmark};
use crate::types::errors::StorageError;
use crate::types::job::{JobId, JobRecord};

/// Port defining bookmark persistence operations.
///
/// Every operation may suspend on storage I/O. Each write is a single
/// statement, so it either fully applies or fails.
#[async_trait]
pub trait BookmarkStoreTrait: Send + Sync {
    /// Creates the backing table if absent. Safe to call any number of times.
    async fn initialize(&self) -> Result<(), StorageError>;
    /// Inserts or replaces the bookmark for `job.id`.
    async fn upsert(&self, job: &JobRecord) -> Result<(), StorageError>;
    /// Deletes the bookmark if present. Absent ids are not an error.
    async fn remove(&self, job_id: &JobId) -> Result<(), StorageError>;
    /// All bookmarks ordered by `saved_at` ascending.
    async fn list(&self) -> Result<Vec<BookmarkRecord>, StorageError>;
    async fn exists(&self, job_id: &JobId) -> Result<bool, StorageError>;
    async fn get(&self, job_id: &JobId) -> Result<Option<BookmarkRecord>, StorageError>;
}

/// Where the store keeps its database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    InMemory,
}

const SELECT_COLUMNS: &str =
    "SELECT id, title, location, salary, phone, description, company, saved_at FROM bookmarks";

// Keeps saved_at non-decreasing even if the wall clock steps back, and leaves
// saved_at untouched when the id is already bookmarked.
const UPSERT_SQL: &str = "
    INSERT INTO bookmarks (id, title, location, salary, phone, description, company, saved_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7,
            MAX(strftime('%Y-%m-%d %H:%M:%f', 'now'),
                COALESCE((SELECT MAX(saved_at) FROM bookmarks), '')))
    ON CONFLICT(id) DO UPDATE SET
        title = excluded.title,
        location = excluded.location,
        salary = excluded.salary,
        phone = excluded.phone,
        description = excluded.description,
        company = excluded.company";

/// Bookmark store backed by a lazily opened SQLite connection.
pub struct BookmarkStore {
    location: StoreLocation,
    db: OnceCell<Mutex<Database>>,
}

impl BookmarkStore {
    pub fn new(location: StoreLocation) -> Self {
        Self {
            location,
            db: OnceCell::new(),
        }
    }

    /// Store persisted in the SQLite file at `path`.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Self {
        Self::new(StoreLocation::File(path.as_ref().to_path_buf()))
    }

    /// Store discarded when dropped. Used by tests.
    pub fn in_memory() -> Self {
        Self::new(StoreLocation::InMemory)
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    /// Returns the shared connection, opening it on first call.
    ///
    /// Concurrent first callers wait on the same initialization, so only one
    /// connection is ever opened.
    async fn handle(&self) -> Result<&Mutex<Database>, StorageError> {
        self.db
            .get_or_try_init(|| async { self.open_database() })
            .await
    }

    fn open_database(&self) -> Result<Mutex<Database>, StorageError> {
        let db = match &self.location {
            StoreLocation::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        StorageError::Unavailable(format!(
                            "cannot create {}: {}",
                            parent.display(),
                            e
                        ))
                    })?;
                }
                Database::open(path)
            }
            StoreLocation::InMemory => Database::open_in_memory(),
        }
        .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        info!(location = ?self.location, "opened bookmark database");
        Ok(Mutex::new(db))
    }

    /// Reads a single `BookmarkRecord` row into a struct.
    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<BookmarkRecord> {
        let id: String = row.get(0)?;
        let location: Option<String> = row.get(2)?;
        let description: Option<String> = row.get(5)?;
        let company: Option<String> = row.get(6)?;
        let saved_at: Option<String> = row.get(7)?;
        Ok(BookmarkRecord {
            id: JobId::from(id),
            title: row.get(1)?,
            location: location.unwrap_or_default(),
            salary: row.get(3)?,
            phone: row.get(4)?,
            description: description.unwrap_or_default(),
            company: company.unwrap_or_default(),
            saved_at: saved_at.unwrap_or_default(),
        })
    }

    fn write_entry(conn: &Connection, entry: &NewBookmark) -> rusqlite::Result<usize> {
        conn.execute(
            UPSERT_SQL,
            params![
                entry.id.as_str(),
                entry.title,
                entry.location,
                entry.salary,
                entry.phone,
                entry.description,
                entry.company,
            ],
        )
    }

    fn query_all(conn: &Connection) -> rusqlite::Result<Vec<BookmarkRecord>> {
        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY saved_at ASC, rowid ASC",
            SELECT_COLUMNS
        ))?;
        let rows = stmt.query_map([], Self::row_to_record)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    fn query_one(conn: &Connection, job_id: &JobId) -> rusqlite::Result<Option<BookmarkRecord>> {
        conn.query_row(
            &format!("{} WHERE id = ?1", SELECT_COLUMNS),
            params![job_id.as_str()],
            Self::row_to_record,
        )
        .optional()
    }
}

#[async_trait]
impl BookmarkStoreTrait for BookmarkStore {
    async fn initialize(&self) -> Result<(), StorageError> {
        let db = self.handle().await?;
        let guard = db.lock().await;
        guard
            .create_schema()
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }

    async fn upsert(&self, job: &JobRecord) -> Result<(), StorageError> {
        let entry = NewBookmark::from(job);
        let db = self.handle().await?;
        let guard = db.lock().await;
        Self::write_entry(guard.connection(), &entry)
            .map_err(|e| StorageError::Write(e.to_string()))?;
        debug!(job_id = %entry.id, "bookmark upserted");
        Ok(())
    }

    async fn remove(&self, job_id: &JobId) -> Result<(), StorageError> {
        let db = self.handle().await?;
        let guard = db.lock().await;
        let affected = guard
            .connection()
            .execute("DELETE FROM bookmarks WHERE id = ?1", params![job_id.as_str()])
            .map_err(|e| StorageError::Write(e.to_string()))?;
        debug!(job_id = %job_id, affected, "bookmark removed");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<BookmarkRecord>, StorageError> {
        let db = self.handle().await?;
        let guard = db.lock().await;
        Self::query_all(guard.connection()).map_err(|e| StorageError::Read(e.to_string()))
    }

    async fn exists(&self, job_id: &JobId) -> Result<bool, StorageError> {
        let db = self.handle().await?;
        let guard = db.lock().await;
        guard
            .connection()
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM bookmarks WHERE id = ?1)",
                params![job_id.as_str()],
                |row| row.get(0),
            )
            .map_err(|e| StorageError::Read(e.to_string()))
    }

    async fn get(&self, job_id: &JobId) -> Result<Option<BookmarkRecord>, StorageError> {
        let db = self.handle().await?;
        let guard = db.lock().await;
        Self::query_one(guard.connection(), job_id).map_err(|e| StorageError::Read(e.to_string()))
    }
}
