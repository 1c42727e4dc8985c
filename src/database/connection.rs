//! SQLite connection management for jobmark.
//!
//! Provides the [`Database`] struct that wraps a `rusqlite::Connection`
//! and creates the bookmark schema on open.

use rusqlite::Connection;
use std::path::Path;

use super::schema;

/// Database wrapper owning the single SQLite connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) a SQLite database at the given file path and creates the schema.
    ///
    /// # Errors
    /// Returns `rusqlite::Error` if the connection cannot be established or schema creation fails.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        let db = Self { conn };
        db.create_schema()?;
        Ok(db)
    }

    /// Opens an in-memory SQLite database and creates the schema.
    ///
    /// The database is discarded when the `Database` is dropped.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.create_schema()?;
        Ok(db)
    }

    /// Re-issues the idempotent schema statements.
    pub fn create_schema(&self) -> Result<(), rusqlite::Error> {
        schema::create_all(&self.conn)
    }

    /// Returns a reference to the underlying `rusqlite::Connection`.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
