//! Schema for the jobmark SQLite database.
//!
//! There is a single table and no versioning: every statement uses
//! `IF NOT EXISTS` and is re-run on every open.

use rusqlite::Connection;

/// Name of the bookmark table.
pub const BOOKMARKS_TABLE: &str = "bookmarks";

/// Creates the bookmark table and its ordering index if absent.
///
/// # Errors
/// Returns `rusqlite::Error` if any SQL statement fails.
pub fn create_all(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS bookmarks (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            location TEXT,
            salary TEXT,
            phone TEXT,
            description TEXT,
            company TEXT,
            saved_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_bookmarks_saved_at ON bookmarks(saved_at);
        ",
    )
}

/// Returns true if the named table exists.
pub fn table_exists(conn: &Connection, table: &str) -> Result<bool, rusqlite::Error> {
    conn.query_row(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |row| row.get(0),
    )
}
