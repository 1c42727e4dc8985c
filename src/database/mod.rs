//! SQLite layer under the bookmark store.
//!
//! [`Database`] owns one `rusqlite::Connection` with the `bookmarks` table
//! already in place. Callers never issue DDL themselves; they go through
//! [`schema`] at open time and run plain queries on
//! [`Database::connection`] afterwards.
//!
//! ```no_run
//! use jobmark::database::Database;
//!
//! let db = Database::open("/tmp/jobs.db")?;
//! let saved: i64 = db
//!     .connection()
//!     .query_row("SELECT COUNT(*) FROM bookmarks", [], |row| row.get(0))?;
//! # Ok::<(), rusqlite::Error>(())
//! ```

pub mod connection;
pub mod schema;

pub use connection::Database;
