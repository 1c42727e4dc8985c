use thiserror::Error;

// === StorageError ===

/// Errors raised by the bookmark store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The database could not be opened or its schema could not be created.
    #[error("Bookmark storage unavailable: {0}")]
    Unavailable(String),
    /// An upsert or delete failed after the store was available.
    #[error("Bookmark write failed: {0}")]
    Write(String),
    /// A list or lookup query failed.
    #[error("Bookmark read failed: {0}")]
    Read(String),
}

// === FeedError ===

/// Errors related to fetching job pages from the remote feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The request could not be sent or the connection failed.
    #[error("Job feed transport error: {0}")]
    Transport(String),
    /// The feed answered with a non-success HTTP status.
    #[error("Job feed returned HTTP {0}")]
    Status(u16),
    /// The response body was not a job page.
    #[error("Job feed decode error: {0}")]
    Decode(String),
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    Io(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    Serialization(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}
