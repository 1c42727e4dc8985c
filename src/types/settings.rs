use serde::{Deserialize, Serialize};

/// Default endpoint of the job listings feed.
pub const DEFAULT_API_BASE_URL: &str = "https://testapi.getlokalapp.com/common/jobs";

/// Top-level application settings container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub storage: StorageSettings,
    pub feed: FeedSettings,
    pub logging: LoggingSettings,
}

/// Where the bookmark database lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageSettings {
    /// Explicit database file. `None` means `<data dir>/jobs.db`.
    pub database_path: Option<String>,
    pub database_file_name: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: None,
            database_file_name: "jobs.db".to_string(),
        }
    }
}

/// Remote job feed settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedSettings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub first_page: u32,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 15,
            first_page: 1,
        }
    }
}

/// Log output settings. `JOBMARK_LOG` takes precedence over `filter`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
