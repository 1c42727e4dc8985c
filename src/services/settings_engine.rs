//! JSON-backed settings for jobmark.
//!
//! The engine owns the `settings.json` file and answers the one question
//! the rest of the crate asks of it: where the bookmark database lives.
//! Every value that enters it, from disk or through [`SettingsEngine::set_value`],
//! passes [`validate`] first.

use std::env;
use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tracing::info;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::AppSettings;

/// Overrides the directory holding the database (not an explicit `storage.database_path`).
pub const DATA_DIR_ENV: &str = "JOBMARK_DATA_DIR";

const SETTINGS_FILE: &str = "settings.json";

/// Sections whose values are read once, when the store and feed are built.
const RESTART_SECTIONS: [&str; 2] = ["storage", "feed"];

/// Rejects values that parse but cannot drive the store or feed.
pub fn validate(settings: &AppSettings) -> Result<(), SettingsError> {
    let feed = &settings.feed;
    if !(feed.api_base_url.starts_with("http://") || feed.api_base_url.starts_with("https://")) {
        return Err(SettingsError::InvalidValue(format!(
            "feed.api_base_url must be an http(s) URL, got '{}'",
            feed.api_base_url
        )));
    }
    if feed.request_timeout_secs == 0 {
        return Err(SettingsError::InvalidValue(
            "feed.request_timeout_secs must be at least 1".to_string(),
        ));
    }
    if settings.storage.database_file_name.trim().is_empty() {
        return Err(SettingsError::InvalidValue(
            "storage.database_file_name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Whether a change to `key` only takes effect after the app is rebuilt.
pub fn requires_restart(key: &str) -> bool {
    let section = key.split('.').next().unwrap_or_default();
    RESTART_SECTIONS.contains(&section)
}

pub struct SettingsEngine {
    config_path: PathBuf,
    data_dir: Option<PathBuf>,
    settings: AppSettings,
}

impl SettingsEngine {
    /// Engine over `config_path`, or `<config dir>/settings.json`.
    ///
    /// `JOBMARK_DATA_DIR` is captured here, once.
    pub fn new(config_path: Option<String>) -> Self {
        let config_path = config_path
            .map(PathBuf::from)
            .unwrap_or_else(|| platform::get_config_dir().join(SETTINGS_FILE));
        let data_dir = env::var(DATA_DIR_ENV)
            .ok()
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);
        Self {
            config_path,
            data_dir,
            settings: AppSettings::default(),
        }
    }

    /// Replaces the data directory override.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Reads the settings file. A missing file means defaults and is not written.
    pub fn load(&mut self) -> Result<&AppSettings, SettingsError> {
        let settings = match fs::read_to_string(&self.config_path) {
            Ok(content) => serde_json::from_str::<AppSettings>(&content).map_err(|e| {
                SettingsError::Serialization(format!(
                    "{}: {}",
                    self.config_path.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppSettings::default(),
            Err(e) => {
                return Err(SettingsError::Io(format!(
                    "{}: {}",
                    self.config_path.display(),
                    e
                )))
            }
        };
        validate(&settings)?;
        self.settings = settings;
        Ok(&self.settings)
    }

    /// Sets one value by dotted key (`feed.api_base_url`) and writes the file.
    ///
    /// Nothing changes, in memory or on disk, unless the result validates.
    pub fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        let pointer = format!("/{}", key.replace('.', "/"));
        if key.is_empty() || key.contains('/') || pointer.contains("//") {
            return Err(SettingsError::InvalidKey(key.to_string()));
        }

        let mut tree = serde_json::to_value(&self.settings)
            .map_err(|e| SettingsError::Serialization(e.to_string()))?;
        // Only existing leaves; objects are replaced through their fields.
        match tree.pointer_mut(&pointer) {
            Some(slot) if !slot.is_object() => *slot = value,
            _ => return Err(SettingsError::InvalidKey(key.to_string())),
        }

        let updated: AppSettings = serde_json::from_value(tree)
            .map_err(|e| SettingsError::InvalidValue(format!("{}: {}", key, e)))?;
        validate(&updated)?;
        self.write(&updated)?;
        self.settings = updated;
        info!(key, "setting updated");
        Ok(())
    }

    fn write(&self, settings: &AppSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| SettingsError::Io(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| SettingsError::Serialization(e.to_string()))?;
        fs::write(&self.config_path, json).map_err(|e| SettingsError::Io(e.to_string()))
    }

    /// Bookmark database file.
    ///
    /// Precedence: `storage.database_path`, then `JOBMARK_DATA_DIR` joined
    /// with `storage.database_file_name`, then the platform data directory.
    pub fn database_path(&self) -> PathBuf {
        let storage = &self.settings.storage;
        if let Some(path) = storage.database_path.as_deref().filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        self.data_dir
            .clone()
            .unwrap_or_else(platform::get_data_dir)
            .join(&storage.database_file_name)
    }
}
