//! Per-OS locations for jobmark's settings file and bookmark database.
//!
//! These are the fallbacks only. The settings engine layers
//! `storage.database_path` and `JOBMARK_DATA_DIR` on top of [`get_data_dir`].

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Directory holding `settings.json`.
///
/// - **Linux**: `$XDG_CONFIG_HOME/jobmark`, else `~/.config/jobmark`
/// - **macOS**: `~/Library/Application Support/Jobmark`
/// - **Windows**: `%APPDATA%/Jobmark`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Directory the bookmark database goes in when nothing overrides it.
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}
