// jobmark platform paths for Linux
// Config: ~/.config/jobmark
// Data:   ~/.local/share/jobmark

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Uses `$XDG_CONFIG_HOME/jobmark` if set, otherwise `~/.config/jobmark`.
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("jobmark"),
        _ => home_dir().join(".config").join("jobmark"),
    }
}

/// Uses `$XDG_DATA_HOME/jobmark` if set, otherwise `~/.local/share/jobmark`.
pub fn get_data_dir() -> PathBuf {
    match env::var("XDG_DATA_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("jobmark"),
        _ => home_dir().join(".local").join("share").join("jobmark"),
    }
}
