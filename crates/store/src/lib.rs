//! Persistence for settings, high scores and lifetime statistics.
//!
//! Everything lives as pretty-printed JSON under one data directory. Loads
//! are forgiving: a missing or corrupt file yields defaults, and fields
//! absent from an older file fill in from defaults. Saves report errors.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod highscores;
pub mod settings;
pub mod stats;

pub use blockfall_types as types;

pub use highscores::{HighScoreStore, ScoreEntry, MAX_HIGH_SCORES};
pub use settings::{Settings, SettingsStore};
pub use stats::{format_duration, GameStats, StatsStore};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Default data directory: `$XDG_CONFIG_HOME/blockfall` with the usual
/// fallback to `~/.config/blockfall`.
pub fn default_data_dir() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME").map(|home| {
                let mut p = PathBuf::from(home);
                p.push(".config");
                p
            })
        })
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("blockfall")
}

/// Read and parse a JSON file, falling back to `T::default()` on any failure.
pub(crate) fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let Ok(bytes) = fs::read(path) else {
        return T::default();
    };
    serde_json::from_slice(&bytes).unwrap_or_default()
}

/// Serialize `value` to pretty JSON at `path`, creating parent directories.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text)?;
    Ok(())
}

/// Current local time as `YYYY-MM-DD HH:MM:SS`.
pub(crate) fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Current local date as `YYYY-MM-DD`.
pub(crate) fn date_today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
