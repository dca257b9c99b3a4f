//! Player settings, persisted as `settings.json`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{Difficulty, Theme};
use crate::{read_json_or_default, write_json, StoreError};

/// Settings as written to disk. Difficulty and theme are stored by their
/// stable uppercase names so the file stays readable and survives enum
/// reordering; use the typed accessors to work with them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_true")]
    pub show_ghost_piece: bool,
    #[serde(default = "default_true")]
    pub show_next_piece: bool,
    #[serde(default)]
    pub show_grid: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            theme: default_theme(),
            show_ghost_piece: true,
            show_next_piece: true,
            show_grid: false,
        }
    }
}

fn default_difficulty() -> String {
    Difficulty::Medium.as_str().to_string()
}

fn default_theme() -> String {
    Theme::Classic.as_str().to_string()
}

fn default_true() -> bool {
    true
}

impl Settings {
    /// Stored difficulty, or Medium when the name does not parse.
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_str(&self.difficulty).unwrap_or(Difficulty::Medium)
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty.as_str().to_string();
    }

    /// Stored theme, or Classic when the name does not parse.
    pub fn theme(&self) -> Theme {
        Theme::from_str(&self.theme).unwrap_or(Theme::Classic)
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme.as_str().to_string();
    }
}

/// Owns the settings file and the current in-memory copy.
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Load settings from `data_dir`, falling back to defaults.
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        let settings = read_json_or_default(&path);
        Self { path, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn save(&self) -> Result<(), StoreError> {
        write_json(&self.path, &self.settings)
    }

    /// Restore defaults and persist them.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.settings = Settings::default();
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_data_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("blockfall_test_settings_{nanos}"))
    }

    #[test]
    fn test_defaults_match_first_run() {
        let s = Settings::default();
        assert_eq!(s.difficulty(), Difficulty::Medium);
        assert_eq!(s.theme(), Theme::Classic);
        assert!(s.show_ghost_piece);
        assert!(s.show_next_piece);
        assert!(!s.show_grid);
    }

    #[test]
    fn test_missing_fields_fill_from_defaults() {
        let parsed: Settings =
            serde_json::from_str(r#"{"difficulty":"HARD","show_grid":true}"#).unwrap();
        assert_eq!(parsed.difficulty(), Difficulty::Hard);
        assert!(parsed.show_grid);
        assert_eq!(parsed.theme(), Theme::Classic);
        assert!(parsed.show_ghost_piece);
    }

    #[test]
    fn test_unknown_names_fall_back() {
        let mut s = Settings::default();
        s.difficulty = "NIGHTMARE".to_string();
        s.theme = "vaporwave".to_string();
        assert_eq!(s.difficulty(), Difficulty::Medium);
        assert_eq!(s.theme(), Theme::Classic);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = unique_data_dir();
        let mut store = SettingsStore::open(&dir);
        store.settings_mut().set_difficulty(Difficulty::Expert);
        store.settings_mut().set_theme(Theme::Neon);
        store.settings_mut().show_grid = true;
        store.save().unwrap();

        let reloaded = SettingsStore::open(&dir);
        assert_eq!(reloaded.settings(), store.settings());
        assert_eq!(reloaded.settings().difficulty(), Difficulty::Expert);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_reset_restores_defaults_on_disk() {
        let dir = unique_data_dir();
        let mut store = SettingsStore::open(&dir);
        store.settings_mut().set_theme(Theme::Pastel);
        store.save().unwrap();
        store.reset().unwrap();

        let reloaded = SettingsStore::open(&dir);
        assert_eq!(reloaded.settings(), &Settings::default());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let dir = unique_data_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("settings.json"), b"{not json").unwrap();

        let store = SettingsStore::open(&dir);
        assert_eq!(store.settings(), &Settings::default());

        let _ = fs::remove_dir_all(dir);
    }
}
