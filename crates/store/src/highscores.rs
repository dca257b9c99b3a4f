//! High score table, persisted as `highscores.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{read_json_or_default, timestamp, write_json, StoreError};

/// The table keeps this many entries, best first.
pub const MAX_HIGH_SCORES: usize = 10;

/// Name used when the player submits a blank one.
pub const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct HighScoreFile {
    #[serde(default)]
    high_scores: Vec<ScoreEntry>,
    #[serde(default)]
    last_updated: String,
}

/// Owns the high score file and the current in-memory table.
pub struct HighScoreStore {
    path: PathBuf,
    scores: Vec<ScoreEntry>,
}

impl HighScoreStore {
    /// Load the table from `data_dir`, falling back to an empty one.
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join("highscores.json");
        let file: HighScoreFile = read_json_or_default(&path);
        Self {
            path,
            scores: file.high_scores,
        }
    }

    /// Entries in descending score order.
    pub fn scores(&self) -> &[ScoreEntry] {
        &self.scores
    }

    /// Whether `score` would enter the table. Ties with the current minimum
    /// do not qualify once the table is full.
    pub fn is_high_score(&self, score: u32) -> bool {
        self.scores.len() < MAX_HIGH_SCORES || score > self.min_score()
    }

    /// 1-based rank the score would take among the current entries, `None`
    /// when it beats none of them.
    pub fn rank_for(&self, score: u32) -> Option<usize> {
        self.scores
            .iter()
            .position(|entry| score >= entry.score)
            .map(|i| i + 1)
    }

    /// Insert a score if it qualifies, keeping the table sorted and capped.
    /// Returns whether the entry was added.
    pub fn add_score(
        &mut self,
        name: &str,
        score: u32,
        level: u32,
        lines: u32,
    ) -> Result<bool, StoreError> {
        if !self.is_high_score(score) {
            return Ok(false);
        }

        let name = name.trim();
        let entry = ScoreEntry {
            name: if name.is_empty() { ANONYMOUS } else { name }.to_string(),
            score,
            level,
            lines,
            date: timestamp(),
        };
        self.scores.push(entry);
        // Stable sort: earlier entries win ties.
        self.scores.sort_by(|a, b| b.score.cmp(&a.score));
        self.scores.truncate(MAX_HIGH_SCORES);
        self.save()?;
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.scores.clear();
        self.save()
    }

    fn min_score(&self) -> u32 {
        self.scores.iter().map(|e| e.score).min().unwrap_or(0)
    }

    fn save(&self) -> Result<(), StoreError> {
        // Keep one backup of the previous table; a failed copy never blocks
        // the save itself.
        if self.path.exists() {
            let mut backup = self.path.clone().into_os_string();
            backup.push(".bak");
            let _ = fs::copy(&self.path, PathBuf::from(backup));
        }
        let file = HighScoreFile {
            high_scores: self.scores.clone(),
            last_updated: timestamp(),
        };
        write_json(&self.path, &file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_data_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("blockfall_test_scores_{nanos}"))
    }

    fn filled_store(dir: &Path) -> HighScoreStore {
        let mut store = HighScoreStore::open(dir);
        for i in 1..=10u32 {
            store.add_score(&format!("p{i}"), i * 100, 1, i).unwrap();
        }
        store
    }

    #[test]
    fn test_empty_table_accepts_anything() {
        let dir = unique_data_dir();
        let store = HighScoreStore::open(&dir);
        assert!(store.scores().is_empty());
        assert!(store.is_high_score(0));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_add_keeps_descending_order_and_cap() {
        let dir = unique_data_dir();
        let mut store = filled_store(&dir);
        assert_eq!(store.scores().len(), MAX_HIGH_SCORES);
        assert_eq!(store.scores()[0].score, 1000);
        assert_eq!(store.scores()[9].score, 100);

        // 550 slots between 500 and 600, pushing out the 100.
        assert!(store.add_score("mid", 550, 2, 4).unwrap());
        assert_eq!(store.scores().len(), MAX_HIGH_SCORES);
        assert_eq!(store.scores()[5].score, 550);
        assert_eq!(store.scores()[9].score, 200);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_full_table_rejects_ties_with_minimum() {
        let dir = unique_data_dir();
        let mut store = filled_store(&dir);
        assert!(!store.is_high_score(100));
        assert!(store.is_high_score(101));
        assert!(!store.add_score("tie", 100, 1, 1).unwrap());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_blank_name_becomes_anonymous() {
        let dir = unique_data_dir();
        let mut store = HighScoreStore::open(&dir);
        store.add_score("   ", 500, 2, 5).unwrap();
        assert_eq!(store.scores()[0].name, ANONYMOUS);
        assert!(!store.scores()[0].date.is_empty());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_rank_counts_from_one() {
        let dir = unique_data_dir();
        let mut store = HighScoreStore::open(&dir);
        store.add_score("a", 300, 1, 1).unwrap();
        store.add_score("b", 200, 1, 1).unwrap();
        assert_eq!(store.rank_for(400), Some(1));
        assert_eq!(store.rank_for(250), Some(2));
        assert_eq!(store.rank_for(100), None);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_reload_reads_saved_table() {
        let dir = unique_data_dir();
        let mut store = HighScoreStore::open(&dir);
        store.add_score("keeper", 700, 3, 12).unwrap();

        let reloaded = HighScoreStore::open(&dir);
        assert_eq!(reloaded.scores().len(), 1);
        assert_eq!(reloaded.scores()[0].name, "keeper");
        assert_eq!(reloaded.scores()[0].score, 700);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_second_save_leaves_backup() {
        let dir = unique_data_dir();
        let mut store = HighScoreStore::open(&dir);
        store.add_score("first", 100, 1, 1).unwrap();
        store.add_score("second", 200, 1, 2).unwrap();
        assert!(dir.join("highscores.json.bak").exists());
        let _ = fs::remove_dir_all(dir);
    }
}
