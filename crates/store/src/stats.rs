//! Lifetime play statistics, persisted as `statistics.json`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::Difficulty;
use crate::{date_today, read_json_or_default, write_json, StoreError};

/// Counters accumulated across every finished game. Averages are derived on
/// read instead of being stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStats {
    #[serde(default)]
    pub total_games: u32,
    /// Seconds of active play across all games.
    #[serde(default)]
    pub total_play_time: u64,
    #[serde(default)]
    pub total_lines_cleared: u64,
    #[serde(default)]
    pub total_score: u64,
    #[serde(default)]
    pub highest_score: u32,
    #[serde(default)]
    pub highest_level: u32,
    #[serde(default)]
    pub most_lines_cleared: u32,
    #[serde(default = "zeroed_difficulty_counts")]
    pub games_per_difficulty: BTreeMap<String, u32>,
    #[serde(default)]
    pub last_session_date: String,
}

impl Default for GameStats {
    fn default() -> Self {
        Self {
            total_games: 0,
            total_play_time: 0,
            total_lines_cleared: 0,
            total_score: 0,
            highest_score: 0,
            highest_level: 0,
            most_lines_cleared: 0,
            games_per_difficulty: zeroed_difficulty_counts(),
            last_session_date: String::new(),
        }
    }
}

fn zeroed_difficulty_counts() -> BTreeMap<String, u32> {
    Difficulty::ALL
        .iter()
        .map(|d| (d.as_str().to_string(), 0))
        .collect()
}

impl GameStats {
    /// Mean score per game, rounded to the nearest point.
    pub fn average_score(&self) -> u64 {
        if self.total_games == 0 {
            return 0;
        }
        (self.total_score as f64 / self.total_games as f64).round() as u64
    }

    /// Mean lines per game, to one decimal.
    pub fn average_lines(&self) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        round1(self.total_lines_cleared as f64 / self.total_games as f64)
    }

    /// Mean seconds per game, to one decimal.
    pub fn average_session_secs(&self) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        round1(self.total_play_time as f64 / self.total_games as f64)
    }

    pub fn games_for(&self, difficulty: Difficulty) -> u32 {
        self.games_per_difficulty
            .get(difficulty.as_str())
            .copied()
            .unwrap_or(0)
    }

    /// Difficulty the player has finished the most games on, Medium when
    /// nothing is recorded yet. Earlier difficulties win ties.
    pub fn preferred_difficulty(&self) -> Difficulty {
        let mut best = Difficulty::Medium;
        let mut best_count = 0;
        for d in Difficulty::ALL {
            let count = self.games_for(d);
            if count > best_count {
                best = d;
                best_count = count;
            }
        }
        best
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Render seconds as `45s`, `2m 5s` or `1h 1m`.
pub fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Owns the statistics file and the current in-memory counters.
pub struct StatsStore {
    path: PathBuf,
    stats: GameStats,
}

impl StatsStore {
    /// Load statistics from `data_dir`, falling back to zeroed counters.
    pub fn open(data_dir: &Path) -> Self {
        let path = data_dir.join("statistics.json");
        let stats = read_json_or_default(&path);
        Self { path, stats }
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Stamp today as the most recent session. Persisted by the next
    /// `record_game`.
    pub fn start_session(&mut self) {
        self.stats.last_session_date = date_today();
    }

    /// Fold a finished game into the counters and persist them.
    pub fn record_game(
        &mut self,
        score: u32,
        level: u32,
        lines_cleared: u32,
        play_time_secs: u64,
        difficulty: Difficulty,
    ) -> Result<(), StoreError> {
        let stats = &mut self.stats;
        stats.total_games += 1;
        stats.total_score += u64::from(score);
        stats.total_lines_cleared += u64::from(lines_cleared);
        stats.total_play_time += play_time_secs;
        stats.highest_score = stats.highest_score.max(score);
        stats.highest_level = stats.highest_level.max(level);
        stats.most_lines_cleared = stats.most_lines_cleared.max(lines_cleared);
        *stats
            .games_per_difficulty
            .entry(difficulty.as_str().to_string())
            .or_insert(0) += 1;
        self.save()
    }

    /// Zero every counter and persist the result.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.stats = GameStats::default();
        self.save()
    }

    fn save(&self) -> Result<(), StoreError> {
        write_json(&self.path, &self.stats)
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
        std::env::temp_dir().join(format!("blockfall_test_stats_{nanos}"))
    }

    #[test]
    fn test_record_game_accumulates_and_tracks_maxima() {
        let dir = unique_data_dir();
        let mut store = StatsStore::open(&dir);
        store.start_session();
        store.record_game(100, 2, 3, 10, Difficulty::Medium).unwrap();
        store.record_game(200, 1, 4, 15, Difficulty::Hard).unwrap();

        let s = store.stats();
        assert_eq!(s.total_games, 2);
        assert_eq!(s.total_score, 300);
        assert_eq!(s.total_lines_cleared, 7);
        assert_eq!(s.total_play_time, 25);
        assert_eq!(s.highest_score, 200);
        assert_eq!(s.highest_level, 2);
        assert_eq!(s.most_lines_cleared, 4);
        assert_eq!(s.games_for(Difficulty::Hard), 1);
        assert_eq!(s.last_session_date.len(), 10);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_averages_derive_from_totals() {
        let dir = unique_data_dir();
        let mut store = StatsStore::open(&dir);
        assert_eq!(store.stats().average_score(), 0);

        store.record_game(100, 1, 3, 10, Difficulty::Medium).unwrap();
        store.record_game(201, 1, 4, 15, Difficulty::Medium).unwrap();

        let s = store.stats();
        assert_eq!(s.average_score(), 151);
        assert_eq!(s.average_lines(), 3.5);
        assert_eq!(s.average_session_secs(), 12.5);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_older_files_fill_missing_fields() {
        let parsed: GameStats =
            serde_json::from_str(r#"{"total_games":5,"highest_score":9000}"#).unwrap();
        assert_eq!(parsed.total_games, 5);
        assert_eq!(parsed.highest_score, 9000);
        assert_eq!(parsed.total_play_time, 0);
        assert_eq!(parsed.games_for(Difficulty::Easy), 0);
    }

    #[test]
    fn test_preferred_difficulty_breaks_ties_in_order() {
        let mut stats = GameStats::default();
        assert_eq!(stats.preferred_difficulty(), Difficulty::Medium);

        stats.games_per_difficulty.insert("EASY".into(), 3);
        stats.games_per_difficulty.insert("EXPERT".into(), 3);
        assert_eq!(stats.preferred_difficulty(), Difficulty::Easy);

        stats.games_per_difficulty.insert("EXPERT".into(), 4);
        assert_eq!(stats.preferred_difficulty(), Difficulty::Expert);
    }

    #[test]
    fn test_reset_zeroes_everything_on_disk() {
        let dir = unique_data_dir();
        let mut store = StatsStore::open(&dir);
        store.record_game(500, 3, 9, 60, Difficulty::Expert).unwrap();
        store.reset().unwrap();

        let reloaded = StatsStore::open(&dir);
        assert_eq!(reloaded.stats(), &GameStats::default());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_format_duration_shapes() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(3700), "1h 1m");
    }
}
