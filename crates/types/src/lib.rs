//! Shared types module - plain data structures and game constants
//!
//! Everything in this crate is pure data with no dependencies, usable from
//! the core simulation, the input layer, the terminal views, and the
//! persistence layer alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//!
//! # Difficulty Table
//!
//! Each difficulty fixes the base gravity interval and an exact score
//! multiplier (stored as a numerator/denominator pair so score arithmetic
//! stays in integers):
//!
//! | Difficulty | Base gravity | Score scale |
//! |------------|--------------|-------------|
//! | Easy       | 800 ms       | 1.0         |
//! | Medium     | 500 ms       | 1.5         |
//! | Hard       | 300 ms       | 2.0         |
//! | Expert     | 150 ms       | 3.0         |
//!
//! Gravity speeds up by [`GRAVITY_STEP_MS`] per level above 1 and never goes
//! below [`GRAVITY_FLOOR_MS`].
//!
//! # Scoring Table
//!
//! Base points for clearing N rows with one piece, before the level and
//! difficulty multipliers:
//!
//! | Rows | Points |
//! |------|--------|
//! | 1    | 100    |
//! | 2    | 300    |
//! | 3    | 500    |
//! | 4    | 800    |
//!
//! Soft and hard drops score per cell descended and are never multiplied.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Difficulty, PieceKind, BOARD_WIDTH};
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(PieceKind::from_index(0), Some(PieceKind::I));
//! assert_eq!(PieceKind::T.index(), 2);
//!
//! let d = Difficulty::Medium;
//! assert_eq!(d.base_gravity_ms(), 500);
//! assert_eq!(d.next(), Difficulty::Hard);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Rows cleared per level step (level = lines / 10 + 1)
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity interval reduction per level above 1 (50ms)
pub const GRAVITY_STEP_MS: u32 = 50;

/// Minimum gravity interval (50ms)
pub const GRAVITY_FLOOR_MS: u32 = 50;

/// Base line-clear scores indexed by rows cleared (0-4)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per cell descended by soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per cell descended by hard drop
pub const HARD_DROP_POINTS: u32 = 2;

/// DAS (Delayed Auto Shift) delay before held movement repeats
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) between repeated movements
pub const DEFAULT_ARR_MS: u32 = 50;

/// Repeat rate for a held soft drop
pub const SOFT_DROP_ARR_MS: u32 = 50;

/// A held soft drop starts repeating immediately
pub const SOFT_DROP_DAS_MS: u32 = 0;

/// The seven tetromino piece kinds
///
/// Declaration order matches the shape catalog, so a kind converts to and
/// from its catalog index (0-6). The index doubles as the color identity:
/// locked grid cells store `index + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Catalog index of this kind (0-6)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kind for a catalog index
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(6), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_index(7), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Player intents the session can apply to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (with soft drop scoring)
    SoftDrop,
    /// Drop piece to the floor and lock it immediately
    HardDrop,
    /// Rotate piece 90° clockwise (with wall-kick fallback)
    RotateCw,
    /// Toggle pause (consumed by the app, not the session)
    Pause,
}

/// Game difficulty
///
/// Fixes the base gravity interval and the line-score multiplier for a
/// session. Persisted by name, so the string forms are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// All difficulties in ascending order
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Gravity interval at level 1, in milliseconds
    pub fn base_gravity_ms(self) -> u32 {
        match self {
            Difficulty::Easy => 800,
            Difficulty::Medium => 500,
            Difficulty::Hard => 300,
            Difficulty::Expert => 150,
        }
    }

    /// Exact score multiplier as (numerator, denominator)
    ///
    /// Easy 1.0, Medium 1.5, Hard 2.0, Expert 3.0. Multiply before dividing;
    /// every base line score is a multiple of 100, so products stay exact.
    pub fn score_scale(self) -> (u32, u32) {
        match self {
            Difficulty::Easy => (1, 1),
            Difficulty::Medium => (3, 2),
            Difficulty::Hard => (2, 1),
            Difficulty::Expert => (3, 1),
        }
    }

    /// Stable uppercase name, as written to the settings file
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
            Difficulty::Expert => "EXPERT",
        }
    }

    /// Parse a difficulty name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "EASY" => Some(Difficulty::Easy),
            "MEDIUM" => Some(Difficulty::Medium),
            "HARD" => Some(Difficulty::Hard),
            "EXPERT" => Some(Difficulty::Expert),
            _ => None,
        }
    }

    /// Human-readable name for menus and the game sidebar
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }

    /// Next difficulty, wrapping (for settings cycling)
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Expert,
            Difficulty::Expert => Difficulty::Easy,
        }
    }

    /// Previous difficulty, wrapping
    pub fn prev(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Expert,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
            Difficulty::Expert => Difficulty::Hard,
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

/// Color theme for the terminal views
///
/// Themes only change the chrome palette (background, border, text, ghost);
/// piece colors are fixed by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Classic,
    Neon,
    Pastel,
}

impl Theme {
    /// All themes in cycling order
    pub const ALL: [Theme; 3] = [Theme::Classic, Theme::Neon, Theme::Pastel];

    /// Stable uppercase name, as written to the settings file
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Classic => "CLASSIC",
            Theme::Neon => "NEON",
            Theme::Pastel => "PASTEL",
        }
    }

    /// Parse a theme name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "CLASSIC" => Some(Theme::Classic),
            "NEON" => Some(Theme::Neon),
            "PASTEL" => Some(Theme::Pastel),
            _ => None,
        }
    }

    /// Human-readable name for the settings screen
    pub fn label(self) -> &'static str {
        match self {
            Theme::Classic => "Classic",
            Theme::Neon => "Neon",
            Theme::Pastel => "Pastel",
        }
    }

    /// Next theme, wrapping (for settings cycling)
    pub fn next(self) -> Self {
        match self {
            Theme::Classic => Theme::Neon,
            Theme::Neon => Theme::Pastel,
            Theme::Pastel => Theme::Classic,
        }
    }

    /// Previous theme, wrapping
    pub fn prev(self) -> Self {
        match self {
            Theme::Classic => Theme::Pastel,
            Theme::Neon => Theme::Classic,
            Theme::Pastel => Theme::Neon,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Classic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_table_values() {
        assert_eq!(Difficulty::Easy.base_gravity_ms(), 800);
        assert_eq!(Difficulty::Medium.base_gravity_ms(), 500);
        assert_eq!(Difficulty::Hard.base_gravity_ms(), 300);
        assert_eq!(Difficulty::Expert.base_gravity_ms(), 150);

        assert_eq!(Difficulty::Easy.score_scale(), (1, 1));
        assert_eq!(Difficulty::Medium.score_scale(), (3, 2));
        assert_eq!(Difficulty::Hard.score_scale(), (2, 1));
        assert_eq!(Difficulty::Expert.score_scale(), (3, 1));
    }

    #[test]
    fn scoring_table_values() {
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
        assert_eq!(SOFT_DROP_POINTS, 1);
        assert_eq!(HARD_DROP_POINTS, 2);
    }

    #[test]
    fn piece_kind_index_round_trip() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_index(i), Some(*kind));
        }
        assert_eq!(PieceKind::from_index(7), None);
    }

    #[test]
    fn difficulty_name_round_trip() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("medium"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn difficulty_labels_are_title_case() {
        assert_eq!(Difficulty::Medium.label(), "Normal");
        assert_eq!(Theme::Neon.label(), "Neon");
    }

    #[test]
    fn difficulty_cycling_wraps() {
        assert_eq!(Difficulty::Expert.next(), Difficulty::Easy);
        assert_eq!(Difficulty::Easy.prev(), Difficulty::Expert);
        for d in Difficulty::ALL {
            assert_eq!(d.next().prev(), d);
        }
    }

    #[test]
    fn theme_cycling_wraps() {
        assert_eq!(Theme::Pastel.next(), Theme::Classic);
        assert_eq!(Theme::Classic.prev(), Theme::Pastel);
        for t in Theme::ALL {
            assert_eq!(Theme::from_str(t.as_str()), Some(t));
            assert_eq!(t.next().prev(), t);
        }
    }
}
