//! Scoring module - line clear points, level progression, gravity speed
//!
//! Line clears award `LINE_SCORES[lines] * level`, scaled by the difficulty
//! multiplier held as an exact numerator/denominator pair (every multiplier
//! is a half-step, so integer math stays exact). Drop points are flat per
//! cell and never scaled.

use crate::types::{
    Difficulty, GRAVITY_FLOOR_MS, GRAVITY_STEP_MS, HARD_DROP_POINTS, LINES_PER_LEVEL, LINE_SCORES,
    SOFT_DROP_POINTS,
};

/// Calculate points for a line clear
/// lines: number of rows cleared (1-4, anything else scores 0)
/// level: level in effect when the piece locked (1-based)
pub fn line_points(lines: usize, level: u32, difficulty: Difficulty) -> u32 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    let (numer, denom) = difficulty.score_scale();
    LINE_SCORES[lines]
        .saturating_mul(level)
        .saturating_mul(numer)
        / denom
}

/// Calculate points for dropped cells
/// soft drop: +1 per cell, hard drop: +2 per cell
pub fn drop_points(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells.saturating_mul(HARD_DROP_POINTS)
    } else {
        cells.saturating_mul(SOFT_DROP_POINTS)
    }
}

/// Level for a lines-cleared total
/// Levels are 1-based and step up every `LINES_PER_LEVEL` lines
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level (in milliseconds)
/// Starts from the difficulty's base interval, speeds up by
/// `GRAVITY_STEP_MS` per level gained, and never goes below
/// `GRAVITY_FLOOR_MS`
pub fn gravity_interval_ms(level: u32, difficulty: Difficulty) -> u32 {
    let speedup = GRAVITY_STEP_MS.saturating_mul(level.saturating_sub(1));
    difficulty
        .base_gravity_ms()
        .saturating_sub(speedup)
        .max(GRAVITY_FLOOR_MS)
}
