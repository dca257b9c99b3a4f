//! Full-screen views: menu, settings, high scores, statistics, name entry,
//! plus the pause and game over overlays painted over a rendered game.
//!
//! Painters only push cells; input handling and screen transitions live in
//! the application loop.

use crate::fb::FrameBuffer;
use crate::store::{format_duration, GameStats, ScoreEntry, Settings};
use crate::theme::Palette;
use crate::types::Difficulty;

/// Main menu entries, in display order.
pub const MENU_ITEMS: [&str; 5] = ["Start", "High Scores", "Statistics", "Settings", "Exit"];

/// Number of rows on the settings screen, including Reset and Back.
pub const SETTINGS_ITEM_COUNT: usize = 5;

pub fn draw_menu(fb: &mut FrameBuffer, palette: &Palette, selected: usize) {
    fb.clear(palette.blank());
    let h = fb.height();

    fb.put_str_centered(h / 6, "Blockfall", palette.highlight_style());

    let y0 = h / 3;
    for (i, item) in MENU_ITEMS.iter().enumerate() {
        let style = if i == selected {
            palette.highlight_style()
        } else {
            palette.text_style()
        };
        fb.put_str_centered(y0 + 2 * i as u16, item, style);
    }

    let hints = [
        "Use ↑↓ to navigate",
        "Press ENTER to select",
        "Press ESC to quit",
    ];
    for (i, hint) in hints.iter().enumerate() {
        fb.put_str_centered(h.saturating_sub(4) + i as u16, hint, palette.muted_style());
    }
}

pub fn draw_settings(fb: &mut FrameBuffer, palette: &Palette, settings: &Settings, selected: usize) {
    fb.clear(palette.blank());
    let h = fb.height();

    fb.put_str_centered(h / 6, "Settings", palette.highlight_style());

    let on_off = |v: bool| if v { "On" } else { "Off" };
    let items = [
        format!("Difficulty: {}", settings.difficulty().label()),
        format!("Ghost Piece: {}", on_off(settings.show_ghost_piece)),
        format!("Theme: {}", settings.theme().label()),
        "Reset".to_string(),
        "Back".to_string(),
    ];

    let y0 = h / 3;
    for (i, item) in items.iter().enumerate() {
        let style = if i == selected {
            palette.highlight_style()
        } else {
            palette.text_style()
        };
        fb.put_str_centered(y0 + 2 * i as u16, item, style);
    }

    let hints = [
        "Use ↑↓ to navigate",
        "Use ←→ to adjust",
        "Press ENTER to confirm",
        "Press ESC to return",
    ];
    for (i, hint) in hints.iter().enumerate() {
        fb.put_str_centered(h.saturating_sub(5) + i as u16, hint, palette.muted_style());
    }
}

/// Column offsets within the 50-wide score table.
const TABLE_W: u16 = 50;
const COLS: [u16; 6] = [0, 6, 18, 26, 33, 40];
const HEADERS: [&str; 6] = ["Rank", "Player", "Score", "Level", "Lines", "Date"];

pub fn draw_high_scores(fb: &mut FrameBuffer, palette: &Palette, scores: &[ScoreEntry]) {
    fb.clear(palette.blank());
    let h = fb.height();
    let table_x = fb.width().saturating_sub(TABLE_W) / 2;

    fb.put_str_centered(1, "High Scores", palette.highlight_style());

    for (i, header) in HEADERS.iter().enumerate() {
        fb.put_str(table_x + COLS[i], 3, header, palette.muted_style());
    }

    for (i, entry) in scores.iter().take(10).enumerate() {
        // Top entry stands out.
        let style = if i == 0 {
            palette.highlight_style()
        } else {
            palette.text_style()
        };
        let y = 5 + i as u16;
        fb.put_str(table_x + COLS[0], y, &format!("#{}", i + 1), style);
        let name: String = entry.name.chars().take(10).collect();
        fb.put_str(table_x + COLS[1], y, &name, style);
        fb.put_str(table_x + COLS[2], y, &entry.score.to_string(), style);
        fb.put_str(table_x + COLS[3], y, &entry.level.to_string(), style);
        fb.put_str(table_x + COLS[4], y, &entry.lines.to_string(), style);
        let date = entry.date.get(..10).unwrap_or(&entry.date);
        fb.put_str(table_x + COLS[5], y, date, style);
    }

    fb.put_str_centered(h.saturating_sub(2), "Press ESC to return", palette.muted_style());
}

pub fn draw_statistics(fb: &mut FrameBuffer, palette: &Palette, stats: &GameStats) {
    fb.clear(palette.blank());
    let h = fb.height();
    let x = fb.width().saturating_sub(36) / 2;

    fb.put_str_centered(1, "Statistics", palette.highlight_style());

    let items = [
        format!("Total Games: {}", stats.total_games),
        format!("Total Play Time: {}", format_duration(stats.total_play_time)),
        format!("Total Lines: {}", stats.total_lines_cleared),
        format!("Total Score: {}", stats.total_score),
        format!("Highest Score: {}", stats.highest_score),
        format!("Highest Level: {}", stats.highest_level),
        format!("Most Lines: {}", stats.most_lines_cleared),
        format!("Average Score: {}", stats.average_score()),
        format!("Average Lines: {:.1}", stats.average_lines()),
        format!("Avg Session: {:.1}s", stats.average_session_secs()),
    ];
    for (i, item) in items.iter().enumerate() {
        fb.put_str(x, 3 + i as u16, item, palette.text_style());
    }

    fb.put_str(x, 14, "Difficulty Distribution:", palette.muted_style());
    for (i, d) in Difficulty::ALL.iter().enumerate() {
        let line = format!("{}: {} games", d.label(), stats.games_for(*d));
        fb.put_str(x + 2, 15 + i as u16, &line, palette.text_style());
    }

    fb.put_str_centered(h.saturating_sub(2), "Press ESC to return", palette.muted_style());
}

pub fn draw_high_score_entry(fb: &mut FrameBuffer, palette: &Palette, score: u32, name: &str) {
    fb.clear(palette.blank());
    let base = fb.height() / 2;

    fb.put_str_centered(base.saturating_sub(7), "New High Score!", palette.highlight_style());
    fb.put_str_centered(
        base.saturating_sub(4),
        &format!("Score: {score}"),
        palette.text_style(),
    );
    fb.put_str_centered(
        base.saturating_sub(2),
        "Enter your name:",
        palette.text_style(),
    );

    let box_w: u16 = 24;
    let box_x = fb.width().saturating_sub(box_w) / 2;
    fb.draw_box(box_x, base, box_w, 3, palette.border_style());
    // Trailing underscore doubles as the cursor.
    fb.put_str_centered(base + 1, &format!("{name}_"), palette.text_style());

    fb.put_str_centered(
        base + 5,
        "Press ENTER to confirm, ESC to cancel",
        palette.muted_style(),
    );
}

pub fn draw_pause_overlay(fb: &mut FrameBuffer, palette: &Palette) {
    let (box_w, box_h): (u16, u16) = (26, 5);
    let x = fb.width().saturating_sub(box_w) / 2;
    let y = fb.height().saturating_sub(box_h) / 2;

    fb.fill_rect(x, y, box_w, box_h, ' ', palette.text_style());
    fb.draw_box(x, y, box_w, box_h, palette.border_style());

    let mut title = palette.text_style();
    title.bold = true;
    fb.put_str_centered(y + 1, "Paused", title);
    fb.put_str_centered(y + 3, "Press P to resume", palette.text_style());
}

pub fn draw_game_over_overlay(fb: &mut FrameBuffer, palette: &Palette, score: u32) {
    let (box_w, box_h): (u16, u16) = (30, 7);
    let x = fb.width().saturating_sub(box_w) / 2;
    let y = fb.height().saturating_sub(box_h) / 2;

    fb.fill_rect(x, y, box_w, box_h, ' ', palette.text_style());
    fb.draw_box(x, y, box_w, box_h, palette.border_style());

    fb.put_str_centered(y + 1, "Game Over", palette.alert_style());
    fb.put_str_centered(y + 3, &format!("Final Score: {score}"), palette.text_style());
    fb.put_str_centered(y + 4, "Press SPACE to continue", palette.muted_style());
    fb.put_str_centered(y + 5, "Press ESC for menu", palette.muted_style());
}
