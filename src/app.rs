//! Application shell: screen state machine over the game session, the
//! renderer views and the persistence stores.
//!
//! The shell owns every screen transition; `main` only pumps terminal
//! events and the fixed tick into it.

use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::session::GameSession;
use crate::input::{handle_key_event, should_quit, InputHandler};
use crate::store::{HighScoreStore, SettingsStore, StatsStore};
use crate::term::game_view::{GameView, ViewOptions, Viewport};
use crate::term::theme::{palette, Palette};
use crate::term::{screens, FrameBuffer};
use crate::types::{Difficulty, GameAction, Theme};

/// Longest name the high score entry accepts.
const MAX_NAME_LEN: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    Paused,
    GameOver,
    HighScores,
    Statistics,
    HighScoreEntry,
    Settings,
}

pub struct App {
    session: GameSession,
    input: InputHandler,
    view: GameView,
    settings: SettingsStore,
    high_scores: HighScoreStore,
    stats: StatsStore,
    screen: Screen,
    /// Difficulty for the next game. Seeded from the CLI or the settings
    /// file; follows settings edits.
    difficulty: Difficulty,
    menu_index: usize,
    settings_index: usize,
    name_buffer: String,
    quit: bool,
}

impl App {
    pub fn new(seed: u32, difficulty_override: Option<Difficulty>, data_dir: &Path) -> Self {
        let settings = SettingsStore::open(data_dir);
        let difficulty = difficulty_override.unwrap_or_else(|| settings.settings().difficulty());
        Self {
            session: GameSession::new(seed, difficulty),
            input: InputHandler::new(),
            view: GameView::default(),
            settings,
            high_scores: HighScoreStore::open(data_dir),
            stats: StatsStore::open(data_dir),
            screen: Screen::Menu,
            difficulty,
            menu_index: 0,
            settings_index: 0,
            name_buffer: String::new(),
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Advance time. Gravity and key auto-repeat only run while playing;
    /// every other screen sits still between key presses.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.screen != Screen::Playing {
            return;
        }
        for action in self.input.update(elapsed_ms) {
            self.session.apply(action);
        }
        self.session.tick(elapsed_ms);
        self.sync_game_over();
    }

    pub fn key_press(&mut self, key: KeyEvent) {
        if is_ctrl_c(key) {
            self.quit = true;
            return;
        }
        match self.screen {
            Screen::Menu => self.menu_key(key),
            Screen::Playing => self.playing_key(key),
            Screen::Paused => self.paused_key(key),
            Screen::GameOver => self.game_over_key(key),
            Screen::HighScores | Screen::Statistics => self.browse_key(key),
            Screen::HighScoreEntry => self.entry_key(key),
            Screen::Settings => self.settings_key(key),
        }
    }

    pub fn key_release(&mut self, key: KeyEvent) {
        if self.screen == Screen::Playing {
            if let Some(action) = handle_key_event(key) {
                self.input.handle_release(action);
            }
        }
    }

    pub fn render_into(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        let palette = palette(self.settings.settings().theme());
        match self.screen {
            Screen::Menu => {
                fb.resize(viewport.width, viewport.height);
                screens::draw_menu(fb, &palette, self.menu_index);
            }
            Screen::Playing => self.render_game(&palette, viewport, fb),
            Screen::Paused => {
                self.render_game(&palette, viewport, fb);
                screens::draw_pause_overlay(fb, &palette);
            }
            Screen::GameOver => {
                self.render_game(&palette, viewport, fb);
                screens::draw_game_over_overlay(fb, &palette, self.session.score());
            }
            Screen::HighScores => {
                fb.resize(viewport.width, viewport.height);
                screens::draw_high_scores(fb, &palette, self.high_scores.scores());
            }
            Screen::Statistics => {
                fb.resize(viewport.width, viewport.height);
                screens::draw_statistics(fb, &palette, self.stats.stats());
            }
            Screen::HighScoreEntry => {
                fb.resize(viewport.width, viewport.height);
                screens::draw_high_score_entry(
                    fb,
                    &palette,
                    self.session.score(),
                    &self.name_buffer,
                );
            }
            Screen::Settings => {
                fb.resize(viewport.width, viewport.height);
                screens::draw_settings(
                    fb,
                    &palette,
                    self.settings.settings(),
                    self.settings_index,
                );
            }
        }
    }

    fn render_game(&self, palette: &Palette, viewport: Viewport, fb: &mut FrameBuffer) {
        let s = self.settings.settings();
        let opts = ViewOptions {
            show_ghost: s.show_ghost_piece,
            show_next: s.show_next_piece,
            show_grid: s.show_grid,
        };
        self.view
            .render_into(&self.session, palette, opts, viewport, fb);
    }

    fn start_game(&mut self) {
        self.stats.start_session();
        self.input.reset();
        self.session.start(self.difficulty);
        self.screen = if self.session.is_game_over() {
            Screen::GameOver
        } else {
            Screen::Playing
        };
    }

    /// Fold a finished game into the statistics exactly once, on the
    /// transition out of Playing.
    fn sync_game_over(&mut self) {
        if self.screen != Screen::Playing || !self.session.is_game_over() {
            return;
        }
        self.input.reset();
        self.screen = Screen::GameOver;
        // A failed save never interrupts play; the counters stay current
        // in memory.
        let _ = self.stats.record_game(
            self.session.score(),
            self.session.level(),
            self.session.lines_cleared(),
            self.session.played_ms() / 1000,
            self.session.difficulty(),
        );
    }

    fn menu_key(&mut self, key: KeyEvent) {
        if should_quit(key) {
            self.quit = true;
            return;
        }
        let len = screens::MENU_ITEMS.len();
        match key.code {
            KeyCode::Up => self.menu_index = (self.menu_index + len - 1) % len,
            KeyCode::Down => self.menu_index = (self.menu_index + 1) % len,
            KeyCode::Enter => match self.menu_index {
                0 => self.start_game(),
                1 => self.screen = Screen::HighScores,
                2 => self.screen = Screen::Statistics,
                3 => {
                    self.settings_index = 0;
                    self.screen = Screen::Settings;
                }
                _ => self.quit = true,
            },
            KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    fn playing_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            // Abandoned games are not recorded.
            self.input.reset();
            self.screen = Screen::Menu;
            return;
        }
        let Some(action) = handle_key_event(key) else {
            return;
        };
        if action == GameAction::Pause {
            self.input.reset();
            self.screen = Screen::Paused;
            return;
        }
        if let Some(action) = self.input.handle_press(action) {
            self.session.apply(action);
        }
        self.sync_game_over();
    }

    fn paused_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('p') | KeyCode::Char('P') => self.screen = Screen::Playing,
            KeyCode::Esc => self.screen = Screen::Menu,
            _ => {}
        }
    }

    fn game_over_key(&mut self, key: KeyEvent) {
        if should_quit(key) {
            self.quit = true;
            return;
        }
        match key.code {
            KeyCode::Char(' ') => {
                if self.high_scores.is_high_score(self.session.score()) {
                    self.name_buffer.clear();
                    self.screen = Screen::HighScoreEntry;
                } else {
                    self.start_game();
                }
            }
            KeyCode::Esc => self.screen = Screen::Menu,
            _ => {}
        }
    }

    fn browse_key(&mut self, key: KeyEvent) {
        if should_quit(key) {
            self.quit = true;
            return;
        }
        if key.code == KeyCode::Esc {
            self.screen = Screen::Menu;
        }
    }

    fn entry_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if !self.name_buffer.trim().is_empty() {
                    let _ = self.high_scores.add_score(
                        &self.name_buffer,
                        self.session.score(),
                        self.session.level(),
                        self.session.lines_cleared(),
                    );
                    self.screen = Screen::Menu;
                }
            }
            KeyCode::Esc => self.screen = Screen::Menu,
            KeyCode::Backspace => {
                self.name_buffer.pop();
            }
            KeyCode::Char(c) => {
                if !c.is_control() && self.name_buffer.chars().count() < MAX_NAME_LEN {
                    self.name_buffer.push(c);
                }
            }
            _ => {}
        }
    }

    fn settings_key(&mut self, key: KeyEvent) {
        if should_quit(key) {
            self.quit = true;
            return;
        }
        let len = screens::SETTINGS_ITEM_COUNT;
        match key.code {
            KeyCode::Up => self.settings_index = (self.settings_index + len - 1) % len,
            KeyCode::Down => self.settings_index = (self.settings_index + 1) % len,
            KeyCode::Left => self.adjust_setting(false),
            KeyCode::Right => self.adjust_setting(true),
            KeyCode::Enter => match self.settings_index {
                0 | 1 | 2 => self.adjust_setting(true),
                3 => {
                    let _ = self.settings.reset();
                    self.difficulty = self.settings.settings().difficulty();
                }
                _ => self.screen = Screen::Menu,
            },
            KeyCode::Esc => self.screen = Screen::Menu,
            _ => {}
        }
    }

    /// Cycle or toggle the selected settings row and persist the change.
    fn adjust_setting(&mut self, forward: bool) {
        let s = self.settings.settings_mut();
        match self.settings_index {
            0 => {
                let d = if forward {
                    s.difficulty().next()
                } else {
                    s.difficulty().prev()
                };
                s.set_difficulty(d);
                self.difficulty = d;
            }
            1 => s.show_ghost_piece = !s.show_ghost_piece,
            2 => {
                let t: Theme = if forward { s.theme().next() } else { s.theme().prev() };
                s.set_theme(t);
            }
            _ => return,
        }
        let _ = self.settings.save();
    }
}

fn is_ctrl_c(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}
