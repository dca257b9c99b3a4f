//! Game session module - ties the board to timing, scoring, and progression
//!
//! The session owns a [`Board`] and drives it from elapsed wall time:
//! gravity pulls the current piece down one row per interval, a piece that
//! cannot fall locks in place, and line clears feed score, lines, level,
//! and gravity speed. Player input reaches the board through
//! [`GameSession::apply`].
//!
//! Pausing and screen changes live with the caller; a session only knows
//! about time it is actually given.

use crate::board::{Board, SpawnResult};
use crate::scoring::{drop_points, gravity_interval_ms, level_for_lines, line_points};
use crate::types::{Difficulty, GameAction};

/// One run of the game, from first spawn to top-out
pub struct GameSession {
    board: Board,
    difficulty: Difficulty,
    score: u32,
    level: u32,
    lines_cleared: u32,
    fall_interval_ms: u32,
    fall_timer_ms: u32,
    played_ms: u64,
    game_over: bool,
}

impl GameSession {
    /// Create a session with the given RNG seed. No piece exists until
    /// [`GameSession::start`] is called.
    pub fn new(seed: u32, difficulty: Difficulty) -> Self {
        Self::with_board(Board::new(seed), difficulty)
    }

    /// Create a session around an existing board (scripted piece sources
    /// plug in here)
    pub fn with_board(board: Board, difficulty: Difficulty) -> Self {
        Self {
            board,
            difficulty,
            score: 0,
            level: 1,
            lines_cleared: 0,
            fall_interval_ms: gravity_interval_ms(1, difficulty),
            fall_timer_ms: 0,
            played_ms: 0,
            game_over: false,
        }
    }

    /// Begin a fresh run at the given difficulty: empty board, zeroed
    /// counters, first piece spawned. The piece sequence continues from
    /// where the previous run left off.
    pub fn start(&mut self, difficulty: Difficulty) {
        self.board.reset();
        self.difficulty = difficulty;
        self.score = 0;
        self.level = 1;
        self.lines_cleared = 0;
        self.fall_interval_ms = gravity_interval_ms(1, difficulty);
        self.fall_timer_ms = 0;
        self.played_ms = 0;
        self.game_over = self.board.spawn_next() == SpawnResult::GameOver;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Current gravity interval in milliseconds
    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    /// Active play time in milliseconds (time passed to [`GameSession::tick`])
    pub fn played_ms(&self) -> u64 {
        self.played_ms
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Advance time by `elapsed_ms`. Each time the accumulated time crosses
    /// the gravity interval the piece falls one row; a piece that cannot
    /// fall locks instead.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.game_over {
            return;
        }
        self.played_ms += u64::from(elapsed_ms);
        self.fall_timer_ms += elapsed_ms;
        if self.fall_timer_ms >= self.fall_interval_ms {
            self.fall_timer_ms = 0;
            if !self.board.try_move(0, 1) {
                self.lock_and_respawn();
            }
        }
    }

    /// Apply a player action. Returns whether the action changed anything.
    ///
    /// A soft drop that cannot move scores nothing and does not lock; only
    /// gravity and hard drops lock a piece. `Pause` is a mode change owned
    /// by the caller and is never consumed here.
    pub fn apply(&mut self, action: GameAction) -> bool {
        if self.game_over {
            return false;
        }
        match action {
            GameAction::MoveLeft => self.board.try_move(-1, 0),
            GameAction::MoveRight => self.board.try_move(1, 0),
            GameAction::RotateCw => self.board.try_rotate(),
            GameAction::SoftDrop => {
                let moved = self.board.try_move(0, 1);
                if moved {
                    self.score = self.score.saturating_add(drop_points(1, false));
                }
                moved
            }
            GameAction::HardDrop => {
                let mut cells: u32 = 0;
                while self.board.try_move(0, 1) {
                    cells += 1;
                }
                self.score = self.score.saturating_add(drop_points(cells, true));
                self.lock_and_respawn();
                true
            }
            GameAction::Pause => false,
        }
    }

    /// Lock the current piece, bank any cleared lines, and spawn the next
    /// piece. Line points use the level in effect when the piece locked;
    /// the level-up (and faster gravity) applies from the next piece on.
    fn lock_and_respawn(&mut self) {
        let cleared = self.board.lock_current();
        if cleared > 0 {
            self.score = self
                .score
                .saturating_add(line_points(cleared, self.level, self.difficulty));
            self.lines_cleared += cleared as u32;
            self.level = level_for_lines(self.lines_cleared);
            self.fall_interval_ms = gravity_interval_ms(self.level, self.difficulty);
        }
        if self.board.spawn_next() == SpawnResult::GameOver {
            self.game_over = true;
        }
    }
}
