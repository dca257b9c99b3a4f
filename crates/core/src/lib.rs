//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the board simulation and the session driver built on
//! top of it. It has **zero dependencies** on UI or I/O, making it:
//!
//! - **Deterministic**: Same seed produces the identical piece sequence
//! - **Testable**: Piece sources are injected, so tests script exact games
//! - **Portable**: Can run in any environment (terminal, headless)
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision, rotation kicks, line clearing,
//!   and the ghost projection
//! - [`piece`]: Tetromino shapes, spawn placement, and clockwise rotation
//! - [`rng`]: The [`rng::PieceRng`] source trait with seeded and scripted
//!   implementations
//! - [`scoring`]: Line points, difficulty multipliers, level progression,
//!   gravity intervals
//! - [`session`]: Gravity timing, drop scoring, lock/respawn, top-out
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: Each piece is drawn independently from the
//!   seven kinds
//! - **Simple wall kicks**: A blocked rotation retries one cell left,
//!   right, up, up-left, and up-right, in that order
//! - **Ghost piece**: Shows where the current piece will land
//! - **Gravity**: Starts at the difficulty's base interval and speeds up
//!   50ms per level, never below 50ms
//! - **Scoring**: 100/300/500/800 per clear, scaled by level and
//!   difficulty; +1 per soft-dropped cell, +2 per hard-dropped cell
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_core::types::{Difficulty, GameAction};
//!
//! let mut game = GameSession::new(12345, Difficulty::Medium);
//! game.start(Difficulty::Medium);
//!
//! game.apply(GameAction::MoveRight);
//! game.apply(GameAction::RotateCw);
//! game.apply(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! Call [`GameSession::tick`](session::GameSession::tick) every frame with
//! the elapsed milliseconds; pause by simply not calling it.

pub mod board;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, SpawnResult};
pub use piece::{Piece, ShapeGrid};
pub use rng::{PieceRng, SequenceRng, SimpleRng};
pub use scoring::{drop_points, gravity_interval_ms, level_for_lines, line_points};
pub use session::GameSession;
