//! Terminal rendering layer.
//!
//! Renders into a plain framebuffer of styled cells which a diffing
//! renderer flushes to the terminal. No widget toolkit: a falling-block
//! game wants precise cell control (2 columns per board cell) and cheap
//! per-frame updates.
//!
//! [`game_view`] and [`screens`] are pure cell-pushers and carry the unit
//! tests; [`renderer`] owns the terminal itself.

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod screens;
pub mod theme;

pub use blockfall_core as core;
pub use blockfall_store as store;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, ViewOptions, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use theme::{palette, piece_color, Palette};
