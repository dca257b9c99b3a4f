//! Terminal input - key mapping and hold auto-repeat.
//!
//! Independent of any UI framework. [`map`] turns `crossterm` key events
//! into [`crate::types::GameAction`]s, and [`handler::InputHandler`] adds
//! DAS/ARR auto-repeat for terminals without key-release events.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit};
