//! DAS/ARR auto-repeat for held movement keys.
//!
//! Most terminals never emit key-release events, so a hold is inferred
//! from the press stream and expires after a short timeout of silence.
//! Movement and soft drop repeat on their own DAS/ARR clocks; every other
//! action fires once per press.

use std::time::Instant;

use arrayvec::ArrayVec;

use crate::types::{
    GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS, SOFT_DROP_DAS_MS,
};

/// In terminals without key-release events, a short timeout prevents a
/// single tap from turning into a sustained "held" state.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// One held key's delayed-auto-shift clock.
#[derive(Debug, Clone, Copy)]
struct RepeatClock {
    das_ms: u32,
    arr_ms: u32,
    held_ms: u32,
    accumulator_ms: u32,
}

impl RepeatClock {
    fn new(das_ms: u32, arr_ms: u32) -> Self {
        Self {
            das_ms,
            arr_ms: arr_ms.max(1),
            held_ms: 0,
            accumulator_ms: 0,
        }
    }

    fn restart(&mut self) {
        self.held_ms = 0;
        self.accumulator_ms = 0;
    }

    /// Advance the clock, returning how many repeats fire. Only time past
    /// the DAS delay feeds the repeat accumulator.
    fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let before = self.held_ms;
        self.held_ms = self.held_ms.saturating_add(elapsed_ms);
        if self.held_ms < self.das_ms {
            return 0;
        }
        let excess = if before < self.das_ms {
            self.held_ms - self.das_ms
        } else {
            elapsed_ms
        };
        self.accumulator_ms += excess;
        let repeats = self.accumulator_ms / self.arr_ms;
        self.accumulator_ms %= self.arr_ms;
        repeats
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Held {
    Left,
    Right,
    None,
}

/// Tracks held movement state and produces auto-repeated actions.
#[derive(Debug, Clone)]
pub struct InputHandler {
    held: Held,
    soft_dropping: bool,
    last_press: Instant,
    horizontal: RepeatClock,
    vertical: RepeatClock,
    release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_ms: u32, arr_ms: u32) -> Self {
        Self {
            held: Held::None,
            soft_dropping: false,
            last_press: Instant::now(),
            horizontal: RepeatClock::new(das_ms, arr_ms),
            vertical: RepeatClock::new(SOFT_DROP_DAS_MS, SOFT_DROP_ARR_MS),
            release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.release_timeout_ms = timeout_ms;
        self
    }

    /// Feed a pressed action through the hold tracker.
    ///
    /// Returns the action to apply now, or None when the press is the
    /// terminal's own key repeat of a movement already being tracked.
    /// Non-movement actions pass straight through.
    pub fn handle_press(&mut self, action: GameAction) -> Option<GameAction> {
        match action {
            GameAction::MoveLeft => {
                self.last_press = Instant::now();
                if self.held == Held::Left {
                    return None;
                }
                self.held = Held::Left;
                self.horizontal.restart();
                Some(action)
            }
            GameAction::MoveRight => {
                self.last_press = Instant::now();
                if self.held == Held::Right {
                    return None;
                }
                self.held = Held::Right;
                self.horizontal.restart();
                Some(action)
            }
            GameAction::SoftDrop => {
                self.last_press = Instant::now();
                if self.soft_dropping {
                    return None;
                }
                self.soft_dropping = true;
                self.vertical.restart();
                Some(action)
            }
            _ => Some(action),
        }
    }

    /// Clear a hold when the terminal does report a key release.
    pub fn handle_release(&mut self, action: GameAction) {
        match action {
            GameAction::MoveLeft if self.held == Held::Left => self.held = Held::None,
            GameAction::MoveRight if self.held == Held::Right => self.held = Held::None,
            GameAction::SoftDrop => self.soft_dropping = false,
            _ => {}
        }
    }

    /// Advance the repeat clocks by `elapsed_ms` and collect the repeats
    /// due this frame.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 32> {
        let mut actions = ArrayVec::<GameAction, 32>::new();

        // No press within the timeout means the key is no longer held.
        let since_press = self.last_press.elapsed().as_millis() as u32;
        if since_press > self.release_timeout_ms {
            self.held = Held::None;
            self.soft_dropping = false;
        }

        let repeat = match self.held {
            Held::Left => Some(GameAction::MoveLeft),
            Held::Right => Some(GameAction::MoveRight),
            Held::None => None,
        };
        match repeat {
            Some(action) => {
                for _ in 0..self.horizontal.advance(elapsed_ms) {
                    let _ = actions.try_push(action);
                }
            }
            None => self.horizontal.restart(),
        }

        if self.soft_dropping {
            for _ in 0..self.vertical.advance(elapsed_ms) {
                let _ = actions.try_push(GameAction::SoftDrop);
            }
        } else {
            self.vertical.restart();
        }

        actions
    }

    /// Drop all held state (screen changes, pause).
    pub fn reset(&mut self) {
        self.held = Held::None;
        self.soft_dropping = false;
        self.last_press = Instant::now();
        self.horizontal.restart();
        self.vertical.restart();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn pinned(das_ms: u32, arr_ms: u32) -> InputHandler {
        // A large timeout keeps wall-clock time out of these tests.
        InputHandler::with_config(das_ms, arr_ms).with_key_release_timeout_ms(1_000_000)
    }

    #[test]
    fn test_first_press_fires_repeat_presses_do_not() {
        let mut ih = pinned(100, 25);

        assert_eq!(
            ih.handle_press(GameAction::MoveLeft),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(ih.handle_press(GameAction::MoveLeft), None);
    }

    #[test]
    fn test_das_delay_then_arr_repeats() {
        let mut ih = pinned(100, 25);
        ih.handle_press(GameAction::MoveLeft);

        // Before DAS expires: no repeats.
        assert!(ih.update(99).is_empty());
        // Exactly at DAS: still none (repeats need excess past the delay).
        assert!(ih.update(1).is_empty());
        // One ARR interval past DAS: one repeat.
        assert_eq!(ih.update(25).as_slice(), &[GameAction::MoveLeft]);
        assert_eq!(ih.update(25).as_slice(), &[GameAction::MoveLeft]);
        // A long frame fires every repeat that came due.
        assert_eq!(
            ih.update(50).as_slice(),
            &[GameAction::MoveLeft, GameAction::MoveLeft]
        );
    }

    #[test]
    fn test_direction_change_restarts_das() {
        let mut ih = pinned(100, 25);
        ih.handle_press(GameAction::MoveLeft);
        assert!(!ih.update(200).is_empty());

        assert_eq!(
            ih.handle_press(GameAction::MoveRight),
            Some(GameAction::MoveRight)
        );
        assert!(ih.update(99).is_empty());
        assert_eq!(ih.update(26).as_slice(), &[GameAction::MoveRight]);
    }

    #[test]
    fn test_soft_drop_repeats_without_initial_delay() {
        let mut ih = pinned(100, 25);
        assert_eq!(
            ih.handle_press(GameAction::SoftDrop),
            Some(GameAction::SoftDrop)
        );

        assert!(ih.update(49).is_empty());
        assert_eq!(ih.update(1).as_slice(), &[GameAction::SoftDrop]);
        assert_eq!(
            ih.update(100).as_slice(),
            &[GameAction::SoftDrop, GameAction::SoftDrop]
        );
    }

    #[test]
    fn test_release_stops_repeats() {
        let mut ih = pinned(100, 25);
        ih.handle_press(GameAction::MoveLeft);
        ih.handle_release(GameAction::MoveLeft);
        assert!(ih.update(500).is_empty());
    }

    #[test]
    fn test_auto_release_after_press_silence() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);
        ih.handle_press(GameAction::MoveLeft);

        // Simulate a terminal that stopped sending repeats 51ms ago.
        ih.last_press = Instant::now() - Duration::from_millis(51);
        assert!(ih.update(500).is_empty());
        assert_eq!(ih.held, Held::None);
    }

    #[test]
    fn test_one_shot_actions_pass_through_every_press() {
        let mut ih = pinned(100, 25);
        assert_eq!(
            ih.handle_press(GameAction::RotateCw),
            Some(GameAction::RotateCw)
        );
        assert_eq!(
            ih.handle_press(GameAction::RotateCw),
            Some(GameAction::RotateCw)
        );
        assert_eq!(
            ih.handle_press(GameAction::HardDrop),
            Some(GameAction::HardDrop)
        );
    }

    #[test]
    fn test_reset_clears_held_state() {
        let mut ih = pinned(100, 25);
        ih.handle_press(GameAction::MoveLeft);
        assert!(!ih.update(200).is_empty());

        ih.reset();
        assert!(ih.update(200).is_empty());
    }
}
