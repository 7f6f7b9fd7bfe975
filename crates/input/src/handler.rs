//! Held-key auto-repeat for horizontal movement.
//!
//! Pressing Left or Right moves once immediately and then once every
//! `repeat_ms` while the key stays down. Terminals that never emit key
//! releases fall back to a timeout since the last press of the held key.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::types::{GameAction, AUTO_REPEAT_MS};

// Shorter than the repeat interval, so a single tap in a terminal without
// release events never turns into two moves.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 90;

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    fn from_key(code: KeyCode) -> Self {
        match code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => HorizontalDirection::Left,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => HorizontalDirection::Right,
            _ => HorizontalDirection::None,
        }
    }

    fn action(self) -> Option<GameAction> {
        match self {
            HorizontalDirection::Left => Some(GameAction::MoveLeft),
            HorizontalDirection::Right => Some(GameAction::MoveRight),
            HorizontalDirection::None => None,
        }
    }
}

/// Tracks the held direction and its repeat timer.
#[derive(Debug, Clone)]
pub struct AutoRepeat {
    held: HorizontalDirection,
    last_key_time: Instant,
    repeat_accumulator: u32,
    repeat_ms: u32,
    /// `None` when the terminal reports key releases.
    key_release_timeout_ms: Option<u32>,
}

impl AutoRepeat {
    pub fn new() -> Self {
        Self::with_repeat_ms(AUTO_REPEAT_MS)
    }

    pub fn with_repeat_ms(repeat_ms: u32) -> Self {
        Self {
            held: HorizontalDirection::None,
            last_key_time: Instant::now(),
            repeat_accumulator: 0,
            repeat_ms: repeat_ms.max(1),
            key_release_timeout_ms: Some(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
        }
    }

    /// Rely on real release events instead of the timeout.
    pub fn with_release_events(mut self) -> Self {
        self.key_release_timeout_ms = None;
        self
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = Some(timeout_ms);
        self
    }

    pub fn held(&self) -> HorizontalDirection {
        self.held
    }

    /// Returns the immediate move for a newly pressed direction key.
    ///
    /// Presses of the already-held direction (terminal key repeat) only keep
    /// the hold alive. Keys that are not horizontal movement return `None`.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let dir = HorizontalDirection::from_key(code);
        if dir == HorizontalDirection::None {
            return None;
        }

        self.last_key_time = Instant::now();
        if dir == self.held {
            return None;
        }

        self.held = dir;
        self.repeat_accumulator = 0;
        dir.action()
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        if HorizontalDirection::from_key(code) == self.held {
            self.release();
        }
    }

    /// Advance the repeat timer, returning the moves that fell due.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 16> {
        let mut actions = ArrayVec::new();

        if let Some(timeout) = self.key_release_timeout_ms {
            if self.last_key_time.elapsed() > Duration::from_millis(u64::from(timeout)) {
                self.release();
            }
        }

        let Some(action) = self.held.action() else {
            return actions;
        };

        self.repeat_accumulator = self.repeat_accumulator.saturating_add(elapsed_ms);
        while self.repeat_accumulator >= self.repeat_ms {
            let _ = actions.try_push(action);
            self.repeat_accumulator -= self.repeat_ms;
        }

        actions
    }

    pub fn reset(&mut self) {
        self.release();
        self.last_key_time = Instant::now();
    }

    fn release(&mut self) {
        self.held = HorizontalDirection::None;
        self.repeat_accumulator = 0;
    }
}

impl Default for AutoRepeat {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_moves_immediately_then_every_interval() {
        let mut ar = AutoRepeat::new().with_release_events();

        assert_eq!(ar.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));

        assert!(ar.update(99).is_empty());
        assert_eq!(ar.update(1).as_slice(), &[GameAction::MoveLeft]);
        assert_eq!(
            ar.update(200).as_slice(),
            &[GameAction::MoveLeft, GameAction::MoveLeft]
        );
    }

    #[test]
    fn test_release_stops_repeats() {
        let mut ar = AutoRepeat::new().with_release_events();

        ar.handle_key_press(KeyCode::Right);
        ar.handle_key_release(KeyCode::Right);
        assert!(ar.update(500).is_empty());
        assert_eq!(ar.held(), HorizontalDirection::None);
    }

    #[test]
    fn test_release_of_other_direction_is_ignored() {
        let mut ar = AutoRepeat::new().with_release_events();

        ar.handle_key_press(KeyCode::Right);
        ar.handle_key_release(KeyCode::Left);
        assert_eq!(ar.update(100).as_slice(), &[GameAction::MoveRight]);
    }

    #[test]
    fn test_opposite_direction_replaces_hold() {
        let mut ar = AutoRepeat::new().with_release_events();

        ar.handle_key_press(KeyCode::Left);
        ar.update(50);
        assert_eq!(ar.handle_key_press(KeyCode::Right), Some(GameAction::MoveRight));
        assert!(ar.update(50).is_empty(), "timer restarts on direction change");
        assert_eq!(ar.update(50).as_slice(), &[GameAction::MoveRight]);
    }

    #[test]
    fn test_terminal_repeat_press_does_not_double_move() {
        let mut ar = AutoRepeat::new().with_release_events();

        assert!(ar.handle_key_press(KeyCode::Left).is_some());
        assert_eq!(ar.handle_key_press(KeyCode::Left), None);
    }

    #[test]
    fn test_auto_release_without_release_events() {
        let mut ar = AutoRepeat::new().with_key_release_timeout_ms(50);

        ar.handle_key_press(KeyCode::Left);
        ar.last_key_time = Instant::now() - Duration::from_millis(51);

        assert!(ar.update(200).is_empty());
        assert_eq!(ar.held(), HorizontalDirection::None);
    }

    #[test]
    fn test_non_movement_keys_are_ignored() {
        let mut ar = AutoRepeat::new();
        assert_eq!(ar.handle_key_press(KeyCode::Up), None);
        assert_eq!(ar.handle_key_press(KeyCode::Char(' ')), None);
        assert_eq!(ar.held(), HorizontalDirection::None);
    }

    #[test]
    fn test_reset_stops_repeats() {
        let mut ar = AutoRepeat::new().with_release_events();
        ar.handle_key_press(KeyCode::Left);
        ar.reset();
        assert!(ar.update(1000).is_empty());
    }
}
