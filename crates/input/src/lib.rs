//! Terminal input: key mapping and horizontal auto-repeat.
//!
//! Maps `crossterm` key events into [`KeyCommand`]s and provides the held-key
//! auto-repeat used for horizontal movement, with a fallback for terminals
//! that never report key releases.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::AutoRepeat;
pub use map::{map_key, should_quit};

use crate::types::GameAction;

/// What a key press asks the runner to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Forward to the game state.
    Action(GameAction),
    /// Suspend or resume ticking.
    Pause,
    /// Leave the game.
    Quit,
}
