//! Key mapping from terminal events to commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};

use crate::types::GameAction;
use crate::KeyCommand;

/// Map keyboard input to a command.
pub fn map_key(key: KeyEvent) -> Option<KeyCommand> {
    if should_quit(key) {
        return Some(KeyCommand::Quit);
    }

    let action = match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => GameAction::MoveLeft,
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => GameAction::MoveRight,

        // Rotation
        KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('X') => GameAction::RotateCw,
        KeyCode::Down | KeyCode::Char('z') | KeyCode::Char('Z') => GameAction::RotateCcw,

        // Drops
        KeyCode::Char('0') | KeyCode::Char('s') | KeyCode::Char('S') => GameAction::SoftDrop,
        KeyCode::Char(' ') => GameAction::HardDrop,

        // Hold
        KeyCode::Char('c')
        | KeyCode::Char('C')
        | KeyCode::Modifier(ModifierKeyCode::LeftShift)
        | KeyCode::Modifier(ModifierKeyCode::RightShift) => GameAction::Hold,

        KeyCode::Char('r') | KeyCode::Char('R') => GameAction::Restart,

        KeyCode::Char('p') | KeyCode::Char('P') => return Some(KeyCommand::Pause),

        _ => return None,
    };

    Some(KeyCommand::Action(action))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
