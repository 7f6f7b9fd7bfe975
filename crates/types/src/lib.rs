//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no I/O, so they are usable from the core
//! logic, the input layer and the terminal renderer alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 12 columns (indexed 0-11)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Drop interval at level 1 |
//! | `DROP_INTERVAL_FACTOR` | 0.9 | Drop interval multiplier per level-up |
//! | `AUTO_REPEAT_MS` | 100 | Held-key horizontal repeat interval |
//! | `COUNTDOWN_SECS` | 3 | Countdown before the first piece spawns |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Cell, GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece: PieceKind = "t".parse().unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(Cell::Occupied(piece).tag(), 1);
//!
//! let action: GameAction = "hardDrop".parse().unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 12);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Board width in cells (12 columns)
pub const BOARD_WIDTH: u8 = 12;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Drop interval at the start of a game (1000ms = 1 second per row)
pub const BASE_DROP_MS: f64 = 1000.0;

/// Multiplier applied to the drop interval on every level-up.
pub const DROP_INTERVAL_FACTOR: f64 = 0.9;

/// Level a new game starts at.
pub const START_LEVEL: u32 = 1;

/// Cleared lines needed per level-up.
pub const LINES_PER_LEVEL: u32 = 10;

/// Points awarded for each cleared row.
pub const SCORE_PER_LINE: u32 = 10;

/// Interval between repeated horizontal moves while a direction key is held.
pub const AUTO_REPEAT_MS: u32 = 100;

/// Seconds counted down before the first piece of a session spawns.
pub const COUNTDOWN_SECS: u32 = 3;

/// Error returned when parsing one of the string-encoded types fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown piece kind: {0:?} (expected one of I, O, T, S, Z, J, L)")]
    PieceKind(String),
    #[error("unknown game action: {0:?}")]
    GameAction(String),
}

/// The seven tetromino piece kinds
///
/// Each kind carries a fixed tag in `1..=7`. The tag is only used to encode a
/// board as a `u8` grid and to pick a colour when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in spawn-selection order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Colour tag of this kind (never 0).
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::T.tag(), 1);
    /// assert_eq!(PieceKind::Z.tag(), 7);
    /// ```
    pub fn tag(self) -> u8 {
        match self {
            PieceKind::T => 1,
            PieceKind::O => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::I => 5,
            PieceKind::S => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::tag`].
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(PieceKind::T),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::J),
            5 => Some(PieceKind::I),
            6 => Some(PieceKind::S),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase letter for display.
    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PieceKind {
    type Err = ParseError;

    /// Parse piece kind from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "i" => Ok(PieceKind::I),
            "o" => Ok(PieceKind::O),
            "t" => Ok(PieceKind::T),
            "s" => Ok(PieceKind::S),
            "z" => Ok(PieceKind::Z),
            "j" => Ok(PieceKind::J),
            "l" => Ok(PieceKind::L),
            _ => Err(ParseError::PieceKind(s.to_string())),
        }
    }
}

/// A cell on the game board or inside a piece shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(PieceKind),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_occupied(self) -> bool {
        !self.is_empty()
    }

    /// `0` for empty, otherwise the occupying kind's tag.
    pub fn tag(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Occupied(kind) => kind.tag(),
        }
    }

    pub fn kind(self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(kind) => Some(kind),
        }
    }
}

/// Direction of a 90° rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// The direction that undoes this one.
    ///
    /// ```
    /// use blockfall_types::RotationDirection;
    ///
    /// assert_eq!(
    ///     RotationDirection::Clockwise.inverse(),
    ///     RotationDirection::CounterClockwise
    /// );
    /// ```
    pub fn inverse(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// These actions are produced by the input layer. Pausing is not
/// an action: it only withholds ticks and lives in the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down, locking it if it cannot move
    SoftDrop,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Hold current piece (once per spawned piece)
    Hold,
    /// Reset all state and start a new game
    Restart,
}

impl GameAction {
    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Restart => "restart",
        }
    }
}

impl FromStr for GameAction {
    type Err = ParseError;

    /// Parse action from its camelCase name (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "moveleft" => Ok(GameAction::MoveLeft),
            "moveright" => Ok(GameAction::MoveRight),
            "softdrop" => Ok(GameAction::SoftDrop),
            "harddrop" => Ok(GameAction::HardDrop),
            "rotatecw" => Ok(GameAction::RotateCw),
            "rotateccw" => Ok(GameAction::RotateCcw),
            "hold" => Ok(GameAction::Hold),
            "restart" => Ok(GameAction::Restart),
            _ => Err(ParseError::GameAction(s.to_string())),
        }
    }
}

/// Notification raised by the core for the UI layers.
///
/// Events are queued in the order they happen and drained by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoreEvent {
    /// One lock removed `rows` full rows.
    LinesCleared {
        rows: u32,
        total_lines: u32,
        score: u32,
    },
    /// The level went up; the drop interval has already been shortened.
    LevelUp { level: u32, drop_interval_ms: f64 },
    /// A freshly spawned piece collided; the session is over.
    GameOver,
}
