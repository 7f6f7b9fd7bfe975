use crate::board::TagGrid;
use crate::game_state::{ActivePiece, Phase};
use crate::pieces::Shape;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, START_LEVEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only copy of everything the presentation layers draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSnapshot {
    pub board: TagGrid,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<Shape>,
    pub hold: Option<Shape>,
    pub can_hold: bool,
    pub phase: Phase,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: f64,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: None,
            hold: None,
            can_hold: false,
            phase: Phase::Ready,
            score: 0,
            lines: 0,
            level: START_LEVEL,
            drop_interval_ms: crate::types::BASE_DROP_MS,
        }
    }
}
