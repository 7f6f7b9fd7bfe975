//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, terminal, or audio, making it:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Testable**: Every rule is exercised without any rendering setup
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: 12x20 grid with merge and row sweeping
//! - [`pieces`]: the seven tetromino grids and matrix rotation
//! - [`collision`]: the single overlap/bounds predicate used everywhere
//! - [`rotation`]: zig-zag horizontal correction after a rotation
//! - [`game_state`]: active piece lifecycle, hold, locking and timing
//! - [`rng`]: uniform random piece selection
//! - [`scoring`]: score, lines, level and drop interval
//! - [`snapshot`]: read-only copies for the presentation layers
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every kind is equally likely on every spawn
//! - **Rotation correction**: no kick tables; nearby columns are probed
//!   at +1, -1, +2, -2, ... until the piece fits or the search gives up
//! - **Hold**: Store one piece for later use (once per piece)
//! - **Scoring**: 10 points per row; a level every 10 rows, each level
//!   shortening the drop interval by 10%
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{GameAction, PieceKind};
//!
//! let mut game = GameState::new(12345);
//! game.force_next(PieceKind::O);
//! game.start();
//! assert_eq!(game.active().unwrap().x, 5);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.board().is_occupied(6, 19));
//! assert_eq!(game.score(), 0);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) with elapsed
//! milliseconds; the piece drops one row whenever the accumulated time
//! exceeds the current drop interval (1000ms at level 1).

pub mod board;
pub mod collision;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::collide;
pub use game_state::{spawn_x, ActivePiece, GameState, Phase};
pub use pieces::{create_piece, Shape};
pub use rng::{PieceGenerator, SimpleRng};
pub use rotation::correct_rotation;
pub use scoring::Progression;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
