//! Game state module - owns the board, the active piece and progression
//!
//! This module ties together all core components: board, catalog, collision,
//! rotation correction, RNG and scoring. It is the only place where state is
//! mutated; every entry point runs to completion synchronously.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::board::Board;
use crate::collision::collide;
use crate::pieces::{create_piece, Shape};
use crate::rng::PieceGenerator;
use crate::rotation::correct_rotation;
use crate::scoring::Progression;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Lifecycle of the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No piece has been spawned since construction or the last reset.
    Ready,
    /// A live piece is falling.
    Falling,
    /// A freshly spawned piece collided; only a reset leaves this phase.
    GameOver,
}

/// Column where a shape of the given width spawns.
pub fn spawn_x(shape: &Shape) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (shape.width() / 2) as i8
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Place a shape at the top of the board, centered horizontally
    pub fn spawn(shape: Shape) -> Self {
        Self {
            x: spawn_x(&shape),
            y: 0,
            shape,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.shape.kind()
    }

    pub fn collides(&self, board: &Board) -> bool {
        collide(board, &self.shape, self.x, self.y)
    }

    /// Board coordinates of the four occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .minos()
            .into_iter()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    next: Option<Shape>,
    hold: Option<Shape>,
    has_held: bool,
    progression: Progression,
    drop_counter_ms: u32,
    phase: Phase,
    generator: PieceGenerator,
    /// Pending notifications, oldest first.
    events: Vec<CoreEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            hold: None,
            has_held: false,
            progression: Progression::new(),
            drop_counter_ms: 0,
            phase: Phase::Ready,
            generator: PieceGenerator::new(seed),
            events: Vec::new(),
        }
    }

    /// Spawn the first piece if nothing has been spawned yet
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        self.player_reset()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scripted setups and tests.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next(&self) -> Option<&Shape> {
        self.next.as_ref()
    }

    pub fn hold(&self) -> Option<&Shape> {
        self.hold.as_ref()
    }

    pub fn has_held(&self) -> bool {
        self.has_held
    }

    /// Whether a hold is currently allowed
    pub fn can_hold(&self) -> bool {
        self.phase == Phase::Falling && !self.has_held
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn score(&self) -> u32 {
        self.progression.score()
    }

    pub fn lines(&self) -> u32 {
        self.progression.lines()
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn drop_interval_ms(&self) -> f64 {
        self.progression.drop_interval_ms()
    }

    /// Time accumulated towards the next forced drop
    pub fn drop_counter_ms(&self) -> u32 {
        self.drop_counter_ms
    }

    pub fn seed(&self) -> u32 {
        self.generator.seed()
    }

    /// Replace the pending next piece.
    pub fn force_next(&mut self, kind: PieceKind) {
        self.next = Some(create_piece(kind));
    }

    /// Notifications raised since the last call, oldest first
    pub fn take_events(&mut self) -> Vec<CoreEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[CoreEvent] {
        &self.events
    }

    /// Reset everything to the values of a brand new game.
    ///
    /// The RNG keeps its position so the next game gets a fresh sequence.
    pub fn reset_game_state(&mut self) {
        self.board.clear();
        self.progression.reset();
        self.active = None;
        self.next = None;
        self.hold = None;
        self.has_held = false;
        self.drop_counter_ms = 0;
        self.phase = Phase::Ready;
        self.events.clear();
        info!("game state reset");
    }

    /// Promote the next piece (or a fresh one) to active and draw a new next piece.
    ///
    /// Returns false, and ends the game, if the new piece collides at its
    /// spawn position.
    pub fn player_reset(&mut self) -> bool {
        let shape = match self.next.take() {
            Some(shape) => shape,
            None => create_piece(self.generator.next_kind()),
        };
        self.next = Some(create_piece(self.generator.next_kind()));

        let piece = ActivePiece::spawn(shape);
        self.active = Some(piece);
        self.has_held = false;

        if piece.collides(&self.board) {
            self.phase = Phase::GameOver;
            self.events.push(CoreEvent::GameOver);
            info!(
                kind = %piece.kind(),
                score = self.progression.score(),
                lines = self.progression.lines(),
                "game over"
            );
            return false;
        }

        self.phase = Phase::Falling;
        debug!(kind = %piece.kind(), x = piece.x, "spawned piece");
        true
    }

    /// Shift the active piece horizontally by `dir` columns
    pub fn player_move(&mut self, dir: i8) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        piece.x = piece.x.saturating_add(dir);
        if piece.collides(&self.board) {
            return false;
        }

        self.active = Some(piece);
        true
    }

    /// Rotate the active piece, searching nearby columns if it overlaps
    pub fn player_rotate(&mut self, direction: RotationDirection) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        piece.shape.rotate(direction);
        match correct_rotation(&self.board, &piece.shape, piece.x, piece.y) {
            Some(x) => {
                piece.x = x;
                self.active = Some(piece);
                true
            }
            None => {
                debug!(kind = %piece.kind(), ?direction, "rotation rejected");
                false
            }
        }
    }

    /// Move the active piece down one row, locking it if it cannot move.
    ///
    /// Returns true if the piece locked.
    pub fn player_drop(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        piece.y += 1;
        let locked = if piece.collides(&self.board) {
            self.lock_active();
            true
        } else {
            self.active = Some(piece);
            false
        };

        self.drop_counter_ms = 0;
        locked
    }

    /// Drop the active piece to its lowest legal row and lock it
    pub fn hard_drop(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        while !piece.collides(&self.board) {
            piece.y += 1;
        }
        piece.y -= 1;

        self.active = Some(piece);
        self.lock_active();
        self.drop_counter_ms = 0;
        true
    }

    /// Bank the active piece, or swap it with the banked one.
    ///
    /// Allowed once per spawned piece.
    pub fn hold_piece(&mut self) -> bool {
        if !self.can_hold() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match self.hold.take() {
            None => {
                self.hold = Some(active.shape);
                self.player_reset();
            }
            Some(held) => {
                let swapped = ActivePiece::spawn(held);
                if swapped.collides(&self.board) {
                    self.hold = Some(held);
                    debug!(kind = %held.kind(), "hold swap rejected");
                    return false;
                }
                self.hold = Some(active.shape);
                self.active = Some(swapped);
            }
        }

        self.has_held = true;
        debug!(held = %active.kind(), "piece held");
        true
    }

    /// Merge the active piece, sweep full rows and spawn the next piece
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.merge(&piece.shape, piece.x, piece.y);
        debug!(kind = %piece.kind(), x = piece.x, y = piece.y, "piece locked");

        let rows = self.board.sweep_rows();
        if rows > 0 {
            let mut level_ups: ArrayVec<CoreEvent, { BOARD_HEIGHT as usize }> = ArrayVec::new();
            for _ in 0..rows {
                if let Some(level) = self.progression.record_line() {
                    level_ups.push(CoreEvent::LevelUp {
                        level,
                        drop_interval_ms: self.progression.drop_interval_ms(),
                    });
                }
            }

            self.events.push(CoreEvent::LinesCleared {
                rows,
                total_lines: self.progression.lines(),
                score: self.progression.score(),
            });
            info!(
                rows,
                lines = self.progression.lines(),
                score = self.progression.score(),
                "lines cleared"
            );

            for event in level_ups {
                if let CoreEvent::LevelUp {
                    level,
                    drop_interval_ms,
                } = event
                {
                    info!(level, drop_interval_ms, "level up");
                }
                self.events.push(event);
            }
        }

        self.player_reset();
    }

    /// Advance the drop timer; performs a drop once the interval is exceeded.
    ///
    /// Returns true if a drop happened.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }

        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if f64::from(self.drop_counter_ms) > self.progression.drop_interval_ms() {
            self.player_drop();
            return true;
        }

        false
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.player_move(-1),
            GameAction::MoveRight => self.player_move(1),
            GameAction::SoftDrop => {
                if self.phase != Phase::Falling {
                    return false;
                }
                self.player_drop();
                true
            }
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.player_rotate(RotationDirection::Clockwise),
            GameAction::RotateCcw => self.player_rotate(RotationDirection::CounterClockwise),
            GameAction::Hold => self.hold_piece(),
            GameAction::Restart => {
                self.reset_game_state();
                self.player_reset();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_tag_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next;
        out.hold = self.hold;
        out.can_hold = self.can_hold();
        out.phase = self.phase;
        out.score = self.progression.score();
        out.lines = self.progression.lines();
        out.level = self.progression.level();
        out.drop_interval_ms = self.progression.drop_interval_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
