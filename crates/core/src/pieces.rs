//! Pieces module - tetromino catalog and in-place matrix rotation
//!
//! Every piece is a square occupancy grid (side 2, 3 or 4) together with its
//! kind. Rotation is a transpose followed by either a per-row reversal
//! (clockwise) or a reversal of the row order (counter-clockwise).

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, RotationDirection};

/// Largest side length of any piece grid (the I piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Offset of a single mino relative to the shape's top-left corner
pub type MinoOffset = (i8, i8);

/// A square piece grid plus the kind that fills it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: PieceKind,
    size: u8,
    /// Row-major occupancy, `grid[y][x]`; only the top-left `size` x `size`
    /// block is meaningful.
    grid: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    fn from_rows<const N: usize>(kind: PieceKind, rows: [[u8; N]; N]) -> Self {
        let mut grid = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                grid[y][x] = v != 0;
            }
        }
        Self {
            kind,
            size: N as u8,
            grid,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Side length of the square grid.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Width of the grid (equal to its height).
    pub fn width(&self) -> u8 {
        self.size
    }

    /// Cell at local `(x, y)`; out-of-grid coordinates read as empty.
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        let size = self.size as usize;
        if x < size && y < size && self.grid[y][x] {
            Cell::Occupied(self.kind)
        } else {
            Cell::Empty
        }
    }

    /// Local offsets of the four occupied cells, row by row.
    pub fn minos(&self) -> ArrayVec<MinoOffset, 4> {
        let size = self.size as usize;
        let mut out = ArrayVec::new();
        for y in 0..size {
            for x in 0..size {
                if self.grid[y][x] {
                    out.push((x as i8, y as i8));
                }
            }
        }
        out
    }

    /// Rotate 90° in place.
    pub fn rotate(&mut self, direction: RotationDirection) {
        let size = self.size as usize;

        for y in 0..size {
            for x in 0..y {
                let tmp = self.grid[x][y];
                self.grid[x][y] = self.grid[y][x];
                self.grid[y][x] = tmp;
            }
        }

        match direction {
            RotationDirection::Clockwise => {
                for row in self.grid.iter_mut().take(size) {
                    row[..size].reverse();
                }
            }
            RotationDirection::CounterClockwise => {
                self.grid[..size].reverse();
            }
        }
    }

    /// Copy of this shape rotated once.
    pub fn rotated(mut self, direction: RotationDirection) -> Self {
        self.rotate(direction);
        self
    }
}

/// Canonical spawn-orientation grid for a piece kind.
pub fn create_piece(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::T => Shape::from_rows(kind, [[0, 0, 0], [1, 1, 1], [0, 1, 0]]),
        PieceKind::O => Shape::from_rows(kind, [[1, 1], [1, 1]]),
        PieceKind::L => Shape::from_rows(kind, [[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
        PieceKind::J => Shape::from_rows(kind, [[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
        PieceKind::I => Shape::from_rows(
            kind,
            [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
        ),
        PieceKind::S => Shape::from_rows(kind, [[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
        PieceKind::Z => Shape::from_rows(kind, [[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
    }
}
