//! Board module - manages the game grid
//!
//! The board is a 12x20 grid where each cell is either empty or occupied by a piece kind.
//! Rows are fixed-size arrays so the whole board lives inline without allocation.
//! Coordinates: (x, y) where x ranges 0..11 (left to right), y ranges 0..19 (top to bottom)

use crate::pieces::Shape;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// One board row.
pub type Row = [Cell; WIDTH];

/// Board encoded as colour tags (0 = empty, 1-7 = piece kind).
pub type TagGrid = [[u8; WIDTH]; HEIGHT];

/// The game board - 12 columns x 20 rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [Row; HEIGHT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            rows: [[Cell::Empty; WIDTH]; HEIGHT],
        }
    }

    /// Convert (x, y) into array indices, `None` if out of bounds
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<(usize, usize)> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((x as usize, y as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|(cx, cy)| self.rows[cy][cx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some((cx, cy)) => {
                self.rows[cy][cx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_vacant(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell::Empty))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell::Occupied(_)))
    }

    pub fn row(&self, y: usize) -> Option<&Row> {
        self.rows.get(y)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Check if a row has no empty cell
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_occupied()))
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(Cell::Empty);
        }
    }

    /// Fix a piece into the board at the given offset.
    ///
    /// The caller must have checked for collision first; occupied shape cells
    /// that land outside the grid are skipped.
    pub fn merge(&mut self, shape: &Shape, x: i8, y: i8) {
        let cell = Cell::Occupied(shape.kind());
        for (dx, dy) in shape.minos() {
            self.set(x.saturating_add(dx), y.saturating_add(dy), cell);
        }
    }

    /// Remove every full row between the bottom and row 1, compacting the board.
    ///
    /// Rows are scanned bottom-up. A full row is taken out, an empty row is
    /// inserted at the top, and the same index is examined again since the
    /// rows above have moved down into it. Row 0 is never examined.
    ///
    /// Returns the number of rows removed.
    pub fn sweep_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = HEIGHT - 1;

        while y > 0 {
            if !self.is_row_full(y) {
                y -= 1;
                continue;
            }

            // rows[0..=y] shift down by one; the old full row lands on top.
            self.rows[..=y].rotate_right(1);
            self.rows[0].fill(Cell::Empty);
            cleared += 1;
        }

        cleared
    }

    /// Write the board as colour tags into `out`.
    pub fn write_tag_grid(&self, out: &mut TagGrid) {
        for (dst, src) in out.iter_mut().zip(self.rows.iter()) {
            for (d, s) in dst.iter_mut().zip(src.iter()) {
                *d = s.tag();
            }
        }
    }

    /// Build a board from colour tags; unknown tags read as empty.
    pub fn from_tag_grid(grid: &TagGrid) -> Self {
        let mut board = Self::new();
        for (dst, src) in board.rows.iter_mut().zip(grid.iter()) {
            for (d, &tag) in dst.iter_mut().zip(src.iter()) {
                *d = crate::types::PieceKind::from_tag(tag).map_or(Cell::Empty, Cell::Occupied);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::create_piece;
    use crate::types::PieceKind;

    fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, Cell::Occupied(kind));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some((0, 0)));
        assert_eq!(Board::index(11, 19), Some((11, 19)));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(12, 0), None);
        assert_eq!(Board::index(0, 20), None);
        assert_eq!(Board::index(0, -1), None);
    }

    #[test]
    fn test_merge_writes_piece_tag() {
        let mut board = Board::new();
        board.merge(&create_piece(PieceKind::O), 3, 5);

        for (x, y) in [(3, 5), (4, 5), (3, 6), (4, 6)] {
            assert_eq!(board.get(x, y), Some(Cell::Occupied(PieceKind::O)));
        }
        assert_eq!(board.get(5, 5), Some(Cell::Empty));
    }

    #[test]
    fn test_sweep_rechecks_same_index() {
        let mut board = Board::new();
        for y in 16..20 {
            fill_row(&mut board, y, PieceKind::I);
        }
        board.set(2, 15, Cell::Occupied(PieceKind::T));

        assert_eq!(board.sweep_rows(), 4);
        assert_eq!(board.get(2, 19), Some(Cell::Occupied(PieceKind::T)));
        for y in 0..19 {
            assert!(board.row(y).unwrap().iter().all(|c| c.is_empty()), "row {y}");
        }
    }

    #[test]
    fn test_sweep_never_clears_row_zero() {
        let mut board = Board::new();
        fill_row(&mut board, 0, PieceKind::Z);

        assert_eq!(board.sweep_rows(), 0);
        assert!(board.is_row_full(0));
    }

    #[test]
    fn test_tag_grid_round_trip() {
        let mut board = Board::new();
        board.set(0, 0, Cell::Occupied(PieceKind::I));
        board.set(11, 19, Cell::Occupied(PieceKind::L));

        let mut grid = [[0u8; WIDTH]; HEIGHT];
        board.write_tag_grid(&mut grid);
        assert_eq!(grid[0][0], PieceKind::I.tag());
        assert_eq!(grid[19][11], PieceKind::L.tag());
        assert_eq!(Board::from_tag_grid(&grid), board);
    }
}
