//! Collision oracle shared by movement, rotation, spawning and hard drop.

use crate::board::Board;
use crate::pieces::Shape;

/// True if any occupied cell of `shape` placed at `(x, y)` lies outside the
/// board or on a filled board cell.
pub fn collide(board: &Board, shape: &Shape, x: i8, y: i8) -> bool {
    shape.minos().iter().any(|&(dx, dy)| {
        !board.is_vacant(x.saturating_add(dx), y.saturating_add(dy))
    })
}
