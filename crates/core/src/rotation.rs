//! Rotation correction search.
//!
//! After a shape has been rotated in place, the piece may overlap a wall or a
//! locked cell. Instead of a kick table, nearby columns are probed with a
//! zig-zag of growing horizontal displacements: +1, -2, +3, -4, ... applied
//! cumulatively, which visits x+1, x-1, x+2, x-2, ... The search stops as soon
//! as the next displacement would exceed the shape's width. It never moves the
//! piece vertically.

use crate::board::Board;
use crate::collision::collide;
use crate::pieces::Shape;

/// Find a column for an already-rotated `shape` near `x`.
///
/// Returns the corrected x, or `None` when every probe collides and the
/// rotation has to be rejected.
pub fn correct_rotation(board: &Board, shape: &Shape, x: i8, y: i8) -> Option<i8> {
    let width = shape.width() as i8;
    let mut pos = x;
    let mut offset: i8 = 1;

    while collide(board, shape, pos, y) {
        pos = pos.saturating_add(offset);
        offset = -(offset + offset.signum());
        // The probe just applied is abandoned untested once the next
        // displacement would exceed the width.
        if offset > width {
            return None;
        }
    }

    Some(pos)
}
