//! Piece catalog, rotation and rotation-correction tests

use blockfall::core::{correct_rotation, create_piece, Board, Shape};
use blockfall::types::{Cell, PieceKind, RotationDirection, BOARD_HEIGHT, BOARD_WIDTH};
use proptest::prelude::*;

/// Render a shape as `"010/110/010"`.
fn pattern(shape: &Shape) -> String {
    let size = usize::from(shape.size());
    (0..size)
        .map(|y| {
            (0..size)
                .map(|x| if shape.cell(x, y).is_occupied() { '1' } else { '0' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn kind_strategy() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

fn direction_strategy() -> impl Strategy<Value = RotationDirection> {
    prop_oneof![
        Just(RotationDirection::Clockwise),
        Just(RotationDirection::CounterClockwise),
    ]
}

// ============== Catalog ==============

#[test]
fn test_catalog_grids() {
    let expected = [
        (PieceKind::T, "000/111/010"),
        (PieceKind::O, "11/11"),
        (PieceKind::L, "001/111/000"),
        (PieceKind::J, "100/111/000"),
        (PieceKind::I, "0100/0100/0100/0100"),
        (PieceKind::S, "011/110/000"),
        (PieceKind::Z, "110/011/000"),
    ];
    for (kind, grid) in expected {
        let shape = create_piece(kind);
        assert_eq!(shape.kind(), kind);
        assert_eq!(pattern(&shape), grid, "{kind}");
    }
}

#[test]
fn test_catalog_is_pure() {
    for kind in PieceKind::ALL {
        assert_eq!(create_piece(kind), create_piece(kind));
    }
}

#[test]
fn test_every_cell_carries_the_kind() {
    for kind in PieceKind::ALL {
        let shape = create_piece(kind);
        let size = usize::from(shape.size());
        for y in 0..size {
            for x in 0..size {
                let cell = shape.cell(x, y);
                assert!(cell == Cell::Empty || cell == Cell::Occupied(kind));
            }
        }
    }
}

// ============== Rotation ==============

#[test]
fn test_t_rotations() {
    let t = create_piece(PieceKind::T);
    assert_eq!(pattern(&t.rotated(RotationDirection::Clockwise)), "010/110/010");
    assert_eq!(
        pattern(&t.rotated(RotationDirection::CounterClockwise)),
        "010/011/010"
    );
}

#[test]
fn test_l_rotates_clockwise() {
    let l = create_piece(PieceKind::L).rotated(RotationDirection::Clockwise);
    assert_eq!(pattern(&l), "010/010/011");
}

#[test]
fn test_o_is_rotation_invariant() {
    let o = create_piece(PieceKind::O);
    assert_eq!(o.rotated(RotationDirection::Clockwise), o);
    assert_eq!(o.rotated(RotationDirection::CounterClockwise), o);
}

#[test]
fn test_i_alternates_column_and_row() {
    let i = create_piece(PieceKind::I);
    let row = i.rotated(RotationDirection::Clockwise);
    assert_eq!(pattern(&row), "0000/1111/0000/0000");
    assert_eq!(row.rotated(RotationDirection::CounterClockwise), i);
}

proptest! {
    #[test]
    fn prop_rotation_round_trip(kind in kind_strategy(), dir in direction_strategy(), turns in 0usize..4) {
        let mut shape = create_piece(kind);
        for _ in 0..turns {
            shape.rotate(RotationDirection::Clockwise);
        }
        let before = shape;

        shape.rotate(dir);
        shape.rotate(dir.inverse());
        prop_assert_eq!(shape, before);
    }

    #[test]
    fn prop_four_turns_are_identity(kind in kind_strategy(), dir in direction_strategy()) {
        let start = create_piece(kind);
        let mut shape = start;
        for _ in 0..4 {
            shape.rotate(dir);
        }
        prop_assert_eq!(shape, start);
    }

    #[test]
    fn prop_rotation_keeps_four_minos(kind in kind_strategy(), dir in direction_strategy(), turns in 0usize..8) {
        let mut shape = create_piece(kind);
        for _ in 0..turns {
            shape.rotate(dir);
        }
        prop_assert_eq!(shape.minos().len(), 4);
        prop_assert_eq!(shape.kind(), kind);
    }
}

// ============== Rotation correction ==============

#[test]
fn test_correction_keeps_free_position() {
    let board = Board::new();
    let shape = create_piece(PieceKind::L).rotated(RotationDirection::Clockwise);
    assert_eq!(correct_rotation(&board, &shape, 5, 3), Some(5));
}

#[test]
fn test_correction_probes_right_first() {
    // A single filled cell under the horizontal I at x = 4 forces a shift;
    // the first probe goes right.
    let mut board = Board::new();
    let shape = create_piece(PieceKind::I).rotated(RotationDirection::Clockwise);
    board.set(4, 6, Cell::Occupied(PieceKind::Z));

    // Horizontal I at (4, 5) covers columns 4..=7 on row 6.
    assert_eq!(correct_rotation(&board, &shape, 4, 5), Some(5));
}

#[test]
fn test_correction_falls_back_left() {
    let mut board = Board::new();
    let shape = create_piece(PieceKind::I).rotated(RotationDirection::Clockwise);
    board.set(8, 6, Cell::Occupied(PieceKind::Z));

    // Columns 5..=8 and 6..=9 both hit the block; 4..=7 is free.
    assert_eq!(correct_rotation(&board, &shape, 5, 5), Some(4));
}

#[test]
fn test_correction_never_moves_vertically() {
    let mut board = Board::new();
    let shape = create_piece(PieceKind::O);
    // Row 19 fully blocked: no horizontal shift helps an O at y = 18.
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, BOARD_HEIGHT as i8 - 1, Cell::Occupied(PieceKind::S));
    }
    assert_eq!(correct_rotation(&board, &shape, 4, 18), None);
}

#[test]
fn test_correction_for_o_only_probes_one_step_right() {
    // Width 2: the search applies x+1, then x-1 and stops before testing it.
    let mut board = Board::new();
    let shape = create_piece(PieceKind::O);
    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            if !(7..=8).contains(&x) {
                board.set(x, y, Cell::Occupied(PieceKind::T));
            }
        }
    }
    assert_eq!(correct_rotation(&board, &shape, 7, 0), Some(7));
    assert_eq!(correct_rotation(&board, &shape, 6, 0), Some(7));
    assert_eq!(correct_rotation(&board, &shape, 8, 0), None);
}
