use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{collide, correct_rotation, create_piece, Board, GameSnapshot, GameState};
use blockfall::types::{Cell, PieceKind, RotationDirection, BOARD_WIDTH};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            state.tick(black_box(16));
            if state.is_game_over() {
                state.reset_game_state();
                state.start();
            }
        })
    });
}

fn bench_sweep(c: &mut Criterion) {
    c.bench_function("sweep_4_rows", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..BOARD_WIDTH as i8 {
                    board.set(x, y, Cell::Occupied(PieceKind::I));
                }
            }
            black_box(board.sweep_rows());
        })
    });
}

fn bench_collide(c: &mut Criterion) {
    let board = Board::new();
    let shape = create_piece(PieceKind::T);

    c.bench_function("collide", |b| {
        b.iter(|| collide(black_box(&board), black_box(&shape), black_box(5), black_box(10)))
    });
}

fn bench_rotation_correction(c: &mut Criterion) {
    let board = Board::new();
    let shape = create_piece(PieceKind::I).rotated(RotationDirection::Clockwise);

    c.bench_function("correct_rotation_left_wall", |b| {
        b.iter(|| correct_rotation(black_box(&board), black_box(&shape), black_box(-1), 0))
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            state.hard_drop();
            if state.is_game_over() {
                state.reset_game_state();
                state.start();
            }
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| state.snapshot_into(black_box(&mut snap)))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_sweep,
    bench_collide,
    bench_rotation_correction,
    bench_hard_drop,
    bench_snapshot
);
criterion_main!(benches);
