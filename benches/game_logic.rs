use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{can_move, get_shape, rotate_mask, Board, Game};
use blockfall::term::{FrameBuffer, GameView, Viewport};
use blockfall::types::{Cell, GameMode, InputFrame, Key, PieceKind, Rotation};

fn bench_tick(c: &mut Criterion) {
    let mut game = Game::new(12345);
    game.start();
    let idle = InputFrame::default();

    c.bench_function("game_tick_idle", |b| {
        b.iter(|| {
            if game.mode() != GameMode::Playing {
                game.start();
            }
            black_box(game.tick(black_box(&idle)));
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut game = Game::new(12345);
    game.start();
    let drop = InputFrame::released(&[Key::Space]);

    c.bench_function("game_tick_hard_drop", |b| {
        b.iter(|| {
            if game.mode() != GameMode::Playing {
                game.start();
            }
            black_box(game.tick(black_box(&drop)));
        })
    });
}

fn bench_can_move(c: &mut Criterion) {
    let board = Board::new();
    let mask = get_shape(PieceKind::Triangle);

    c.bench_function("can_move", |b| {
        b.iter(|| can_move(black_box(4), black_box(6), mask, &board, 0, 1))
    });
}

fn bench_rotate_mask(c: &mut Criterion) {
    c.bench_function("rotate_mask", |b| {
        b.iter(|| rotate_mask(get_shape(black_box(PieceKind::J)), black_box(Rotation::West)))
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let mut board = Board::new();
    for row in 12..16 {
        for col in 0..10 {
            board.set(col, row, Cell::Piece(PieceKind::I));
        }
    }

    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let full = black_box(&board).find_full_rows();
            board.collapse_rows(&full)
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut game = Game::new(12345);
    game.start();
    let snap = game.snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("render_into", |b| {
        b.iter(|| view.render_into(black_box(&snap), Viewport::new(80, 24), &mut fb))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_hard_drop,
    bench_can_move,
    bench_rotate_mask,
    bench_line_clear,
    bench_render
);
criterion_main!(benches);
