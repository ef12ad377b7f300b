//! Integration tests for the game loop

use blockfall::core::{can_move, land_piece, Board, Game, HighScoreStore, Piece, SessionStore};
use blockfall::core::scoring::line_clear_score;
use blockfall::input::KeyInbox;
use blockfall::types::{
    Cell, GameMode, InputFrame, Key, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, HIGH_SCORE_KEY,
};

fn hard_drop(piece: &mut Piece, board: &Board) {
    while piece.can_move(board, 0, 1) {
        piece.row += 1;
    }
}

#[test]
fn test_game_lifecycle() {
    let mut game = Game::new(12345);
    assert_eq!(game.mode(), GameMode::Menu);

    game.start();
    assert_eq!(game.mode(), GameMode::Playing);
    assert_eq!(game.score(), 0);
    assert_eq!(game.cleared_lines(), 0);
    assert!(game.board().cells().iter().all(|c| *c == Cell::Empty));
}

#[test]
fn test_vertical_bar_drops_onto_floor() {
    let board = Board::new();
    let mut piece = Piece::spawn(PieceKind::I);
    assert_eq!(piece.col, 4);

    hard_drop(&mut piece, &board);

    let bottom = piece.tiles.occupied().map(|(_, r)| piece.row + r).max();
    assert_eq!(bottom, Some(BOARD_HEIGHT as i8 - 1));
    assert!(!can_move(piece.col, piece.row, &piece.tiles, &board, 0, 1));

    let landed = land_piece(&piece, &board);
    for row in BOARD_HEIGHT as i8 - 4..BOARD_HEIGHT as i8 {
        assert_eq!(landed.get(6, row), Some(Cell::Piece(PieceKind::I)));
    }
}

#[test]
fn test_completing_a_row_clears_it() {
    let mut board = Board::new();
    let floor = BOARD_HEIGHT as i8 - 1;
    for col in 1..BOARD_WIDTH as i8 {
        let kind = PieceKind::ALL[col as usize % PieceKind::COUNT];
        board.set(col, floor, Cell::Piece(kind));
    }
    assert!(board.find_full_rows().is_empty());

    // The vertical bar sits in mask column 2; shift it to board column 0.
    let mut piece = Piece::spawn(PieceKind::I);
    piece.col = -2;
    hard_drop(&mut piece, &board);
    let landed = land_piece(&piece, &board);

    let full = landed.find_full_rows();
    assert_eq!(full.as_slice(), &[floor as usize * BOARD_WIDTH]);

    let collapsed = landed.collapse_rows(&full);
    assert_eq!(collapsed.row(floor as usize), landed.row(floor as usize - 1));
}

#[test]
fn test_score_table() {
    assert_eq!(line_clear_score(1), 150);
    assert_eq!(line_clear_score(2), 600);
    assert_eq!(line_clear_score(3), 1350);
    assert_eq!(line_clear_score(4), 2400);
}

#[test]
fn test_inbox_drives_hard_drop() {
    let mut game = Game::new(9);
    game.start();
    let inbox = KeyInbox::new();

    inbox.tap(Key::Space);
    game.tick(&inbox.drain());

    let landed = game
        .board()
        .cells()
        .iter()
        .filter(|c| c.is_piece())
        .count();
    assert_eq!(landed, 4);
    // The edge was consumed; the next tick sees no release.
    assert!(inbox.drain().released.is_empty());
}

#[test]
fn test_stacking_to_the_top_ends_the_game() {
    let mut game = Game::new(4242);
    game.start();
    let drop = InputFrame::released(&[Key::Space]);

    let mut ticks = 0;
    while game.mode() == GameMode::Playing && ticks < 1_000 {
        game.tick(&drop);
        ticks += 1;
    }
    assert_eq!(game.mode(), GameMode::AnimatingGameOver);

    let idle = InputFrame::default();
    let mut sweep_ticks = 0;
    while game.mode() == GameMode::AnimatingGameOver && sweep_ticks < 1_000 {
        game.tick(&idle);
        sweep_ticks += 1;
    }
    assert_eq!(game.mode(), GameMode::GameOver);
    // Two cells per tick, plus the tick that notices the sweep is done.
    assert_eq!(sweep_ticks, 81);
    assert!(game.board().cells().iter().all(|c| c.is_piece()));

    game.start();
    assert_eq!(game.mode(), GameMode::Playing);
}

#[test]
fn test_high_score_survives_restart_through_store() {
    let mut store = SessionStore::new();
    store.store(HIGH_SCORE_KEY, 900);

    let mut game = Game::with_store(3, store);
    assert_eq!(game.high_score(), 900);
    game.start();
    assert_eq!(game.high_score(), 900);
    assert_eq!(game.store().load(HIGH_SCORE_KEY), 900);
}
