//! Render-facing copies of the game state.
//!
//! A snapshot is plain `Copy` data so renderers never borrow the live game.

use crate::pieces::Piece;
use crate::types::{Cell, GameMode, PieceKind, BOARD_SIZE, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSnapshot {
    pub board: [Cell; BOARD_SIZE],
    pub current: Piece,
    pub next: Piece,
    pub drop_preview: Piece,
    pub score: u32,
    pub cleared_lines: u32,
    pub high_score: u32,
    pub speed: f64,
    pub mode: GameMode,
}

impl GameSnapshot {
    /// Cell at `(col, row)`; callers stay within the board
    pub fn cell(&self, col: usize, row: usize) -> Cell {
        self.board[row * BOARD_WIDTH + col]
    }

    /// Whether the active piece and its ghost should be drawn
    pub fn shows_active_piece(&self) -> bool {
        self.mode == GameMode::Playing
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let placeholder = Piece::spawn(PieceKind::I);
        Self {
            board: [Cell::Empty; BOARD_SIZE],
            current: placeholder,
            next: placeholder,
            drop_preview: placeholder,
            score: 0,
            cleared_lines: 0,
            high_score: 0,
            speed: 0.0,
            mode: GameMode::Menu,
        }
    }
}
