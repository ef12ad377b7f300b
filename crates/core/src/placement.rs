//! Collision and placement against the board.
//!
//! Legality is always a plain `bool`; callers decide whether to apply or
//! discard a proposed move.

use crate::board::Board;
use crate::pieces::{Mask, Piece};
use crate::types::{Cell, BOARD_WIDTH};

/// Linear board index for a board-space position. May be negative or past
/// the end of the board.
#[inline(always)]
fn linear_index(col: i8, row: i8) -> isize {
    row as isize * BOARD_WIDTH as isize + col as isize
}

/// Check whether a mask at `(col, row)` can be shifted by `(dcol, drow)`.
///
/// Every non-empty tile must land inside the column range and on an empty
/// board cell. The row axis has no explicit bound: the target is looked up by
/// linear index and anything outside the board counts as occupied, which is
/// what stops pieces at the floor and rejects tiles above the ceiling.
pub fn can_move(col: i8, row: i8, mask: &Mask, board: &Board, dcol: i8, drow: i8) -> bool {
    mask.occupied().all(|(mc, mr)| {
        let future_col = col + mc + dcol;
        let future_row = row + mr + drow;

        if future_col < 0 || future_col >= BOARD_WIDTH as i8 {
            return false;
        }

        matches!(
            board.cell_at(linear_index(future_col, future_row)),
            Some(Cell::Empty)
        )
    })
}

/// Return a copy of `board` with `piece` written into it as its own colour.
///
/// Tiles that fall outside the board are dropped.
pub fn land_piece(piece: &Piece, board: &Board) -> Board {
    let mut copy = board.clone();
    for (mc, mr) in piece.tiles.occupied() {
        copy.set_at(
            linear_index(piece.col + mc, piece.row + mr),
            Cell::Piece(piece.kind),
        );
    }
    copy
}
