//! Pieces module - piece catalog and the 4x4 rotation transform
//!
//! Every piece kind is described by one canonical 4x4 tile mask. A mask tile is
//! either [`Cell::Empty`] or the piece's own colour. Rotations never touch the
//! catalog: [`rotate_mask`] returns a fresh mask.
//!
//! Local coordinates: `(col, row)` in `0..4`, `index = row * 4 + col`.

use crate::board::Board;
use crate::placement::can_move;
use crate::types::{Cell, PieceKind, Rotation, MASK_CELLS, MASK_SIZE, SPAWN_COLUMN};

/// A 4x4 tile mask with value semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mask([Cell; MASK_CELLS]);

impl Mask {
    pub const fn new(tiles: [Cell; MASK_CELLS]) -> Self {
        Self(tiles)
    }

    pub fn tiles(&self) -> &[Cell; MASK_CELLS] {
        &self.0
    }

    /// Tile at local `(col, row)`
    #[inline(always)]
    pub fn get(&self, col: usize, row: usize) -> Cell {
        self.0[row * MASK_SIZE + col]
    }

    /// Iterate the non-empty tiles as `(col, row)` local offsets
    pub fn occupied(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, tile)| **tile != Cell::Empty)
            .map(|(i, _)| ((i % MASK_SIZE) as i8, (i / MASK_SIZE) as i8))
    }
}

const E: Cell = Cell::Empty;
const L: Cell = Cell::Piece(PieceKind::L);
const J: Cell = Cell::Piece(PieceKind::J);
const I: Cell = Cell::Piece(PieceKind::I);
const O: Cell = Cell::Piece(PieceKind::Square);
const Z: Cell = Cell::Piece(PieceKind::Z);
const S: Cell = Cell::Piece(PieceKind::S);
const T: Cell = Cell::Piece(PieceKind::Triangle);

#[rustfmt::skip]
static CATALOG: [Mask; PieceKind::COUNT] = [
    Mask::new([
        L, E, E, E,
        L, E, E, E,
        L, L, E, E,
        E, E, E, E,
    ]),
    Mask::new([
        E, E, J, E,
        E, E, J, E,
        E, J, J, E,
        E, E, E, E,
    ]),
    Mask::new([
        E, E, I, E,
        E, E, I, E,
        E, E, I, E,
        E, E, I, E,
    ]),
    Mask::new([
        E, E, E, E,
        E, O, O, E,
        E, O, O, E,
        E, E, E, E,
    ]),
    Mask::new([
        E, E, E, E,
        Z, Z, E, E,
        E, Z, Z, E,
        E, E, E, E,
    ]),
    Mask::new([
        E, E, E, E,
        E, S, S, E,
        S, S, E, E,
        E, E, E, E,
    ]),
    Mask::new([
        E, E, E, E,
        E, T, E, E,
        T, T, T, E,
        E, E, E, E,
    ]),
];

/// Canonical (unrotated) shape of a piece kind
pub fn get_shape(kind: PieceKind) -> &'static Mask {
    &CATALOG[kind.index()]
}

/// Map a local position to the source index in the unrotated mask.
///
/// | rotation | source index |
/// |----------|--------------|
/// | 0        | `y*4 + x`    |
/// | 1 (90°)  | `12 + y - 4x`|
/// | 2 (180°) | `15 - 4y - x`|
/// | 3 (270°) | `3 - y + 4x` |
///
/// `col` and `row` must be in `0..4`.
#[inline(always)]
pub fn rotate(col: usize, row: usize, rotation: Rotation) -> usize {
    debug_assert!(col < MASK_SIZE && row < MASK_SIZE);
    match rotation {
        Rotation::North => row * 4 + col,
        Rotation::East => 12 + row - 4 * col,
        Rotation::South => 15 - 4 * row - col,
        Rotation::West => 3 - row + 4 * col,
    }
}

/// Produce the rotated copy of `mask`: `out[i] = mask[rotate(i % 4, i / 4, r)]`
pub fn rotate_mask(mask: &Mask, rotation: Rotation) -> Mask {
    let mut out = [Cell::Empty; MASK_CELLS];
    for (i, tile) in out.iter_mut().enumerate() {
        *tile = mask.0[rotate(i % MASK_SIZE, i / MASK_SIZE, rotation)];
    }
    Mask(out)
}

/// A piece instance: board-space origin of the mask's top-left plus the
/// currently rotated mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub col: i8,
    pub row: i8,
    pub tiles: Mask,
}

impl Piece {
    /// Create a piece at its spawn position.
    ///
    /// All pieces spawn at column 4; kinds with an empty top mask row start
    /// one row above the board.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            col: SPAWN_COLUMN,
            row: kind.spawn_row(),
            tiles: *get_shape(kind),
        }
    }

    /// Legality of shifting the piece by `(dcol, drow)` on `board`
    pub fn can_move(&self, board: &Board, dcol: i8, drow: i8) -> bool {
        can_move(self.col, self.row, &self.tiles, board, dcol, drow)
    }

    /// The same piece rotated from its canonical shape, if it fits in place
    pub fn rotated(&self, board: &Board, rotation: Rotation) -> Option<Piece> {
        let tiles = rotate_mask(get_shape(self.kind), rotation);
        can_move(self.col, self.row, &tiles, board, 0, 0).then_some(Piece {
            rotation,
            tiles,
            ..*self
        })
    }

    /// Lowest row this piece can fall to without leaving its column
    pub fn resting_row(&self, board: &Board) -> i8 {
        let mut row = self.row;
        while can_move(self.col, row, &self.tiles, board, 0, 1) {
            row += 1;
        }
        row
    }

    /// Ghost copy resting at [`Piece::resting_row`]
    pub fn drop_preview(&self, board: &Board) -> Piece {
        Piece {
            row: self.resting_row(board),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_identity() {
        for i in 0..MASK_CELLS {
            assert_eq!(rotate(i % 4, i / 4, Rotation::North), i);
        }
    }

    #[test]
    fn test_rotate_corners() {
        // 90°: top-left of the output reads the bottom-left of the source.
        assert_eq!(rotate(0, 0, Rotation::East), 12);
        assert_eq!(rotate(3, 0, Rotation::East), 0);
        assert_eq!(rotate(0, 0, Rotation::South), 15);
        assert_eq!(rotate(0, 0, Rotation::West), 3);
        assert_eq!(rotate(3, 3, Rotation::West), 12);
    }

    #[test]
    fn test_rotate_mask_i_piece_is_horizontal() {
        let mask = rotate_mask(get_shape(PieceKind::I), Rotation::East);
        let tiles: Vec<_> = mask.occupied().collect();
        assert_eq!(tiles, vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_rotate_mask_leaves_catalog_untouched() {
        let before = *get_shape(PieceKind::Triangle);
        let _ = rotate_mask(get_shape(PieceKind::Triangle), Rotation::South);
        assert_eq!(*get_shape(PieceKind::Triangle), before);
    }

    #[test]
    fn test_catalog_tiles_use_own_colour() {
        for kind in PieceKind::ALL {
            let shape = get_shape(kind);
            assert_eq!(shape.occupied().count(), 4, "{kind:?}");
            for tile in shape.tiles() {
                assert!(*tile == Cell::Empty || *tile == Cell::Piece(kind));
            }
        }
    }

    #[test]
    fn test_spawn_positions() {
        let i = Piece::spawn(PieceKind::I);
        assert_eq!((i.col, i.row), (4, 0));
        assert_eq!(i.rotation, Rotation::North);

        let s = Piece::spawn(PieceKind::S);
        assert_eq!((s.col, s.row), (4, -1));
    }

    #[test]
    fn test_drop_preview_on_empty_board() {
        let board = Board::new();
        let piece = Piece::spawn(PieceKind::I);
        let ghost = piece.drop_preview(&board);
        assert_eq!(ghost.row, 12);
        assert_eq!(ghost.col, piece.col);
        assert_eq!(ghost.tiles, piece.tiles);
    }

    #[test]
    fn test_rotated_rejected_when_blocked() {
        let mut board = Board::new();
        let piece = Piece::spawn(PieceKind::I);
        // Horizontal I at rotation 1 covers local row 2, cols 0..4 -> board row 2, cols 4..8
        board.set(4, 2, Cell::Piece(PieceKind::L));
        assert!(piece.rotated(&board, Rotation::East).is_none());

        board.set(4, 2, Cell::Empty);
        let rotated = piece.rotated(&board, Rotation::East).unwrap();
        assert_eq!(rotated.rotation, Rotation::East);
        assert_eq!((rotated.col, rotated.row), (piece.col, piece.row));
    }
}
