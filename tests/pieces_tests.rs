//! Piece catalog and rotation engine tests

use blockfall::core::{can_move, get_shape, rotate, rotate_mask, Board, Piece};
use blockfall::types::{Cell, PieceKind, Rotation, BOARD_WIDTH, MASK_CELLS};

// ============== Rotation transform ==============

#[test]
fn test_rotate_is_a_bijection_for_every_rotation() {
    for rotation in Rotation::ALL {
        let mut seen = [false; MASK_CELLS];
        for row in 0..4 {
            for col in 0..4 {
                let source = rotate(col, row, rotation);
                assert!(source < MASK_CELLS, "{rotation:?} ({col},{row}) -> {source}");
                assert!(!seen[source], "{rotation:?} reuses source {source}");
                seen[source] = true;
            }
        }
        assert!(seen.iter().all(|&s| s), "{rotation:?} drops a tile");
    }
}

#[test]
fn test_four_quarter_turns_restore_every_shape() {
    for kind in PieceKind::ALL {
        let original = *get_shape(kind);
        let mut mask = original;
        for _ in 0..4 {
            mask = rotate_mask(&mask, Rotation::East);
        }
        assert_eq!(mask, original, "{kind:?}");
    }
}

#[test]
fn test_rotation_preserves_tile_count() {
    for kind in PieceKind::ALL {
        for rotation in Rotation::ALL {
            let mask = rotate_mask(get_shape(kind), rotation);
            assert_eq!(mask.occupied().count(), 4, "{kind:?} {rotation:?}");
        }
    }
}

#[test]
fn test_half_turn_equals_two_quarter_turns() {
    for kind in PieceKind::ALL {
        let shape = get_shape(kind);
        let twice = rotate_mask(&rotate_mask(shape, Rotation::East), Rotation::East);
        assert_eq!(rotate_mask(shape, Rotation::South), twice, "{kind:?}");
    }
}

// ============== Catalog ==============

#[test]
fn test_triangle_shape() {
    let tiles: Vec<_> = get_shape(PieceKind::Triangle).occupied().collect();
    assert_eq!(tiles, vec![(1, 1), (0, 2), (1, 2), (2, 2)]);
}

#[test]
fn test_spawn_rows_follow_top_mask_row() {
    for kind in PieceKind::ALL {
        let top_row_filled = (0..4).any(|col| get_shape(kind).get(col, 0) != Cell::Empty);
        let expected = if top_row_filled { 0 } else { -1 };
        assert_eq!(Piece::spawn(kind).row, expected, "{kind:?}");
        assert_eq!(Piece::spawn(kind).col, 4, "{kind:?}");
    }
}

// ============== Collision ==============

#[test]
fn test_can_move_rejects_any_column_outside_board() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        for rotation in Rotation::ALL {
            let mask = rotate_mask(get_shape(kind), rotation);
            for col in -5i8..BOARD_WIDTH as i8 + 5 {
                let outside = mask.occupied().any(|(mc, _)| {
                    let c = col + mc;
                    c < 0 || c >= BOARD_WIDTH as i8
                });
                if outside {
                    assert!(!can_move(col, 6, &mask, &board, 0, 0), "{kind:?} at {col}");
                }
            }
        }
    }
}

#[test]
fn test_can_move_on_empty_board_inside_bounds() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        let mask = get_shape(kind);
        for col in 0i8..6 {
            assert!(can_move(col, 4, mask, &board, 0, 0), "{kind:?} at {col}");
        }
    }
}

#[test]
fn test_can_move_rejects_each_occupied_tile() {
    let mask = get_shape(PieceKind::L);
    for (mc, mr) in mask.occupied() {
        let mut board = Board::new();
        board.set(3 + mc, 5 + mr, Cell::Blocked);
        assert!(!can_move(3, 5, mask, &board, 0, 0));
        assert!(!can_move(3, 4, mask, &board, 0, 1));
    }
}
