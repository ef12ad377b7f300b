//! Board module - manages the game grid
//!
//! The board is a 10x16 grid where each cell is empty, a landed piece colour,
//! or an indestructible wall. Uses a flat array for cache locality and
//! zero-allocation.
//! Coordinates: (col, row) where col ranges 0..9 (left to right), row ranges
//! 0..15 (top to bottom). Rows 0 and 1 are the spawn buffer.

use arrayvec::ArrayVec;

use crate::types::{Cell, BOARD_HEIGHT, BOARD_SIZE, BOARD_WIDTH, RESERVED_ROWS};

/// Row-start indices of full rows, in scan order (top to bottom)
pub type FullRows = ArrayVec<usize, BOARD_HEIGHT>;

/// First index line compaction may never write to or below (exclusive bound)
const COMPACTION_FLOOR: usize = RESERVED_ROWS as usize * BOARD_WIDTH;

/// The game board - 10 columns x 16 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(col: i8, row: i8) -> Option<usize> {
        if col < 0 || col >= BOARD_WIDTH as i8 || row < 0 || row >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((row as usize) * BOARD_WIDTH + (col as usize))
    }

    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    /// Get cell at position (col, row)
    /// Returns None if out of bounds
    pub fn get(&self, col: i8, row: i8) -> Option<Cell> {
        Self::index(col, row).map(|idx| self.cells[idx])
    }

    /// Get cell at a (possibly out of range) linear index
    #[inline(always)]
    pub fn cell_at(&self, index: isize) -> Option<Cell> {
        usize::try_from(index)
            .ok()
            .and_then(|idx| self.cells.get(idx).copied())
    }

    /// Set cell at position (col, row)
    /// Returns false if out of bounds
    pub fn set(&mut self, col: i8, row: i8, cell: Cell) -> bool {
        match Self::index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Set cell at a linear index, ignoring indices outside the board
    pub fn set_at(&mut self, index: isize, cell: Cell) -> bool {
        match usize::try_from(index).ok().filter(|&idx| idx < BOARD_SIZE) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Slice of one row
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * BOARD_WIDTH;
        &self.cells[start..start + BOARD_WIDTH]
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    /// Scan for full rows.
    ///
    /// The scan starts at the last cell of the ceiling row, so row 0 is never
    /// reported. A row is full once `BOARD_WIDTH` occupied cells have been
    /// counted since the last row boundary. Walls count as occupied.
    pub fn find_full_rows(&self) -> FullRows {
        let mut full = FullRows::new();
        let mut occupied = 0usize;

        for i in (BOARD_WIDTH - 1)..BOARD_SIZE {
            if i % BOARD_WIDTH == 0 {
                occupied = 0;
            }

            if self.cells[i].is_occupied() {
                occupied += 1;
                if occupied == BOARD_WIDTH {
                    full.push(i + 1 - BOARD_WIDTH);
                }
            }
        }

        full
    }

    /// Return a copy with every row in `full_rows` removed by shifting the cells
    /// above it down one row.
    ///
    /// Rows are processed one at a time in the given order, each shift seeing
    /// the result of the previous one. For each row the shift walks from the
    /// row's last cell up to (but not including) the first cell of row 2.
    /// Walls are skipped and never move.
    pub fn collapse_rows(&self, full_rows: &[usize]) -> Board {
        let mut copy = self.clone();

        for &row_start in full_rows {
            let last = row_start + BOARD_WIDTH - 1;
            for j in ((COMPACTION_FLOOR + 1)..=last).rev() {
                if copy.cells[j] == Cell::Blocked {
                    continue;
                }
                copy.cells[j] = copy.cells[j - BOARD_WIDTH];
            }
        }

        copy
    }

    /// Create from a flat array
    pub fn from_flat(cells: [Cell; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), BOARD_HEIGHT);
        assert!(cells_2d.iter().all(|row| row.len() == BOARD_WIDTH));

        let mut flat = [Cell::Empty; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * BOARD_WIDTH + x] = *cell;
            }
        }
        Self { cells: flat }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
