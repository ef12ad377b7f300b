//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no external dependencies, so they can be
//! shared by the rules engine, the input inbox and the terminal renderer.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 16 rows (indexed 0-15), the top two rows are the spawn buffer
//! - **Spawn column**: 4 for every piece
//!
//! Cells are stored row-major: `index = row * BOARD_WIDTH + col`.
//!
//! # Timing Counters
//!
//! The game has no wall-clock timestep. Every tick adds `round(speed)` to a
//! gravity accumulator and the piece falls one row once it reaches
//! [`MAX_DELAY`]. Effective gravity therefore scales with the host frame rate.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MAX_DELAY` | 75 | Gravity accumulator threshold |
//! | `MAX_KEY_DOWN_DEBOUNCE` | 10 | Ticks before a held key repeats |
//! | `INITIAL_SPEED` | 1.0 | Speed multiplier at reset |
//! | `SPEED_DIVISOR` | 500 | Speed grows by `cleared_lines / 500` per clear |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Cell, PieceKind, BOARD_SIZE, BOARD_WIDTH};
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_SIZE, 160);
//!
//! let cell = Cell::Piece(PieceKind::I);
//! assert!(cell.is_occupied());
//! assert!(cell.is_piece());
//! assert!(!Cell::Empty.is_occupied());
//! assert!(Cell::Blocked.is_occupied());
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Board height in cells (16 rows, including the reserved top rows)
pub const BOARD_HEIGHT: usize = 16;

/// Total number of cells on the board
pub const BOARD_SIZE: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// Side length of a piece tile mask
pub const MASK_SIZE: usize = 4;

/// Number of cells in a piece tile mask
pub const MASK_CELLS: usize = MASK_SIZE * MASK_SIZE;

/// Rows at the top of the board that act as ceiling / spawn buffer.
///
/// A piece that cannot move down while its origin row is above this line ends
/// the game. Line compaction never writes into these rows.
pub const RESERVED_ROWS: i8 = 2;

/// Column every new piece spawns at
pub const SPAWN_COLUMN: i8 = 4;

/// Gravity accumulator threshold
pub const MAX_DELAY: u32 = 75;

/// Debounce counter reset value for held movement keys
pub const MAX_KEY_DOWN_DEBOUNCE: u32 = 10;

/// Speed multiplier at the start of a session
pub const INITIAL_SPEED: f64 = 1.0;

/// Speed grows by `cleared_lines / SPEED_DIVISOR` whenever lines clear
pub const SPEED_DIVISOR: f64 = 500.0;

/// Base score for a single cleared line before the multi-line bonus
pub const LINE_SCORE_BASE: u32 = 100;

/// Session slot the high score is stored under
pub const HIGH_SCORE_KEY: &str = "blockfall_highscore";

/// The seven piece kinds, in catalog order.
///
/// The discriminant is the colour id used by the renderer and by the
/// game-over sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    L,
    J,
    I,
    Square,
    Z,
    S,
    Triangle,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::L,
        PieceKind::J,
        PieceKind::I,
        PieceKind::Square,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::Triangle,
    ];

    /// Number of piece kinds
    pub const COUNT: usize = 7;

    /// Catalog index (0..7)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kind for a catalog index, `None` when out of range
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(2), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_index(7), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Pieces whose mask has nothing in the top row spawn one row higher
    pub fn spawn_row(self) -> i8 {
        match self {
            PieceKind::S | PieceKind::Z | PieceKind::Square | PieceKind::Triangle => -1,
            PieceKind::L | PieceKind::J | PieceKind::I => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::I => "i",
            PieceKind::Square => "square",
            PieceKind::Z => "z",
            PieceKind::S => "s",
            PieceKind::Triangle => "triangle",
        }
    }
}

/// Content of one board cell or one piece mask tile.
///
/// Board cells and piece masks share this vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    Piece(PieceKind),
    #[default]
    Empty,
    /// Indestructible wall / ceiling marker. Never written by gameplay.
    Blocked,
}

impl Cell {
    /// Anything but [`Cell::Empty`]
    #[inline(always)]
    pub fn is_occupied(self) -> bool {
        !matches!(self, Cell::Empty)
    }

    /// A landed piece colour (neither empty nor a wall)
    #[inline(always)]
    pub fn is_piece(self) -> bool {
        matches!(self, Cell::Piece(_))
    }
}

/// Four discrete orientations, 90° clockwise apart
///
/// The cycle goes: North → East → South → West → North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotation index 0..4 (0 = identity, 1 = 90°, 2 = 180°, 3 = 270°)
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index % 4) as usize]
    }
}

/// Top-level mode of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    #[default]
    Menu,
    Playing,
    AnimatingGameOver,
    GameOver,
}

impl GameMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Menu => "menu",
            GameMode::Playing => "playing",
            GameMode::AnimatingGameOver => "animating_game_over",
            GameMode::GameOver => "game_over",
        }
    }
}

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Rotate
    Up,
    Left,
    Right,
    /// Soft drop
    Down,
    /// Hard drop
    Space,
}

impl Key {
    pub const ALL: [Key; 5] = [Key::Up, Key::Left, Key::Right, Key::Down, Key::Space];

    #[inline(always)]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Small set of [`Key`]s packed into a byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeySet(u8);

impl KeySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 0b1_1111)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn insert(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn remove(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    pub fn contains(self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if any of LEFT / RIGHT / DOWN is in the set
    pub fn any_movement(self) -> bool {
        self.contains(Key::Left) || self.contains(Key::Right) || self.contains(Key::Down)
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<T: IntoIterator<Item = Key>>(iter: T) -> Self {
        let mut set = KeySet::empty();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

/// Input observed by one tick.
///
/// `down` is the held state; `released` holds the keys that went up since the
/// previous tick and is only ever seen once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InputFrame {
    pub down: KeySet,
    pub released: KeySet,
}

impl InputFrame {
    /// Frame where `keys` were tapped (released) since the last tick
    pub fn released(keys: &[Key]) -> Self {
        Self {
            down: KeySet::empty(),
            released: keys.iter().copied().collect(),
        }
    }

    /// Frame where `keys` are being held
    pub fn held(keys: &[Key]) -> Self {
        Self {
            down: keys.iter().copied().collect(),
            released: KeySet::empty(),
        }
    }
}
