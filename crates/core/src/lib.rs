//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules and the per-tick state machine.
//! It has **no dependencies** on rendering, input capture or I/O:
//!
//! - **Deterministic**: the same seed and input frames replay the same game
//! - **Testable**: every rule is a plain function or method over owned data
//! - **Portable**: any host that can call [`Game::tick`] can run it
//!
//! # Module Structure
//!
//! - [`board`]: 10x16 flat grid, full-row scan and row compaction
//! - [`pieces`]: 4x4 tile mask catalog and the closed-form rotation transform
//! - [`placement`]: collision checks and landing a piece into the board
//! - [`rng`]: seeded uniform piece generator
//! - [`scoring`]: line clear rewards and speed progression
//! - [`game_state`]: the session and its Menu / Playing / game-over state machine
//! - [`snapshot`]: copyable views for renderers
//! - [`high_score`]: persistence contract for the single high score
//!
//! # Game Rules
//!
//! - Pieces spawn at column 4, drawn uniformly at random
//! - Rotation steps clockwise from the canonical shape, with no wall kicks
//! - A piece that cannot fall while its origin is above row 2 ends the game
//! - Clearing `n` rows at once scores `n * 100 * (n * 1.5)`
//!
//! # Example
//!
//! ```
//! use blockfall_core::Game;
//! use blockfall_types::{GameMode, InputFrame, Key};
//!
//! let mut game = Game::new(12345);
//! assert_eq!(game.mode(), GameMode::Menu);
//!
//! game.start();
//! game.tick(&InputFrame::released(&[Key::Left]));
//! game.tick(&InputFrame::released(&[Key::Space]));
//!
//! assert_eq!(game.mode(), GameMode::Playing);
//! assert!(game.board().cells().iter().any(|c| c.is_piece()));
//! ```

pub mod board;
pub mod game_state;
pub mod high_score;
pub mod pieces;
pub mod placement;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::{Board, FullRows};
pub use game_state::{Game, TickOutcome};
pub use high_score::{HighScoreStore, SessionStore};
pub use pieces::{get_shape, rotate, rotate_mask, Mask, Piece};
pub use placement::{can_move, land_piece};
pub use rng::{PieceGenerator, SimpleRng};
pub use snapshot::GameSnapshot;
