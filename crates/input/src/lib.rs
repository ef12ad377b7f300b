//! Input module (engine-facing).
//!
//! Captures key transitions into a [`KeyInbox`] the game loop drains once per
//! tick, and maps `crossterm` key events onto the five game keys plus the
//! start / quit UI commands.

pub mod inbox;
pub mod map;

pub use blockfall_types as types;

pub use inbox::KeyInbox;
pub use map::{map_command, map_key, TerminalKeys, UiCommand};
