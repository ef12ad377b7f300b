//! Terminal render adapter.
//!
//! Paints game snapshots into a framebuffer of styled glyphs and flushes the
//! changed runs to the terminal. The core never sees any of this.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{AnchorY, GameView, Viewport, PREVIEW_CELLS};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
