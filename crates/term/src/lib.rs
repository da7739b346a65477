//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It renders
//! into a simple framebuffer that is flushed to the terminal as diffs.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Render from a snapshot only; never touch engine state
//! - Keep the board's aspect ratio square-ish (2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_blocks_core as core;
pub use tui_blocks_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb, Weight};
pub use game_view::{color_rgb, sprite_for, GameView, Sprite, Viewport};
pub use renderer::{dirty_span, encode_diff_into, encode_full_into, TerminalRenderer};
