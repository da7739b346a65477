//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto the four engine [`Command`](types::Command)s.
//! Everything else is ignored, apart from the quit keys which belong to the
//! host loop.

pub mod map;

pub use tui_blocks_types as types;

pub use map::{command_for_event, handle_key_event, should_quit};
