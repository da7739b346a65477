//! TUI Blocks (workspace facade crate).
//!
//! Re-exports the member crates under `tui_blocks::{core,input,term,types}` and
//! hosts the runtime pieces shared by the binary: configuration and the
//! session event log.

pub use tui_blocks_core as core;
pub use tui_blocks_input as input;
pub use tui_blocks_term as term;
pub use tui_blocks_types as types;

pub mod config;
pub mod session_log;
