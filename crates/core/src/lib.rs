//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the board & piece engine. It has **zero dependencies**
//! on UI or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Unit tests for every rule
//! - **Portable**: Any host loop (terminal, canvas, test harness) can drive it
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with row clearing
//! - [`shape`]: Boolean piece matrices and the quarter-turn rotation
//! - [`pieces`]: Canonical shape per piece kind and spawn placement
//! - [`rng`]: Seeded LCG and the weighted piece generator
//! - [`game_state`]: Collision, movement, rotation, merge, line clear, gravity
//! - [`snapshot`]: Read-only copy of the state for renderers
//!
//! # Game Rules
//!
//! - **Weighted pieces**: I, O, T, L, J at 15%, S 12%, Z 10%, single-cell X 3%
//! - **Rotation**: transpose and reverse rows, in place, no wall kicks
//! - **Landing**: a blocked downward move merges the piece immediately
//! - **Scoring**: 100 points per cleared row
//! - **Game over**: the next piece collides at its spawn position
//!
//! # Example
//!
//! ```
//! use tui_blocks_core::GameState;
//! use tui_blocks_types::{Command, MoveResult};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! assert_eq!(game.apply_command(Command::MoveDown), MoveResult::Moved);
//! game.apply_command(Command::Rotate);
//!
//! // Keep pushing down until the piece lands.
//! while !game.apply_command(Command::MoveDown).landed() {}
//! assert_eq!(game.pieces(), 2);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) from the host loop
//! with the elapsed milliseconds; a forced drop happens each time more than
//! 300ms has accumulated.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod shape;
pub mod snapshot;

pub use tui_blocks_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{collides, ActivePiece, GameState};
pub use pieces::get_shape;
pub use rng::{PieceGenerator, SimpleRng};
pub use shape::Shape;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
