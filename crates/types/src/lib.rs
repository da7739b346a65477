//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, session logging).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: horizontally centered on the piece's bounding box, row 0
//!
//! # Canvas Geometry
//!
//! Hosts that draw onto a pixel surface place cell `(x, y)` at
//! `(x * CELL_SIZE, y * CELL_SIZE)`:
//!
//! | Constant | Value |
//! |----------|-------|
//! | `CELL_SIZE` | 30 |
//! | `CANVAS_WIDTH` | 300 |
//! | `CANVAS_HEIGHT` | 600 |
//!
//! # Examples
//!
//! ```
//! use tui_blocks_types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::X;
//! assert_eq!(piece.weight(), 3);
//! assert_eq!(piece.design().name(), "block");
//! assert_eq!(PieceKind::S.design().name(), "green");
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Side length of one cell on a pixel canvas
pub const CELL_SIZE: u32 = 30;

/// Canvas width in pixels (`BOARD_WIDTH * CELL_SIZE`)
pub const CANVAS_WIDTH: u32 = BOARD_WIDTH as u32 * CELL_SIZE;

/// Canvas height in pixels (`BOARD_HEIGHT * CELL_SIZE`)
pub const CANVAS_HEIGHT: u32 = BOARD_HEIGHT as u32 * CELL_SIZE;

/// Default host loop interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval: a forced drop happens once more than this much time has accumulated
pub const DROP_INTERVAL_MS: u32 = 300;

/// Score awarded per cleared row
pub const LINE_CLEAR_BONUS: u32 = 100;

/// Sum of all piece weights
pub const TOTAL_WEIGHT: u32 = 100;

/// Pixel rectangle `(x, y, width, height)` of a board cell on a canvas.
///
/// ```
/// use tui_blocks_types::{cell_rect, CELL_SIZE};
///
/// assert_eq!(cell_rect(2, 3), (60, 90, CELL_SIZE, CELL_SIZE));
/// ```
pub const fn cell_rect(x: u8, y: u8) -> (u32, u32, u32, u32) {
    (
        x as u32 * CELL_SIZE,
        y as u32 * CELL_SIZE,
        CELL_SIZE,
        CELL_SIZE,
    )
}


/// The eight piece kinds
///
/// Seven classic tetrominoes plus a single-cell bonus piece:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **L**: Orange, L-shaped
/// - **J**: Blue, J-shaped (mirror of L)
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **X**: One cell, drawn with an image instead of a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
    X,
}

impl PieceKind {
    /// All kinds in weight-table order
    pub const ALL: [PieceKind; 8] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::X,
    ];

    /// Relative spawn weight out of [`TOTAL_WEIGHT`]
    pub const fn weight(self) -> u32 {
        match self {
            PieceKind::I | PieceKind::O | PieceKind::T | PieceKind::L | PieceKind::J => 15,
            PieceKind::S => 12,
            PieceKind::Z => 10,
            PieceKind::X => 3,
        }
    }

    /// Visual fill used for every cell of this kind
    pub const fn design(self) -> Design {
        match self {
            PieceKind::I => Design::Color(PieceColor::Cyan),
            PieceKind::O => Design::Color(PieceColor::Yellow),
            PieceKind::T => Design::Color(PieceColor::Purple),
            PieceKind::L => Design::Color(PieceColor::Orange),
            PieceKind::J => Design::Color(PieceColor::Blue),
            PieceKind::S => Design::Color(PieceColor::Green),
            PieceKind::Z => Design::Color(PieceColor::Red),
            PieceKind::X => Design::Image(ImageRef::BLOCK),
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::X => "x",
        }
    }
}

/// Named solid colors used by the color-filled pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    Cyan,
    Yellow,
    Purple,
    Orange,
    Blue,
    Green,
    Red,
}

impl PieceColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceColor::Cyan => "cyan",
            PieceColor::Yellow => "yellow",
            PieceColor::Purple => "purple",
            PieceColor::Orange => "orange",
            PieceColor::Blue => "blue",
            PieceColor::Green => "green",
            PieceColor::Red => "red",
        }
    }
}

/// Handle to an image asset, resolved by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageRef(pub &'static str);

impl ImageRef {
    /// The bonus block texture used by [`PieceKind::X`]
    pub const BLOCK: ImageRef = ImageRef("block");

    pub fn name(&self) -> &'static str {
        self.0
    }
}

/// How an occupied cell is drawn
///
/// Engine logic only cares whether a cell is occupied; the design travels with
/// the cell so renderers can pick a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Design {
    Color(PieceColor),
    Image(ImageRef),
}

impl Design {
    /// Color name, or the image handle's name
    pub fn name(&self) -> &'static str {
        match self {
            Design::Color(color) => color.as_str(),
            Design::Image(image) => image.name(),
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Design)`: Settled cell drawn with the given design
pub type Cell = Option<Design>;

/// Discrete player commands
///
/// Both key presses and the game clock feed the engine through these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down; lands the piece when blocked
    MoveDown,
    /// Rotate piece a quarter turn
    Rotate,
}

/// Outcome of a move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    /// The piece was translated
    Moved,
    /// A sideways (or upward) move hit a wall or settled cell; nothing changed
    Blocked,
    /// A downward move was blocked: the piece merged, rows were cleared and the
    /// next piece was spawned (or the game ended)
    Landed { lines_cleared: u32 },
    /// The game is over or no piece is active
    Ignored,
}

impl MoveResult {
    pub fn landed(&self) -> bool {
        matches!(self, MoveResult::Landed { .. })
    }
}

/// Engine-side event, drained by the host for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Spawned { kind: PieceKind, x: i8 },
    LinesCleared { count: u32, score: u32 },
    GameOver { score: u32, lines: u32 },
}
