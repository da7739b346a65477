//! Game state module - the board & piece engine
//!
//! Ties together the board, piece shapes and the weighted generator. Handles
//! spawning, collision-checked movement and rotation, merging landed pieces,
//! line clearing, the gravity clock and the game-over transition.

use arrayvec::ArrayVec;

use crate::pieces::spawn_layout;
use crate::shape::Shape;
use crate::types::*;
use crate::{Board, PieceGenerator};

/// Capacity of the pending event buffer; older events are dropped first.
const EVENT_CAPACITY: usize = 16;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub design: Design,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece of `kind` at its spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        let (shape, design, (x, y)) = spawn_layout(kind);
        Self {
            kind,
            shape,
            design,
            x,
            y,
        }
    }

    /// Board coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Whether `shape` placed at `(x + dx, y + dy)` hits a wall, the floor or a
/// settled cell.
///
/// Cells above the top edge (negative row) count as free. Offsets of any size
/// are accepted; sums are taken in `i16` so they cannot wrap.
pub fn collides(board: &Board, shape: &Shape, x: i8, y: i8, dx: i8, dy: i8) -> bool {
    shape.cells().any(|(sx, sy)| {
        let nx = i16::from(x) + i16::from(sx) + i16::from(dx);
        let ny = i16::from(y) + i16::from(sy) + i16::from(dy);
        if nx < 0 || nx >= i16::from(BOARD_WIDTH) || ny >= i16::from(BOARD_HEIGHT) {
            return true;
        }
        // In range for the board or above it; rows above the top stay free.
        ny >= 0 && board.is_occupied(nx as i8, ny as i8)
    })
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    generator: PieceGenerator,
    score: u32,
    lines: u32,
    /// Successful spawns so far
    pieces: u32,
    drop_timer_ms: u32,
    game_over: bool,
    started: bool,
    events: ArrayVec<SessionEvent, EVENT_CAPACITY>,
}

impl GameState {
    /// Create a new game on an empty board with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_board(seed, Board::new())
    }

    /// Create a new game on a pre-filled board
    pub fn with_board(seed: u32, board: Board) -> Self {
        Self {
            board,
            active: None,
            generator: PieceGenerator::new(seed),
            score: 0,
            lines: 0,
            pieces: 0,
            drop_timer_ms: 0,
            game_over: false,
            started: false,
            events: ArrayVec::new(),
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    pub fn seed(&self) -> u32 {
        self.generator.seed()
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Milliseconds accumulated toward the next forced drop
    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    pub fn snapshot_into(&self, out: &mut crate::snapshot::GameSnapshot) {
        use crate::snapshot::ActiveSnapshot;

        self.board.write_rows(&mut out.board);
        out.active = if self.game_over {
            None
        } else {
            self.active.map(ActiveSnapshot::from)
        };
        out.score = self.score;
        out.lines = self.lines;
        out.pieces = self.pieces;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> crate::snapshot::GameSnapshot {
        let mut s = crate::snapshot::GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn a new piece drawn from the generator.
    ///
    /// Returns false (and ends the game) when it cannot be placed.
    pub fn spawn(&mut self) -> bool {
        let kind = self.generator.next_kind();
        self.spawn_kind(kind)
    }

    /// Spawn a specific piece kind at its spawn position.
    ///
    /// If the spawn cells collide with the board the game ends and no piece is
    /// active afterwards.
    pub fn spawn_kind(&mut self, kind: PieceKind) -> bool {
        if self.game_over {
            return false;
        }

        let piece = ActivePiece::spawn(kind);
        if collides(&self.board, &piece.shape, piece.x, piece.y, 0, 0) {
            self.active = None;
            self.game_over = true;
            self.push_event(SessionEvent::GameOver {
                score: self.score,
                lines: self.lines,
            });
            return false;
        }

        self.active = Some(piece);
        self.pieces = self.pieces.wrapping_add(1);
        self.push_event(SessionEvent::Spawned { kind, x: piece.x });
        true
    }

    /// Whether the active piece would collide after moving by `(dx, dy)`
    pub fn collides(&self, dx: i8, dy: i8) -> bool {
        match self.active {
            Some(p) => collides(&self.board, &p.shape, p.x, p.y, dx, dy),
            None => true,
        }
    }

    /// Move the active piece.
    ///
    /// A blocked downward move lands the piece: merge, clear lines, spawn.
    /// A blocked sideways move changes nothing. A move whose target position
    /// does not fit in `i8` counts as blocked.
    pub fn move_piece(&mut self, dx: i8, dy: i8) -> MoveResult {
        if self.game_over {
            return MoveResult::Ignored;
        }
        let Some(active) = self.active else {
            return MoveResult::Ignored;
        };

        let target = active
            .x
            .checked_add(dx)
            .zip(active.y.checked_add(dy));
        if let Some((x, y)) = target {
            if !collides(&self.board, &active.shape, active.x, active.y, dx, dy) {
                self.active = Some(ActivePiece { x, y, ..active });
                return MoveResult::Moved;
            }
        }

        if dy > 0 {
            self.merge();
            let lines_cleared = self.clear_lines();
            self.spawn();
            return MoveResult::Landed { lines_cleared };
        }

        MoveResult::Blocked
    }

    /// Write the active piece into the board and drop it.
    ///
    /// The piece's position already passed the collision test, so nothing is
    /// re-checked here.
    pub fn merge(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        self.board
            .stamp(active.shape.cells(), active.x, active.y, active.design);
    }

    /// Clear full rows and credit the score.
    ///
    /// Returns the number of rows cleared.
    pub fn clear_lines(&mut self) -> u32 {
        let cleared = self.board.clear_full_rows().len() as u32;
        if cleared > 0 {
            self.lines += cleared;
            self.score += cleared * LINE_CLEAR_BONUS;
            self.push_event(SessionEvent::LinesCleared {
                count: cleared,
                score: self.score,
            });
        }
        cleared
    }

    /// Rotate the active piece a quarter turn in place (no wall kicks).
    pub fn rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.shape.rotated();
        if collides(&self.board, &rotated, active.x, active.y, 0, 0) {
            return false;
        }

        self.active = Some(ActivePiece {
            shape: rotated,
            ..active
        });
        true
    }

    /// Advance the gravity clock by `elapsed_ms`.
    ///
    /// Once more than [`DROP_INTERVAL_MS`] has accumulated the piece moves
    /// down one row (landing it if blocked) and the clock restarts. Returns
    /// true when a forced drop happened.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.game_over || !self.started {
            return false;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms <= DROP_INTERVAL_MS {
            return false;
        }

        self.drop_timer_ms = 0;
        self.move_piece(0, 1);
        true
    }

    /// Apply a player command
    pub fn apply_command(&mut self, command: Command) -> MoveResult {
        if self.game_over {
            return MoveResult::Ignored;
        }
        match command {
            Command::MoveLeft => self.move_piece(-1, 0),
            Command::MoveRight => self.move_piece(1, 0),
            Command::MoveDown => self.move_piece(0, 1),
            Command::Rotate => {
                if self.rotate() {
                    MoveResult::Moved
                } else {
                    MoveResult::Blocked
                }
            }
        }
    }

    /// Take all events recorded since the last call, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = SessionEvent> + '_ {
        self.events.drain(..)
    }

    fn push_event(&mut self, event: SessionEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::get_shape;

    const BLUE: Design = Design::Color(PieceColor::Blue);

    fn started_with(kind: PieceKind) -> GameState {
        let mut state = GameState::new(12345);
        state.started = true;
        assert!(state.spawn_kind(kind));
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert!(!state.started);
        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.pieces, 0);
        assert!(state.active.is_none());
        assert_eq!(state.seed(), 12345);
    }

    #[test]
    fn test_game_start_spawns_once() {
        let mut state = GameState::new(12345);
        state.start();
        assert!(state.started);
        assert!(state.active.is_some());
        assert_eq!(state.pieces, 1);

        let first = state.active;
        state.start();
        assert_eq!(state.active, first);
        assert_eq!(state.pieces, 1);
    }

    #[test]
    fn test_spawn_position_is_centered() {
        let state = started_with(PieceKind::I);
        let p = state.active.unwrap();
        assert_eq!((p.x, p.y), (3, 0));
        assert_eq!(p.shape, get_shape(PieceKind::I));
        assert_eq!(p.design, Design::Color(PieceColor::Cyan));
    }

    #[test]
    fn test_collides_walls_and_floor() {
        let board = Board::new();
        let o = get_shape(PieceKind::O);

        assert!(!collides(&board, &o, 0, 0, 0, 0));
        assert!(collides(&board, &o, 0, 0, -1, 0));
        assert!(!collides(&board, &o, 8, 0, 0, 0));
        assert!(collides(&board, &o, 8, 0, 1, 0));
        assert!(!collides(&board, &o, 4, 18, 0, 0));
        assert!(collides(&board, &o, 4, 18, 0, 1));
    }

    #[test]
    fn test_collides_extreme_offsets() {
        let board = Board::new();
        let o = get_shape(PieceKind::O);

        assert!(collides(&board, &o, 4, 0, i8::MAX, 0));
        assert!(collides(&board, &o, 4, 0, i8::MIN, 0));
        assert!(collides(&board, &o, 4, 0, 0, i8::MAX));
        // Far above the board is still free: there is no ceiling.
        assert!(!collides(&board, &o, 4, -100, 0, -100));
    }

    #[test]
    fn test_move_with_huge_offsets_never_wraps() {
        let mut state = started_with(PieceKind::O);
        assert_eq!(state.move_piece(i8::MAX, 0), MoveResult::Blocked);
        assert_eq!(state.move_piece(i8::MIN, 0), MoveResult::Blocked);

        // Upward moves are allowed until the row would leave the i8 range.
        assert_eq!(state.move_piece(0, -100), MoveResult::Moved);
        assert_eq!(state.active.unwrap().y, -100);
        assert_eq!(state.move_piece(0, -100), MoveResult::Blocked);
        assert_eq!(state.active.unwrap().y, -100);
        assert_eq!(state.board.filled_count(), 0);
    }

    #[test]
    fn test_collides_ignores_rows_above_board() {
        let board = Board::new();
        let bar = get_shape(PieceKind::I).rotated();
        assert!(!collides(&board, &bar, 4, -3, 0, 0));
        assert!(!collides(&board, &bar, 4, 0, 0, -2));
        // Columns are still checked above the board.
        assert!(collides(&board, &bar, -1, -3, 0, 0));
    }

    #[test]
    fn test_collides_settled_cell() {
        let mut board = Board::new();
        board.set(5, 10, Some(BLUE));
        let x = get_shape(PieceKind::X);
        assert!(collides(&board, &x, 5, 9, 0, 1));
        assert!(!collides(&board, &x, 5, 9, 1, 1));
    }

    #[test]
    fn test_move_translates_piece() {
        let mut state = started_with(PieceKind::T);
        assert_eq!(state.move_piece(1, 0), MoveResult::Moved);
        assert_eq!(state.active.unwrap().x, 5);
        assert_eq!(state.move_piece(-1, 0), MoveResult::Moved);
        assert_eq!(state.move_piece(0, 1), MoveResult::Moved);
        let p = state.active.unwrap();
        assert_eq!((p.x, p.y), (4, 1));
    }

    #[test]
    fn test_sideways_block_never_merges() {
        let mut state = started_with(PieceKind::O);
        for _ in 0..4 {
            assert_eq!(state.move_piece(-1, 0), MoveResult::Moved);
        }
        assert_eq!(state.move_piece(-1, 0), MoveResult::Blocked);
        assert_eq!(state.board.filled_count(), 0);
        assert_eq!(state.active.unwrap().x, 0);
        assert_eq!(state.pieces, 1);
    }

    #[test]
    fn test_blocked_drop_lands_and_spawns() {
        let mut state = started_with(PieceKind::O);
        for _ in 0..18 {
            assert_eq!(state.move_piece(0, 1), MoveResult::Moved);
        }
        assert_eq!(state.active.unwrap().y, 18);
        assert_eq!(state.board.filled_count(), 0);

        let result = state.move_piece(0, 1);
        assert_eq!(result, MoveResult::Landed { lines_cleared: 0 });
        assert_eq!(state.board.filled_count(), 4);
        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(state.board.get(x, y), Some(Some(PieceKind::O.design())));
        }
        assert_eq!(state.pieces, 2);
        assert_eq!(state.active.unwrap().y, 0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_landing_clears_completed_row() {
        let mut board = Board::new();
        board.fill_row(19, BLUE, &[5]);
        let mut state = GameState::with_board(7, board);
        state.started = true;
        assert!(state.spawn_kind(PieceKind::X));

        while state.move_piece(0, 1) == MoveResult::Moved {}

        assert_eq!(state.score, LINE_CLEAR_BONUS);
        assert_eq!(state.lines, 1);
        assert_eq!(state.board.filled_count(), 0);
    }

    #[test]
    fn test_clear_lines_scores_each_full_row() {
        let mut board = Board::new();
        board.fill_row(12, BLUE, &[]);
        board.fill_row(13, BLUE, &[0]);
        board.fill_row(18, BLUE, &[]);
        board.fill_row(19, BLUE, &[]);
        let mut state = GameState::with_board(1, board);

        assert_eq!(state.clear_lines(), 3);
        assert_eq!(state.score, 300);
        assert_eq!(state.board.filled_count(), 9);
        assert!(!state.board.is_row_full(19));
        assert_eq!(state.board.height(), BOARD_HEIGHT);

        assert_eq!(state.clear_lines(), 0);
        assert_eq!(state.score, 300);
    }

    #[test]
    fn test_merge_consumes_active_piece() {
        let mut state = started_with(PieceKind::L);
        state.merge();
        assert!(state.active.is_none());
        assert!(state.board.is_occupied(6, 0));
        assert!(state.board.is_occupied(4, 1));
        assert!(state.board.is_occupied(5, 1));
        assert!(state.board.is_occupied(6, 1));
        assert_eq!(state.board.filled_count(), 4);
    }

    #[test]
    fn test_rotate_in_place() {
        let mut state = started_with(PieceKind::T);
        let before = state.active.unwrap();
        assert!(state.rotate());
        let after = state.active.unwrap();
        assert_eq!((after.x, after.y), (before.x, before.y));
        assert_eq!(after.shape, before.shape.rotated());
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        let mut state = started_with(PieceKind::S);
        state.move_piece(0, 1);
        let original = state.active.unwrap().shape;
        for _ in 0..4 {
            assert!(state.rotate());
        }
        assert_eq!(state.active.unwrap().shape, original);
    }

    #[test]
    fn test_rotate_rejected_against_wall() {
        let mut state = started_with(PieceKind::I);
        // Stand the bar up, push it to the right wall, then try to lay it down.
        assert!(state.rotate());
        while state.move_piece(1, 0) == MoveResult::Moved {}
        assert_eq!(state.active.unwrap().x, 9);
        let before = state.active.unwrap();
        assert!(!state.rotate());
        assert_eq!(state.active.unwrap(), before);
    }

    #[test]
    fn test_spawn_collision_ends_game() {
        let mut board = Board::new();
        board.set(4, 0, Some(BLUE));
        let mut state = GameState::with_board(3, board);
        state.started = true;

        assert!(!state.spawn_kind(PieceKind::O));
        assert!(state.game_over);
        assert!(state.active.is_none());
        assert_eq!(state.move_piece(1, 0), MoveResult::Ignored);
        assert!(!state.rotate());
        assert!(!state.tick(1000));
        assert_eq!(state.apply_command(Command::MoveDown), MoveResult::Ignored);
        assert!(!state.spawn_kind(PieceKind::X));
    }

    #[test]
    fn test_tick_drops_after_interval() {
        let mut state = started_with(PieceKind::O);
        assert!(!state.tick(DROP_INTERVAL_MS));
        assert_eq!(state.active.unwrap().y, 0);
        assert!(state.tick(1));
        assert_eq!(state.active.unwrap().y, 1);
        assert_eq!(state.drop_timer_ms, 0);
    }

    #[test]
    fn test_tick_waits_for_start() {
        let mut state = GameState::new(5);
        assert!(!state.tick(10_000));
        assert_eq!(state.drop_timer_ms, 0);
    }

    #[test]
    fn test_apply_command_mapping() {
        let mut state = started_with(PieceKind::J);
        assert_eq!(state.apply_command(Command::MoveLeft), MoveResult::Moved);
        assert_eq!(state.active.unwrap().x, 3);
        assert_eq!(state.apply_command(Command::MoveRight), MoveResult::Moved);
        assert_eq!(state.apply_command(Command::MoveDown), MoveResult::Moved);
        assert_eq!(state.active.unwrap().y, 1);
        assert_eq!(state.apply_command(Command::Rotate), MoveResult::Moved);
        assert_eq!(state.active.unwrap().shape.width(), 2);
    }

    #[test]
    fn test_events_are_recorded_and_drained() {
        let mut state = started_with(PieceKind::X);
        let events: Vec<_> = state.drain_events().collect();
        assert_eq!(
            events,
            vec![SessionEvent::Spawned {
                kind: PieceKind::X,
                x: 5
            }]
        );
        assert_eq!(state.drain_events().count(), 0);
    }

    #[test]
    fn test_event_buffer_drops_oldest() {
        let mut state = GameState::new(9);
        state.started = true;
        for _ in 0..EVENT_CAPACITY + 3 {
            state.active = None;
            state.spawn_kind(PieceKind::X);
        }
        assert_eq!(state.drain_events().count(), EVENT_CAPACITY);
    }

    #[test]
    fn test_snapshot_hides_piece_after_game_over() {
        let mut state = started_with(PieceKind::T);
        let snap = state.snapshot();
        assert!(snap.active.is_some());

        state.game_over = true;
        let snap = state.snapshot();
        assert!(snap.active.is_none());
        assert!(snap.game_over);
    }
}
