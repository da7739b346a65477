//! Engine scenarios driven through the public API

use tui_blocks::core::{Board, GameState};
use tui_blocks::types::{
    Command, Design, MoveResult, PieceColor, PieceKind, SessionEvent, BOARD_HEIGHT,
    DROP_INTERVAL_MS,
};

const BLUE: Design = Design::Color(PieceColor::Blue);

/// A started game whose active piece is `kind` at its spawn position.
fn game_with(board: Board, kind: PieceKind) -> GameState {
    let mut state = GameState::with_board(12345, board);
    state.start();
    assert!(state.spawn_kind(kind));
    state
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert!(!state.started());
    assert!(state.active().is_none());

    state.start();
    assert!(state.started());
    assert!(state.active().is_some());
    assert!(!state.game_over());
    assert_eq!(state.pieces(), 1);
    assert_eq!(state.score(), 0);
}

#[test]
fn test_o_piece_falls_to_the_floor() {
    let mut state = game_with(Board::new(), PieceKind::O);
    let piece = state.active().unwrap();
    assert_eq!((piece.x, piece.y), (4, 0));

    for step in 0..18 {
        assert_eq!(state.move_piece(0, 1), MoveResult::Moved, "step {}", step);
    }
    assert_eq!(state.active().unwrap().y, 18);

    assert_eq!(
        state.move_piece(0, 1),
        MoveResult::Landed { lines_cleared: 0 }
    );

    let yellow = PieceKind::O.design();
    for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
        assert_eq!(state.board().get(x, y), Some(Some(yellow)));
    }
    assert_eq!(state.board().filled_count(), 4);

    // A fresh piece is already falling.
    let next = state.active().unwrap();
    assert_eq!(next.y, 0);
    assert_eq!(state.score(), 0);
}

#[test]
fn test_landing_completes_a_row() {
    let mut board = Board::new();
    board.fill_row(BOARD_HEIGHT as i8 - 1, BLUE, &[4, 5]);
    let mut state = game_with(board, PieceKind::O);

    let result = loop {
        match state.move_piece(0, 1) {
            MoveResult::Moved => continue,
            other => break other,
        }
    };
    assert_eq!(result, MoveResult::Landed { lines_cleared: 1 });
    assert_eq!(state.score(), 100);
    assert_eq!(state.lines(), 1);

    // The upper half of the O dropped into the cleared row.
    assert!(state.board().is_occupied(4, 19));
    assert!(state.board().is_occupied(5, 19));
    assert_eq!(state.board().filled_count(), 2);
}

#[test]
fn test_sideways_moves_stop_at_walls() {
    let mut state = game_with(Board::new(), PieceKind::O);

    for _ in 0..4 {
        assert_eq!(state.apply_command(Command::MoveLeft), MoveResult::Moved);
    }
    assert_eq!(state.active().unwrap().x, 0);
    assert_eq!(state.apply_command(Command::MoveLeft), MoveResult::Blocked);
    assert_eq!(state.active().unwrap().x, 0);

    for _ in 0..8 {
        assert_eq!(state.apply_command(Command::MoveRight), MoveResult::Moved);
    }
    assert_eq!(state.apply_command(Command::MoveRight), MoveResult::Blocked);
    assert_eq!(state.active().unwrap().x, 8);
}

#[test]
fn test_sideways_moves_stop_at_settled_cells() {
    let mut board = Board::new();
    board.set(3, 1, Some(BLUE));
    let mut state = game_with(board, PieceKind::O);

    assert_eq!(state.apply_command(Command::MoveLeft), MoveResult::Blocked);
    assert!(state.collides(-1, 0));
    assert!(!state.collides(1, 0));
}

#[test]
fn test_rotation_cycle_returns_to_start() {
    let mut state = game_with(Board::new(), PieceKind::T);
    for _ in 0..5 {
        state.move_piece(0, 1);
    }
    let before = state.active().unwrap();

    for _ in 0..4 {
        assert_eq!(state.apply_command(Command::Rotate), MoveResult::Moved);
    }
    assert_eq!(state.active().unwrap(), before);
}

#[test]
fn test_blocked_rotation_keeps_orientation() {
    let mut board = Board::new();
    // The I piece stands up in column 3, rows 0..=3.
    board.set(3, 2, Some(BLUE));
    let mut state = game_with(board, PieceKind::I);
    let before = state.active().unwrap();

    assert!(!state.rotate());
    assert_eq!(state.active().unwrap(), before);
}

#[test]
fn test_rotation_into_the_wall_is_refused() {
    let mut state = game_with(Board::new(), PieceKind::I);
    assert!(state.rotate());
    for _ in 0..6 {
        assert_eq!(state.apply_command(Command::MoveRight), MoveResult::Moved);
    }
    // Vertical I in column 9; lying down would need columns 9..=12.
    assert_eq!(state.active().unwrap().x, 9);
    assert_eq!(state.apply_command(Command::Rotate), MoveResult::Blocked);
}

#[test]
fn test_gravity_waits_for_more_than_the_interval() {
    let mut state = GameState::new(1);
    state.start();
    let y0 = state.active().unwrap().y;

    assert!(!state.tick(DROP_INTERVAL_MS));
    assert_eq!(state.active().unwrap().y, y0);
    assert_eq!(state.drop_timer_ms(), DROP_INTERVAL_MS);

    assert!(state.tick(1));
    assert_eq!(state.active().unwrap().y, y0 + 1);
    assert_eq!(state.drop_timer_ms(), 0);
}

#[test]
fn test_gravity_accumulates_small_ticks() {
    let mut state = GameState::new(1);
    state.start();
    let y0 = state.active().unwrap().y;

    let mut drops = 0;
    for _ in 0..19 {
        if state.tick(16) {
            drops += 1;
        }
    }
    // 19 * 16 = 304 > 300
    assert_eq!(drops, 1);
    assert_eq!(state.active().unwrap().y, y0 + 1);
}

#[test]
fn test_tick_before_start_does_nothing() {
    let mut state = GameState::new(1);
    assert!(!state.tick(10_000));
    assert!(state.active().is_none());
}

#[test]
fn test_blocked_spawn_ends_the_game() {
    let mut board = Board::new();
    // Every spawn position uses columns 3..=6 of the top row.
    board.fill_row(0, BLUE, &[0]);
    let mut state = GameState::with_board(9, board);
    state.start();

    assert!(state.game_over());
    assert!(state.active().is_none());
    assert_eq!(state.pieces(), 0);

    let events: Vec<_> = state.drain_events().collect();
    assert_eq!(events, vec![SessionEvent::GameOver { score: 0, lines: 0 }]);
}

#[test]
fn test_game_over_ignores_commands_and_ticks() {
    let mut board = Board::new();
    board.fill_row(0, BLUE, &[0]);
    let mut state = GameState::with_board(9, board);
    state.start();
    let before = state.board().clone();

    for command in [
        Command::MoveLeft,
        Command::MoveRight,
        Command::MoveDown,
        Command::Rotate,
    ] {
        assert_eq!(state.apply_command(command), MoveResult::Ignored);
    }
    assert!(!state.tick(10_000));
    assert!(!state.spawn());
    assert_eq!(state.board(), &before);
}

#[test]
fn test_dropping_forever_reaches_game_over() {
    let mut state = GameState::new(4242);
    state.start();

    let mut steps = 0;
    while !state.game_over() {
        state.apply_command(Command::MoveDown);
        steps += 1;
        assert!(steps < 10_000, "stack never reached the top");
    }

    assert!(state.active().is_none());
    assert!(state.snapshot().game_over);
    assert!(state.snapshot().active.is_none());
}

#[test]
fn test_events_follow_play() {
    let mut board = Board::new();
    board.fill_row(19, BLUE, &[4, 5]);
    let mut state = GameState::with_board(3, board);
    state.start();
    state.drain_events().for_each(drop);

    assert!(state.spawn_kind(PieceKind::O));
    while !state.move_piece(0, 1).landed() {}

    let events: Vec<_> = state.drain_events().collect();
    assert_eq!(events[0], SessionEvent::Spawned { kind: PieceKind::O, x: 4 });
    assert_eq!(events[1], SessionEvent::LinesCleared { count: 1, score: 100 });
    assert!(matches!(events[2], SessionEvent::Spawned { .. }));
    assert_eq!(events.len(), 3);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = GameState::new(77);
    let mut b = GameState::new(77);
    a.start();
    b.start();

    for i in 0..400 {
        let command = match i % 5 {
            0 => Command::MoveLeft,
            1 => Command::Rotate,
            2 => Command::MoveRight,
            _ => Command::MoveDown,
        };
        assert_eq!(a.apply_command(command), b.apply_command(command));
    }
    assert_eq!(a.board(), b.board());
    assert_eq!(a.score(), b.score());
    assert_eq!(a.pieces(), b.pieces());
}
