//! Pieces module - canonical shapes and spawn placement

use crate::shape::Shape;
use crate::types::{Design, PieceKind, BOARD_WIDTH};

/// Get the spawn orientation of a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_rows([[1, 1, 1, 1]]),
        PieceKind::O => Shape::from_rows([[1, 1], [1, 1]]),
        PieceKind::T => Shape::from_rows([[0, 1, 0], [1, 1, 1]]),
        PieceKind::L => Shape::from_rows([[0, 0, 1], [1, 1, 1]]),
        PieceKind::J => Shape::from_rows([[1, 0, 0], [1, 1, 1]]),
        PieceKind::S => Shape::from_rows([[0, 1, 1], [1, 1, 0]]),
        PieceKind::Z => Shape::from_rows([[1, 1, 0], [0, 1, 1]]),
        PieceKind::X => Shape::from_rows([[1]]),
    }
}

/// Spawn column for a shape: the bounding box is centered on the board,
/// rounding toward the left.
pub fn spawn_x(shape: &Shape) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (shape.width() / 2) as i8
}

/// Shape, design and spawn position for a freshly drawn kind
pub fn spawn_layout(kind: PieceKind) -> (Shape, Design, (i8, i8)) {
    let shape = get_shape(kind);
    let x = spawn_x(&shape);
    (shape, kind.design(), (x, 0))
}
