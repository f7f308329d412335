//! Static tetromino definitions.
//!
//! Shapes are given in their spawn orientation with row 0 on top. Pivots are
//! in doubled coordinates (see [`Pivot`]): `Pivot::new(3, 1)` is the point
//! (1.5, 0.5).

use ratatui::style::Color;

use crate::components::{Cell, PieceShape, Pivot, TetrominoType};

const fn shape(blocks: [(i32, i32); 4], pivot: Pivot, color: Color) -> PieceShape {
    PieceShape {
        blocks: [
            Cell::new(blocks[0].0, blocks[0].1),
            Cell::new(blocks[1].0, blocks[1].1),
            Cell::new(blocks[2].0, blocks[2].1),
            Cell::new(blocks[3].0, blocks[3].1),
        ],
        pivot,
        color,
    }
}

const I_SHAPE: PieceShape = shape([(0, 0), (1, 0), (2, 0), (3, 0)], Pivot::new(3, 1), Color::Cyan);
const O_SHAPE: PieceShape = shape([(0, 0), (1, 0), (0, 1), (1, 1)], Pivot::new(1, 1), Color::Yellow);
const T_SHAPE: PieceShape = shape([(1, 0), (0, 1), (1, 1), (2, 1)], Pivot::new(2, 2), Color::Magenta);
const J_SHAPE: PieceShape = shape([(0, 0), (0, 1), (1, 1), (2, 1)], Pivot::new(2, 2), Color::Blue);
const L_SHAPE: PieceShape = shape(
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    Pivot::new(2, 2),
    Color::Rgb(255, 140, 0),
);
const S_SHAPE: PieceShape = shape([(1, 0), (2, 0), (0, 1), (1, 1)], Pivot::new(2, 2), Color::Green);
const Z_SHAPE: PieceShape = shape([(0, 0), (1, 0), (1, 1), (2, 1)], Pivot::new(2, 2), Color::Red);

#[must_use]
pub const fn shape_of(kind: TetrominoType) -> PieceShape {
    match kind {
        TetrominoType::I => I_SHAPE,
        TetrominoType::O => O_SHAPE,
        TetrominoType::T => T_SHAPE,
        TetrominoType::J => J_SHAPE,
        TetrominoType::L => L_SHAPE,
        TetrominoType::S => S_SHAPE,
        TetrominoType::Z => Z_SHAPE,
    }
}
