#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use std::collections::BTreeMap;

use ratatui::style::Color;

use crate::catalog;
use crate::game::{SPAWN_COLUMN_OFFSET, SPAWN_ROW_OFFSET};

/// A board coordinate. Rows grow downward; negative rows are the hidden zone
/// above the visible board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.col + dx, self.row + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Left,
    Right,
}

impl Direction {
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TetrominoType {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl TetrominoType {
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::I,
        TetrominoType::O,
        TetrominoType::T,
        TetrominoType::J,
        TetrominoType::L,
        TetrominoType::S,
        TetrominoType::Z,
    ];

    #[must_use]
    pub fn color(self) -> Color {
        catalog::shape_of(self).color
    }
}

/// Rotation centre stored at twice its real value, so the half-integer
/// pivots of I and O stay exact. `x2` and `y2` always share parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pivot {
    pub x2: i32,
    pub y2: i32,
}

impl Pivot {
    #[must_use]
    pub const fn new(x2: i32, y2: i32) -> Self {
        Self { x2, y2 }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x2 + dx * 2, self.y2 + dy * 2)
    }

    /// Rotates `cell` a quarter turn around this pivot.
    #[must_use]
    pub fn rotate(self, cell: Cell, rotation: Rotation) -> Cell {
        let dx = cell.col * 2 - self.x2;
        let dy = cell.row * 2 - self.y2;
        let (rx, ry) = match rotation {
            Rotation::Clockwise => (-dy, dx),
            Rotation::CounterClockwise => (dy, -dx),
        };
        Cell::new((self.x2 + rx) / 2, (self.y2 + ry) / 2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceShape {
    pub blocks: [Cell; 4],
    pub pivot: Pivot,
    pub color: Color,
}

/// The falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: TetrominoType,
    pub blocks: [Cell; 4],
    pub pivot: Pivot,
}

impl ActivePiece {
    /// Places the canonical shape of `kind` at the spawn offset.
    #[must_use]
    pub fn spawn(kind: TetrominoType) -> Self {
        let shape = catalog::shape_of(kind);
        Self {
            kind,
            blocks: shape.blocks,
            pivot: shape.pivot,
        }
        .translated(SPAWN_COLUMN_OFFSET, SPAWN_ROW_OFFSET)
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.kind.color()
    }

    #[must_use]
    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self {
            kind: self.kind,
            blocks: self.blocks.map(|cell| cell.offset(dx, dy)),
            pivot: self.pivot.offset(dx, dy),
        }
    }

    #[must_use]
    pub fn shifted(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        self.translated(dx, dy)
    }

    #[must_use]
    pub fn rotated(self, rotation: Rotation) -> Self {
        Self {
            kind: self.kind,
            blocks: self.blocks.map(|cell| self.pivot.rotate(cell, rotation)),
            pivot: self.pivot,
        }
    }
}

/// Contents of the hold slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldPiece {
    pub kind: TetrominoType,
    pub color: Color,
}

impl From<TetrominoType> for HeldPiece {
    fn from(kind: TetrominoType) -> Self {
        Self {
            kind,
            color: kind.color(),
        }
    }
}

/// Blocks that have locked into the board, keyed by cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettledBlocks {
    cells: BTreeMap<Cell, TetrominoType>,
}

impl SettledBlocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.cells.contains_key(&cell)
    }

    #[must_use]
    pub fn kind_at(&self, cell: Cell) -> Option<TetrominoType> {
        self.cells.get(&cell).copied()
    }

    #[must_use]
    pub fn color_at(&self, cell: Cell) -> Option<Color> {
        self.kind_at(cell).map(TetrominoType::color)
    }

    pub fn insert(&mut self, cell: Cell, kind: TetrominoType) {
        self.cells.insert(cell, kind);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, TetrominoType)> + '_ {
        self.cells.iter().map(|(cell, kind)| (*cell, *kind))
    }

    /// True when any block sits in the hidden zone above the board.
    #[must_use]
    pub fn reaches_hidden_zone(&self) -> bool {
        self.cells.keys().any(|cell| cell.row < 0)
    }

    /// Removes every row holding exactly `width` blocks and drops the blocks
    /// above them. A block at row `r` moves down by the number of cleared rows
    /// greater than `r`, measured on the pre-clear board. Returns the cleared
    /// rows in ascending order.
    pub fn clear_full_rows(&mut self, width: usize) -> Vec<i32> {
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for cell in self.cells.keys() {
            *counts.entry(cell.row).or_default() += 1;
        }

        let cleared: Vec<i32> = counts
            .into_iter()
            .filter(|&(_, count)| count == width)
            .map(|(row, _)| row)
            .collect();

        if cleared.is_empty() {
            return cleared;
        }

        let previous = std::mem::take(&mut self.cells);
        self.cells = previous
            .into_iter()
            .filter(|(cell, _)| !cleared.contains(&cell.row))
            .map(|(cell, kind)| {
                let drop = cleared.iter().filter(|&&row| row > cell.row).count() as i32;
                (cell.offset(0, drop), kind)
            })
            .collect();

        cleared
    }
}

impl FromIterator<(Cell, TetrominoType)> for SettledBlocks {
    fn from_iter<I: IntoIterator<Item = (Cell, TetrominoType)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
