//! Shape module - block geometry and the rotation transform
//!
//! Shapes are small rectangular boolean grids stored inline (no allocation).
//! Rotation always produces a new value; a shape is never mutated in place.

use crate::types::ShapeKind;

/// Largest edge of any shape grid
pub const MAX_SHAPE_DIM: usize = 4;

const I_ROWS: &[&[u8]] = &[&[1, 1, 1, 1]];
const T_ROWS: &[&[u8]] = &[&[0, 1, 0], &[1, 1, 1]];
const S_ROWS: &[&[u8]] = &[&[0, 1, 1], &[1, 1, 0]];
const L_ROWS: &[&[u8]] = &[&[1, 1, 1], &[0, 0, 1]];
const SQUARE_ROWS: &[&[u8]] = &[&[1, 1], &[1, 1]];

/// Rectangular occupancy grid of a piece
///
/// Only the top-left `rows x cols` region of `cells` is meaningful; the rest is
/// always `false` so derived equality compares shapes by content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Spawn orientation for a shape kind
    pub fn of(kind: ShapeKind) -> Self {
        let rows = match kind {
            ShapeKind::I => I_ROWS,
            ShapeKind::T => T_ROWS,
            ShapeKind::S => S_ROWS,
            ShapeKind::L => L_ROWS,
            ShapeKind::Square => SQUARE_ROWS,
        };
        Self::from_rows(rows).unwrap_or_else(|| unreachable!("shape table is rectangular"))
    }

    /// Build a shape from rows of 0/1 values
    ///
    /// Returns `None` unless the grid is non-empty, rectangular and at most
    /// `MAX_SHAPE_DIM` on each edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use led_tetris_core::Shape;
    ///
    /// let bar = Shape::from_rows(&[&[1, 1, 1]]).unwrap();
    /// assert_eq!((bar.rows(), bar.cols()), (1, 3));
    /// assert!(Shape::from_rows(&[&[1, 1], &[1]]).is_none());
    /// ```
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if width == 0 || height > MAX_SHAPE_DIM || width > MAX_SHAPE_DIM {
            return None;
        }
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }

        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                cells[y][x] = v != 0;
            }
        }
        Some(Self {
            rows: height as u8,
            cols: width as u8,
            cells,
        })
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Local offsets `(px, py)` of every occupied cell, row-major
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows).flat_map(move |y| {
            (0..self.cols)
                .filter(move |&x| self.cells[y as usize][x as usize])
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// Rotate 90 degrees clockwise (reverse rows, then transpose)
    ///
    /// An `H x W` shape becomes `W x H`. No bounds checking happens here:
    /// callers validate the result against the board.
    pub fn rotate(&self) -> Shape {
        let h = self.rows as usize;
        let w = self.cols as usize;
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (y, row) in cells.iter_mut().enumerate().take(w) {
            for (x, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.cells[h - 1 - x][y];
            }
        }
        Shape {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

/// Free-function form of [`Shape::rotate`]
pub fn rotate(shape: &Shape) -> Shape {
    shape.rotate()
}
