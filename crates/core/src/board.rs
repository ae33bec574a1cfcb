//! Board module - manages the placed-block grid
//!
//! The board is `BOARD_WIDTH` columns wide and a tuning-selected number of rows
//! tall. Rows are stored top (index 0) to bottom in a fixed-capacity `ArrayVec`,
//! so line clears never allocate.
//! Coordinates: (x, y) where x grows to the right and y grows downwards.
//! Rows with `y < 0` lie above the board and are treated as open space.

use arrayvec::ArrayVec;

use crate::shape::Shape;
use crate::types::{BOARD_WIDTH, MAX_BOARD_ROWS};

/// A single board row; `true` marks an occupied cell
pub type Row = [bool; BOARD_WIDTH];

const EMPTY_ROW: Row = [false; BOARD_WIDTH];

/// The placed-block grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: ArrayVec<Row, MAX_BOARD_ROWS>,
    height: usize,
}

impl Board {
    /// Create an empty board with `height` rows (capped at `MAX_BOARD_ROWS`)
    pub fn new(height: usize) -> Self {
        let height = height.clamp(1, MAX_BOARD_ROWS);
        let mut rows = ArrayVec::new();
        for _ in 0..height {
            rows.push(EMPTY_ROW);
        }
        Self { rows, height }
    }

    /// Get width of the board
    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> usize {
        self.height
    }

    /// Rows top to bottom
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || x as usize >= BOARD_WIDTH || y as usize >= self.height {
            return None;
        }
        Some((x as usize, y as usize))
    }

    /// Occupancy at `(x, y)`; `None` if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<bool> {
        self.index(x, y).map(|(x, y)| self.rows[y][x])
    }

    /// Set occupancy at `(x, y)`
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, filled: bool) -> bool {
        match self.index(x, y) {
            Some((x, y)) => {
                self.rows[y][x] = filled;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(true))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .map(|row| row.iter().all(|&cell| cell))
            .unwrap_or(false)
    }

    /// Collision test for `shape` anchored at `(x, y)`
    ///
    /// An occupied shape cell collides when it maps left of column 0, right of the
    /// last column, at or below the bottom row, or onto a filled board cell.
    /// Cells mapping above row 0 never collide, which lets pieces hang above the
    /// board.
    pub fn collides(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.filled().any(|(px, py)| {
            let bx = x as i16 + px as i16;
            let by = y as i16 + py as i16;
            if bx < 0 || bx >= BOARD_WIDTH as i16 || by >= self.height as i16 {
                return true;
            }
            by >= 0 && self.rows[by as usize][bx as usize]
        })
    }

    /// Stamp every occupied shape cell onto the board
    ///
    /// Callers check [`Board::collides`] first. Cells that map outside the board
    /// (for example above row 0) are dropped.
    pub fn merge(&mut self, shape: &Shape, x: i8, y: i8) {
        for (px, py) in shape.filled() {
            self.set(x + px, y + py, true);
        }
    }

    /// Remove every full row and refill from the top with empty rows
    ///
    /// Remaining rows keep their relative order. Returns the number of rows removed.
    pub fn clear_lines(&mut self) -> usize {
        self.rows.retain(|row| !row.iter().all(|&cell| cell));
        let cleared = self.height - self.rows.len();
        for _ in 0..cleared {
            self.rows.insert(0, EMPTY_ROW);
        }
        cleared
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for row in self.rows.iter_mut() {
            *row = EMPTY_ROW;
        }
    }

    /// True when no cell is occupied
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.iter().all(|&cell| !cell))
    }

    /// Build a board from a row picture (`#` filled, anything else empty)
    ///
    /// Row count sets the height; each row is read up to `BOARD_WIDTH` columns.
    ///
    /// # Examples
    ///
    /// ```
    /// use led_tetris_core::Board;
    ///
    /// let board = Board::from_picture(&[".....", "#...#", "#####"]);
    /// assert_eq!(board.height(), 3);
    /// assert!(board.is_row_full(2));
    /// ```
    pub fn from_picture(picture: &[&str]) -> Self {
        let mut board = Self::new(picture.len());
        for (y, line) in picture.iter().enumerate().take(board.height) {
            for (x, ch) in line.chars().enumerate().take(BOARD_WIDTH) {
                board.rows[y][x] = ch == '#';
            }
        }
        board
    }
}
