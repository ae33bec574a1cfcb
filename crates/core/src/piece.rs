//! Piece module - the active falling piece and its movement rules
//!
//! Every move is validated by [`Board::collides`]; a rejected move leaves the
//! piece untouched and reports `false`. Only a blocked spawn is surfaced to the
//! caller as a distinct outcome.

use log::debug;

use crate::board::Board;
use crate::rng::{draw_shape, RandomSource};
use crate::shape::Shape;
use crate::types::ShapeKind;

/// Horizontal anchor offsets tried, in order, when rotating
pub const KICK_OFFSETS: [i8; 3] = [0, -1, 1];

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub shape: Shape,
    /// Board column of the shape's left edge
    pub x: i8,
    /// Board row of the shape's top edge
    pub y: i8,
}

impl Piece {
    /// Create a piece in spawn orientation at `(x, y)`
    pub fn new(kind: ShapeKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            shape: Shape::of(kind),
            x,
            y,
        }
    }

    /// Board coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled()
            .map(move |(px, py)| (self.x + px, self.y + py))
    }

    fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y)
    }
}

/// Result of placing a freshly drawn piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned,
    /// The spawn position overlaps placed blocks; no piece is active
    Blocked,
}

/// Result of one gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallOutcome {
    /// The piece moved down one row
    Moved,
    /// The piece could not move and was merged into the board
    Locked { cleared: usize, spawn: SpawnOutcome },
    /// No piece was active
    Idle,
}

/// Owns the active piece and advances it against a board
#[derive(Debug, Clone)]
pub struct PieceController {
    active: Option<Piece>,
    spawn_column: i8,
}

impl PieceController {
    pub fn new(spawn_column: i8) -> Self {
        Self {
            active: None,
            spawn_column,
        }
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    /// Replace the active piece without any collision check
    pub fn set_active(&mut self, piece: Option<Piece>) {
        self.active = piece;
    }

    /// Spawn column for a shape, clamped so its right edge stays on the board
    pub fn spawn_x(&self, shape: &Shape, board: &Board) -> i8 {
        let max_x = board.width() as i8 - shape.cols() as i8;
        self.spawn_column.min(max_x).max(0)
    }

    /// Place a new piece of `kind` at the top of the board
    pub fn spawn_kind(&mut self, board: &Board, kind: ShapeKind) -> SpawnOutcome {
        let shape = Shape::of(kind);
        let piece = Piece {
            kind,
            shape,
            x: self.spawn_x(&shape, board),
            y: 0,
        };

        if piece.collides(board) {
            debug!("spawn of {} blocked at x={}", kind.as_str(), piece.x);
            self.active = None;
            return SpawnOutcome::Blocked;
        }

        self.active = Some(piece);
        SpawnOutcome::Spawned
    }

    /// Draw a weighted random shape and spawn it
    pub fn spawn(&mut self, board: &Board, rng: &mut impl RandomSource) -> SpawnOutcome {
        let kind = draw_shape(rng);
        self.spawn_kind(board, kind)
    }

    /// Try to move the active piece by `(dx, dy)`
    pub fn try_move(&mut self, board: &Board, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = Piece {
            x: active.x + dx,
            y: active.y + dy,
            ..active
        };
        if moved.collides(board) {
            return false;
        }

        self.active = Some(moved);
        true
    }

    /// Horizontal shift by one column; `false` if blocked
    pub fn shift(&mut self, board: &Board, dx: i8) -> bool {
        self.try_move(board, dx, 0)
    }

    /// Rotate clockwise, kicking one column left then right when needed
    ///
    /// Returns `false` and leaves the piece unchanged when every candidate collides.
    pub fn rotate(&mut self, board: &Board) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.shape.rotate();
        for dx in KICK_OFFSETS {
            let x = active.x + dx;
            if !board.collides(&rotated, x, active.y) {
                self.active = Some(Piece {
                    shape: rotated,
                    x,
                    ..active
                });
                return true;
            }
        }

        false
    }

    /// Merge the active piece into the board and clear full rows
    ///
    /// Returns the number of rows cleared; no piece is active afterwards.
    pub fn lock(&mut self, board: &mut Board) -> usize {
        let Some(active) = self.active.take() else {
            return 0;
        };

        board.merge(&active.shape, active.x, active.y);
        let cleared = board.clear_lines();
        debug!(
            "locked {} at ({}, {}), cleared {}",
            active.kind.as_str(),
            active.x,
            active.y,
            cleared
        );
        cleared
    }

    /// One gravity step: fall a row, or lock, clear and spawn the next piece
    pub fn fall(&mut self, board: &mut Board, rng: &mut impl RandomSource) -> FallOutcome {
        if self.active.is_none() {
            return FallOutcome::Idle;
        }
        if self.try_move(board, 0, 1) {
            return FallOutcome::Moved;
        }

        let cleared = self.lock(board);
        let spawn = self.spawn(board, rng);
        FallOutcome::Locked { cleared, spawn }
    }
}
