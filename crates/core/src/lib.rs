//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the falling-block rules for a 5x5 LED micro-console:
//! the placed-block board, piece geometry, the active piece controller and the
//! lives/level state machine. It has **no dependencies** on display, input or
//! clock hardware; those arrive as plain values (`now_ms`, [`InputFrame`]) or
//! through the [`RandomSource`] trait.
//!
//! # Module Structure
//!
//! - [`shape`]: block shapes and the 90 degree rotation transform
//! - [`board`]: the placed-block grid, collision testing and line clearing
//! - [`piece`]: the active piece: spawn, shift, rotate with kicks, gravity and lock
//! - [`game_state`]: lives, levels, fall speed and the life-lost / game-over cycle
//! - [`rng`]: weighted shape selection over a uniform random source
//!
//! # Rules
//!
//! This is a reduced ruleset:
//!
//! - **Five shapes**: I (5%), T (25%), S (25%), L (22.5%), Square (22.5%)
//! - **Rotation**: clockwise only, triggered by holding both buttons, with a
//!   cooldown and kicks of one column left then right
//! - **No hard drop, hold, preview or scoring table**
//! - **Lives**: a blocked spawn costs a life and clears the board; losing the last
//!   life resets the whole session
//!
//! # Example
//!
//! ```
//! use led_tetris_core::{GameState, SimpleRng};
//! use led_tetris_types::{InputFrame, Tuning};
//!
//! let mut game = GameState::new(Tuning::leveled(), SimpleRng::new(12345), 0);
//!
//! // Shift left on this poll
//! let input = InputFrame { shift_left: true, ..InputFrame::default() };
//! game.tick(10, input);
//!
//! // Gravity runs once more than the fall interval has elapsed
//! let out = game.tick(1001, InputFrame::default());
//! assert!(out.gravity);
//! assert_eq!(game.lives(), 10);
//! ```
//!
//! # Timing
//!
//! All timestamps are `u32` milliseconds from a monotonic counter and are
//! compared with wrapping subtraction. Call [`GameState::tick`] once per poll
//! (50ms on the device).

pub mod board;
pub mod game_state;
pub mod piece;
pub mod rng;
pub mod shape;

pub use led_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{GameState, Session, TickOutcome, Transition};
pub use piece::{FallOutcome, Piece, PieceController, SpawnOutcome, KICK_OFFSETS};
pub use rng::{draw_shape, RandomSource, SimpleRng};
pub use shape::{rotate, Shape};
pub use types::InputFrame;
