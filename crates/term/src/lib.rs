//! LED matrix rendering module.
//!
//! Maps game state onto the 5x5 display and flushes frames to a terminal that
//! stands in for the LED hardware.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Render through the [`DisplaySink`](crate::types::DisplaySink) contract so any
//!   pixel device can be driven
//! - Only redraw LEDs that changed

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use led_tetris_core as core;
pub use led_tetris_types as types;

pub use fb::PixelFrame;
pub use game_view::{piece_brightness, GameView};
pub use renderer::{encode_diff_into, encode_full_into, led_color, TerminalRenderer};
