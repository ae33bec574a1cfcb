//! LED Tetris (workspace facade crate).
//!
//! Re-exports the member crates as `led_tetris::{core,input,term,types}` so the
//! binary, integration tests and benches share one import path.

pub use led_tetris_core as core;
pub use led_tetris_input as input;
pub use led_tetris_term as term;
pub use led_tetris_types as types;
