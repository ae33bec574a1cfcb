//! Terminal input module (engine-facing).
//!
//! This module is independent of the engine. It maps `crossterm` key events onto
//! the two micro-console buttons and provides a [`ButtonPad`] implementing the
//! [`ButtonInput`](crate::types::ButtonInput) contract (including terminals
//! without key-release events).

pub mod handler;
pub mod map;

pub use led_tetris_types as types;

pub use handler::{ButtonPad, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
pub use map::{handle_key_event, should_quit, KeyBinding};
