//! GameView: maps `core::GameState` onto the LED matrix.
//!
//! This module is pure (no I/O). It emits pixel commands into any
//! [`DisplaySink`], so it can be unit-tested against a [`crate::PixelFrame`].

use crate::core::{GameState, RandomSource};
use crate::types::{DisplaySink, DISPLAY_HEIGHT, DISPLAY_WIDTH, MAX_BRIGHTNESS};

/// Active-piece brightness for the remaining lives
///
/// Scales linearly with `lives / starting_lives`, floored, clamped to 1..=9.
pub fn piece_brightness(lives: u8, starting_lives: u8) -> u8 {
    if starting_lives == 0 {
        return MAX_BRIGHTNESS;
    }
    let scaled = lives as u32 * MAX_BRIGHTNESS as u32 / starting_lives as u32;
    scaled.clamp(1, MAX_BRIGHTNESS as u32) as u8
}

/// Renders board, active piece and rotation border.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Clear `sink` and draw the current game.
    ///
    /// Board rows `[hidden_rows, hidden_rows + 5)` are visible; anything above
    /// the window (the hidden spawn buffer) is not drawn.
    pub fn render<R: RandomSource>(&self, game: &GameState<R>, sink: &mut impl DisplaySink) {
        let tuning = game.tuning();
        let hidden = tuning.hidden_rows as i16;
        let visible = tuning.visible_rows() as i16;

        sink.clear();

        let to_display = |x: i16, y: i16| -> Option<(u8, u8)> {
            let dy = y - hidden;
            if x < 0 || x >= DISPLAY_WIDTH as i16 || dy < 0 || dy >= visible {
                return None;
            }
            Some((x as u8, dy as u8))
        };

        // Locked board cells.
        for (y, row) in game.board().rows().iter().enumerate() {
            for (x, &filled) in row.iter().enumerate() {
                if !filled {
                    continue;
                }
                if let Some((dx, dy)) = to_display(x as i16, y as i16) {
                    sink.set_pixel(dx, dy, tuning.board_brightness);
                }
            }
        }

        // Active piece.
        if let Some(active) = game.active() {
            let brightness = piece_brightness(game.lives(), tuning.starting_lives);
            for (x, y) in active.cells() {
                if let Some((dx, dy)) = to_display(x as i16, y as i16) {
                    sink.set_pixel(dx, dy, brightness);
                }
            }
        }

        if tuning.has_kick_slowdown && game.rotating() {
            self.draw_border(sink);
        }
    }

    fn draw_border(&self, sink: &mut impl DisplaySink) {
        let last_x = DISPLAY_WIDTH - 1;
        let last_y = DISPLAY_HEIGHT - 1;
        for y in 0..DISPLAY_HEIGHT {
            for x in 0..DISPLAY_WIDTH {
                if x == 0 || y == 0 || x == last_x || y == last_y {
                    sink.set_pixel(x, y, MAX_BRIGHTNESS);
                }
            }
        }
    }
}
