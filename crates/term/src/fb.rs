//! Framebuffer for the 5x5 LED matrix.

use crate::types::{DisplaySink, DISPLAY_HEIGHT, DISPLAY_WIDTH, MAX_BRIGHTNESS};

const W: usize = DISPLAY_WIDTH as usize;
const H: usize = DISPLAY_HEIGHT as usize;

/// The micro-console SAD image, one row per string, brightness digits
const SAD: [&str; H] = ["00000", "09090", "00000", "09990", "90009"];

/// 5x5 grid of pixel brightness values (0-9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct PixelFrame {
    pixels: [[u8; W]; H],
}

impl PixelFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every pixel at full brightness (life-lost feedback).
    pub fn flash() -> Self {
        let mut frame = Self::new();
        frame.fill(MAX_BRIGHTNESS);
        frame
    }

    /// Frowning face (game-over feedback).
    pub fn sad() -> Self {
        let mut frame = Self::new();
        for (y, line) in SAD.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                frame.pixels[y][x] = ch.to_digit(10).unwrap_or(0) as u8;
            }
        }
        frame
    }

    pub fn width(&self) -> u8 {
        DISPLAY_WIDTH
    }

    pub fn height(&self) -> u8 {
        DISPLAY_HEIGHT
    }

    pub fn rows(&self) -> &[[u8; W]; H] {
        &self.pixels
    }

    pub fn get(&self, x: u8, y: u8) -> Option<u8> {
        self.pixels.get(y as usize)?.get(x as usize).copied()
    }

    pub fn fill(&mut self, brightness: u8) {
        let b = brightness.min(MAX_BRIGHTNESS);
        for row in self.pixels.iter_mut() {
            row.fill(b);
        }
    }

    /// Number of pixels with non-zero brightness.
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().flatten().filter(|&&b| b > 0).count()
    }

    /// Replay this frame onto another sink.
    pub fn present(&self, sink: &mut impl DisplaySink) {
        sink.clear();
        for (y, row) in self.pixels.iter().enumerate() {
            for (x, &b) in row.iter().enumerate() {
                if b > 0 {
                    sink.set_pixel(x as u8, y as u8, b);
                }
            }
        }
    }
}

impl DisplaySink for PixelFrame {
    fn clear(&mut self) {
        self.fill(0);
    }

    fn set_pixel(&mut self, x: u8, y: u8, brightness: u8) {
        if let Some(px) = self
            .pixels
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            *px = brightness.min(MAX_BRIGHTNESS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_pixel_ignores_out_of_range() {
        let mut frame = PixelFrame::new();
        frame.set_pixel(5, 0, 9);
        frame.set_pixel(0, 5, 9);
        assert_eq!(frame.lit_count(), 0);
    }

    #[test]
    fn set_pixel_clamps_brightness() {
        let mut frame = PixelFrame::new();
        frame.set_pixel(1, 1, 200);
        assert_eq!(frame.get(1, 1), Some(MAX_BRIGHTNESS));
    }

    #[test]
    fn sad_face_layout() {
        let sad = PixelFrame::sad();
        assert_eq!(sad.rows()[1], [0, 9, 0, 9, 0]);
        assert_eq!(sad.rows()[4], [9, 0, 0, 0, 9]);
        assert_eq!(sad.lit_count(), 7);
    }

    #[test]
    fn present_replays_onto_sink() {
        let mut a = PixelFrame::new();
        a.set_pixel(2, 3, 4);
        let mut b = PixelFrame::flash();
        a.present(&mut b);
        assert_eq!(a, b);
    }
}
