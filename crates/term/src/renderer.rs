//! TerminalRenderer: shows a pixel frame on a real terminal.
//!
//! Each LED is drawn as a two-column block tinted by brightness. After the first
//! frame only changed LEDs are redrawn.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::fb::PixelFrame;
use crate::types::MAX_BRIGHTNESS;

/// Terminal column of the matrix's left edge.
const ORIGIN_X: u16 = 2;
/// Terminal row of the matrix's top edge.
const ORIGIN_Y: u16 = 1;
/// Terminal columns per LED, including one gap column.
const LED_PITCH: u16 = 3;
const LED_GLYPH: &str = "██";

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<PixelFrame>,
    last_status: String,
    buf: Vec<u8>,
    /// Keyboard enhancement pushed on enter (press/repeat/release reported)
    key_event_types: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            last_status: String::new(),
            buf: Vec::with_capacity(4 * 1024),
            key_event_types: false,
        }
    }

    /// The terminal reports key repeat and release as separate events.
    ///
    /// Only meaningful after [`TerminalRenderer::enter`].
    pub fn reports_key_event_types(&self) -> bool {
        self.key_event_types
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.key_event_types = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if self.key_event_types {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.key_event_types {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
            self.key_event_types = false;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
        self.last_status.clear();
    }

    /// Draw a frame, redrawing only LEDs that changed since the previous draw.
    pub fn draw(&mut self, frame: &PixelFrame) -> Result<()> {
        self.buf.clear();
        match self.last {
            Some(ref prev) => encode_diff_into(prev, frame, &mut self.buf)?,
            None => encode_full_into(frame, &mut self.buf)?,
        }
        self.flush_buf()?;
        self.last = Some(*frame);
        Ok(())
    }

    /// Write a status line under the matrix when its text changes.
    pub fn draw_status(&mut self, status: &str) -> Result<()> {
        if status == self.last_status {
            return Ok(());
        }
        self.buf.clear();
        self.buf.queue(cursor::MoveTo(ORIGIN_X, status_row()))?;
        self.buf.queue(ResetColor)?;
        self.buf
            .queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
        self.buf.queue(Print(status))?;
        self.flush_buf()?;
        self.last_status.clear();
        self.last_status.push_str(status);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn status_row() -> u16 {
    ORIGIN_Y + crate::types::DISPLAY_HEIGHT as u16 + 1
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(frame: &PixelFrame, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    for y in 0..frame.height() {
        for_each_led(frame, y, 0, frame.width(), out)?;
    }
    out.queue(ResetColor)?;
    Ok(())
}

/// Encode a diff redraw (changed runs) into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_diff_into(prev: &PixelFrame, next: &PixelFrame, out: &mut Vec<u8>) -> Result<()> {
    let mut any = false;
    for_each_changed_run(prev, next, |x, y, len| {
        any = true;
        for_each_led(next, y, x, len, out)
    })?;
    if any {
        out.queue(ResetColor)?;
    }
    Ok(())
}

fn for_each_led(frame: &PixelFrame, y: u8, x: u8, len: u8, out: &mut Vec<u8>) -> Result<()> {
    for dx in 0..len {
        let lx = x + dx;
        let b = frame.get(lx, y).unwrap_or(0);
        out.queue(cursor::MoveTo(
            ORIGIN_X + lx as u16 * LED_PITCH,
            ORIGIN_Y + y as u16,
        ))?;
        out.queue(SetForegroundColor(led_color(b)))?;
        out.queue(Print(LED_GLYPH))?;
    }
    Ok(())
}

/// Red LED tint for a brightness level; unlit LEDs stay faintly visible.
pub fn led_color(brightness: u8) -> Color {
    if brightness == 0 {
        return Color::Rgb { r: 40, g: 20, b: 20 };
    }
    let b = brightness.min(MAX_BRIGHTNESS) as u16;
    Color::Rgb {
        r: (70 + b * 20) as u8,
        g: (b * 6) as u8,
        b: (b * 3) as u8,
    }
}

fn for_each_changed_run(
    prev: &PixelFrame,
    next: &PixelFrame,
    mut f: impl FnMut(u8, u8, u8) -> Result<()>,
) -> Result<()> {
    let w = next.width();
    let h = next.height();

    for y in 0..h {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}
