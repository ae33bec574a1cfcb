//! Two-button pad for terminal environments.
//!
//! Turns key presses into the micro-console button contract: a latched press
//! edge per button plus a held level.
//!
//! Terminals that report key event types (press, repeat, release) give one
//! press event per physical press, so every press latches. Terminals that do
//! not report them send auto-repeats as presses and never send a release; there
//! a press only latches once the previous hold has ended, and a timeout ends
//! holds that no release will ever close.

use crate::map::KeyBinding;
use crate::types::{Button, ButtonInput};

/// In terminals without key-release events, a short timeout ends a "held"
/// state that no release will ever close.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

#[derive(Debug, Clone, Copy, Default)]
struct ButtonState {
    held: bool,
    /// Press edge waiting for `was_pressed`
    latched: bool,
    last_seen_ms: u32,
}

/// Tracks edge and level state for buttons A and B.
#[derive(Debug, Clone)]
pub struct ButtonPad {
    buttons: [ButtonState; 2],
    key_release_timeout_ms: u32,
    /// Press, repeat and release arrive as distinct events
    release_events: bool,
}

impl ButtonPad {
    pub fn new() -> Self {
        Self {
            buttons: [ButtonState::default(); 2],
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            release_events: false,
        }
    }

    /// Trust press/repeat/release event kinds instead of the timeout.
    pub fn with_release_events(mut self, enabled: bool) -> Self {
        self.release_events = enabled;
        self
    }

    pub fn release_events(&self) -> bool {
        self.release_events
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// A press event.
    ///
    /// With release events every press is a new edge. Without them a press
    /// while already held is an auto-repeat and only refreshes the hold.
    pub fn press(&mut self, button: Button, now_ms: u32) {
        let state = &mut self.buttons[button.index()];
        if self.release_events || !state.held {
            state.held = true;
            state.latched = true;
        }
        state.last_seen_ms = now_ms;
    }

    /// Hold a button without producing a press edge (rotation chord key).
    pub fn hold(&mut self, button: Button, now_ms: u32) {
        let state = &mut self.buttons[button.index()];
        state.held = true;
        state.last_seen_ms = now_ms;
    }

    pub fn release(&mut self, button: Button) {
        self.buttons[button.index()].held = false;
    }

    /// Apply a key press (or repeat) mapped by [`crate::handle_key_event`].
    pub fn apply(&mut self, binding: KeyBinding, now_ms: u32) {
        match binding {
            KeyBinding::Press(button) => self.press(button, now_ms),
            KeyBinding::Chord => {
                self.hold(Button::A, now_ms);
                self.hold(Button::B, now_ms);
            }
        }
    }

    /// Apply a key auto-repeat: keeps buttons held without new edges.
    pub fn apply_repeat(&mut self, binding: KeyBinding, now_ms: u32) {
        match binding {
            KeyBinding::Press(button) => self.hold(button, now_ms),
            KeyBinding::Chord => {
                self.hold(Button::A, now_ms);
                self.hold(Button::B, now_ms);
            }
        }
    }

    /// Apply a key release for terminals that report them.
    pub fn apply_release(&mut self, binding: KeyBinding) {
        match binding {
            KeyBinding::Press(button) => self.release(button),
            KeyBinding::Chord => {
                self.release(Button::A);
                self.release(Button::B);
            }
        }
    }

    /// Auto-release buttons whose key has been silent past the timeout.
    ///
    /// Does nothing when release events are reported.
    pub fn update(&mut self, now_ms: u32) {
        if self.release_events {
            return;
        }
        for state in self.buttons.iter_mut() {
            if state.held && now_ms.wrapping_sub(state.last_seen_ms) > self.key_release_timeout_ms {
                state.held = false;
            }
        }
    }
}

impl Default for ButtonPad {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonInput for ButtonPad {
    fn was_pressed(&mut self, button: Button) -> bool {
        std::mem::take(&mut self.buttons[button.index()].latched)
    }

    fn is_pressed(&self, button: Button) -> bool {
        self.buttons[button.index()].held
    }
}
