//! Key mapping from terminal events to the two buttons.

use crate::types::Button;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key does on the pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    Press(Button),
    /// Hold both buttons (rotate)
    Chord,
}

/// Map keyboard input to a button binding.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyBinding> {
    match key.code {
        KeyCode::Left
        | KeyCode::Char('a')
        | KeyCode::Char('A')
        | KeyCode::Char('h')
        | KeyCode::Char('H') => Some(KeyBinding::Press(Button::A)),
        KeyCode::Right
        | KeyCode::Char('b')
        | KeyCode::Char('B')
        | KeyCode::Char('d')
        | KeyCode::Char('D')
        | KeyCode::Char('l')
        | KeyCode::Char('L') => Some(KeyBinding::Press(Button::B)),

        KeyCode::Up
        | KeyCode::Char(' ')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('k')
        | KeyCode::Char('K') => Some(KeyBinding::Chord),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
