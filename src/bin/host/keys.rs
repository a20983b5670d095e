//! Keyboard to command byte mapping.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press does.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Send the byte to the monitor
    Forward(u8),

    /// Send the byte, then end the session
    ForwardAndQuit(u8),

    /// End the session without sending anything
    Quit,

    Ignore,
}

impl KeyAction {
    pub fn ends_session(&self) -> bool {
        matches!(self, KeyAction::ForwardAndQuit(_) | KeyAction::Quit)
    }
}

pub fn map_key(event: &KeyEvent) -> KeyAction {
    if event.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }

    match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char(c @ ('s' | '1' | '2')) => KeyAction::Forward(c as u8),
        KeyCode::Char('e') => KeyAction::ForwardAndQuit(b'e'),
        _ => KeyAction::Ignore,
    }
}
