//! Logical input event model.
//!
//! The input decoder (core-input) translates raw terminal events into these
//! types; everything above it dispatches on `(KeyCode, KeyModifiers)` pairs
//! and never sees escape sequences. The key space deliberately covers every
//! chord the editor binds (Ctrl+Arrow, Ctrl+Shift+Arrow, Ctrl+Backspace,
//! Ctrl+Delete, Ctrl+Enter, Ctrl+Shift+Enter, Ctrl+Shift+D) so the dispatcher
//! is a plain match with no secondary decoding step.

use std::fmt;

/// Top-level event produced by the input decoder, consumed by the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Unmodified key, the common case for printable input.
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CTRL)
    }

    pub fn ctrl_shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CTRL | KeyModifiers::SHIFT)
    }
}

/// Normalized logical keys. Printable input arrives as `Char`; named keys
/// carry no payload. Modifier state lives in `KeyModifiers`, never in the
/// code itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL  = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const SHIFT = 0b0000_0100;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.code, self.mods)
    }
}
