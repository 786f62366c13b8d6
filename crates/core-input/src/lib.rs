//! Blocking input service: crossterm events mapped into editor events.
//!
//! The loop is single-threaded and event-driven, so a plain blocking
//! `crossterm::event::read` is the whole service. Mapping normalizes the
//! backend's event model down to the editor's: key presses only (Windows
//! delivers release and repeat kinds too), mouse and focus events dropped,
//! resizes passed through.

use anyhow::Result;
use core_events::{Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::event::{
    Event as CEvent, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind,
    KeyModifiers as CMods,
};

/// Block until an event the editor cares about arrives.
pub fn read_event() -> Result<Event> {
    loop {
        match crossterm::event::read()? {
            CEvent::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(event) = map_key(key) {
                    return Ok(Event::Key(event));
                }
                tracing::trace!(target: "input", code = ?key.code, "unmapped_key_dropped");
            }
            CEvent::Resize(cols, rows) => return Ok(Event::Resize(cols, rows)),
            _ => {}
        }
    }
}

pub(crate) fn map_key(key: CKeyEvent) -> Option<KeyEvent> {
    let code = match key.code {
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Tab => KeyCode::Tab,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::PageUp => KeyCode::PageUp,
        CKeyCode::PageDown => KeyCode::PageDown,
        CKeyCode::Delete => KeyCode::Delete,
        _ => return None,
    };
    Some(KeyEvent {
        code,
        mods: map_mods(key.modifiers),
    })
}

pub(crate) fn map_mods(m: CMods) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CMods::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CMods::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CMods::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}
