//! The key dispatch table.
//!
//! One match over the key code with modifier guards; every arm delegates to
//! buffer, viewport or session operations. Prompt modes intercept keys before
//! this table. The quit-confirmation counter resets on any key except Ctrl+Q
//! itself.

use crate::prompt::{self, Prompt, SearchState, Snapshot};
use crate::Session;
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_text::Motion;

const CTRL: KeyModifiers = KeyModifiers::CTRL;
const CTRL_SHIFT: KeyModifiers = KeyModifiers::CTRL.union(KeyModifiers::SHIFT);

pub(crate) fn dispatch(session: &mut Session, key: KeyEvent) {
    if !matches!(session.prompt, Prompt::None) {
        prompt::handle_key(session, key);
        return;
    }

    let m = key.mods;
    // Ctrl chords may arrive with the shifted character; fold them so the
    // table below matches on the lowercase form.
    let code = match key.code {
        KeyCode::Char(c) if m.contains(KeyModifiers::CTRL) => {
            KeyCode::Char(c.to_ascii_lowercase())
        }
        code => code,
    };
    match code {
        KeyCode::Char('q') if m == CTRL => {
            if session.confirm_quit() {
                return; // counter still counting down, do not reset it
            }
        }
        KeyCode::Char('s') if m == CTRL => session.save(),
        KeyCode::Char('f') if m == CTRL => open_search(session),
        KeyCode::Char('x') if m == CTRL => delete_line(session),
        KeyCode::Char('d') if m == CTRL_SHIFT => session.buffer.duplicate_line(),

        KeyCode::Enter if m.is_empty() => session.buffer.insert_newline(),
        KeyCode::Enter if m == CTRL => open_line_below(session),
        KeyCode::Enter if m == CTRL_SHIFT => open_line_above(session),

        KeyCode::Backspace if m.is_empty() => session.buffer.delete_char(),
        KeyCode::Backspace if m == CTRL => session.buffer.delete_word(),
        KeyCode::Delete if m.is_empty() => {
            session.buffer.move_cursor(Motion::Right);
            session.buffer.delete_char();
        }
        KeyCode::Delete if m == CTRL => delete_word_forward(session),

        KeyCode::Home => session.buffer.cx = 0,
        KeyCode::End => {
            if let Some(row) = session.buffer.current_row() {
                session.buffer.cx = row.len();
            }
        }

        KeyCode::Up if m.is_empty() => session.buffer.move_cursor(Motion::Up),
        KeyCode::Down if m.is_empty() => session.buffer.move_cursor(Motion::Down),
        KeyCode::Left if m.is_empty() => session.buffer.move_cursor(Motion::Left),
        KeyCode::Right if m.is_empty() => session.buffer.move_cursor(Motion::Right),
        KeyCode::Left if m == CTRL => session.buffer.move_cursor(Motion::WordLeft),
        KeyCode::Right if m == CTRL => session.buffer.move_cursor(Motion::WordRight),

        KeyCode::Up if m == CTRL => scroll_viewport_up(session),
        KeyCode::Down if m == CTRL => scroll_viewport_down(session),
        KeyCode::Up if m == CTRL_SHIFT => {
            session.buffer.move_row_up(session.buffer.cy);
            session.buffer.move_cursor(Motion::Up);
        }
        KeyCode::Down if m == CTRL_SHIFT => {
            session.buffer.move_row_down(session.buffer.cy);
            session.buffer.move_cursor(Motion::Down);
        }

        KeyCode::PageUp => page(session, Motion::Up),
        KeyCode::PageDown => page(session, Motion::Down),

        KeyCode::Tab if m.is_empty() => session.buffer.insert_char(b'\t'),
        KeyCode::Esc => {}
        KeyCode::Char('l') if m == CTRL => {}

        KeyCode::Char(c)
            if !m.intersects(KeyModifiers::CTRL | KeyModifiers::ALT)
                && c.is_ascii()
                && !c.is_ascii_control() =>
        {
            session.buffer.insert_char(c as u8);
        }
        _ => {
            tracing::debug!(target: "actions", key = %key, "unbound_key");
        }
    }
    session.reset_quit_counter();
}

fn open_search(session: &mut Session) {
    session.prompt = Prompt::Search(SearchState {
        query: String::new(),
        last_match: None,
        forward: true,
        saved: None,
        origin: Snapshot::capture(session),
    });
}

/// Ctrl+X: the line under the cursor goes away; the cursor stays on the same
/// visual line via the down/delete/up composition.
fn delete_line(session: &mut Session) {
    if session.buffer.current_row().is_none() {
        return;
    }
    session.buffer.move_cursor(Motion::Down);
    let at = session.buffer.cy - 1;
    session.buffer.delete_row(at);
    session.buffer.move_cursor(Motion::Up);
}

fn open_line_below(session: &mut Session) {
    if let Some(row) = session.buffer.current_row() {
        session.buffer.cx = row.len();
    }
    session.buffer.insert_newline();
}

fn open_line_above(session: &mut Session) {
    session.buffer.cx = 0;
    session.buffer.insert_newline();
    session.buffer.cy -= 1;
    session.buffer.clamp_cx();
}

/// Ctrl+Delete: delete the word right of the cursor. At the line end this is
/// a forward join; mid-line a sentinel byte of the opposite class is inserted
/// so the word-left pass of `delete_word` stops exactly at the cursor, then
/// the sentinel itself is removed.
fn delete_word_forward(session: &mut Session) {
    let Some(row) = session.buffer.current_row() else {
        return;
    };
    if session.buffer.cx == row.len() {
        session.buffer.move_cursor(Motion::Right);
        session.buffer.delete_char();
        return;
    }
    let next = row.chars()[session.buffer.cx];
    let sentinel = if next.is_ascii_alphanumeric() { b' ' } else { b'a' };
    session.buffer.insert_char(sentinel);
    session.buffer.move_cursor(Motion::WordRight);
    session.buffer.delete_word();
    session.buffer.delete_char();
}

fn scroll_viewport_up(session: &mut Session) {
    if session.viewport.rowoff == 0 {
        return;
    }
    session.viewport.scroll_up();
    if session.buffer.cy > session.viewport.rowoff + session.viewport.screenrows {
        session.buffer.move_cursor(Motion::Up);
    }
}

fn scroll_viewport_down(session: &mut Session) {
    if session.viewport.rowoff >= session.buffer.line_count() {
        return;
    }
    session.viewport.scroll_down(session.buffer.line_count());
    if session.buffer.cy < session.viewport.rowoff {
        session.buffer.move_cursor(Motion::Down);
    }
}

/// PageUp/Down: snap to the window edge, then move a full screen of rows.
fn page(session: &mut Session, motion: Motion) {
    match motion {
        Motion::Up => session.buffer.cy = session.viewport.rowoff,
        _ => {
            let target = session.viewport.rowoff + session.viewport.screenrows.saturating_sub(1);
            session.buffer.cy = target.min(session.buffer.line_count());
        }
    }
    session.buffer.clamp_cx();
    for _ in 0..session.viewport.screenrows {
        session.buffer.move_cursor(motion);
    }
}
