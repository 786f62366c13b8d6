//! Prompt modes (save-as and incremental search).
//!
//! Prompt state is a tagged enum on the session rather than a callback: each
//! variant carries exactly the state its mode needs, and key handling is a
//! plain match. The search variant owns the wrap-around stepping state plus
//! the snapshot needed to put cursor and viewport back on cancel.

use crate::Session;
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_text::SavedHighlight;

#[derive(Debug, Default)]
pub enum Prompt {
    #[default]
    None,
    SaveAs {
        input: String,
    },
    Search(SearchState),
}

#[derive(Debug)]
pub struct SearchState {
    pub query: String,
    /// Row of the previous hit; stepping starts one past it.
    pub last_match: Option<usize>,
    pub forward: bool,
    /// Highlight snapshot of the currently painted hit.
    pub saved: Option<SavedHighlight>,
    /// Cursor and viewport at prompt open, restored on Esc.
    pub origin: Snapshot,
}

#[derive(Debug, Clone, Copy)]
pub struct Snapshot {
    pub cx: usize,
    pub cy: usize,
    pub rowoff: usize,
    pub coloff: usize,
}

impl Snapshot {
    pub fn capture(session: &Session) -> Self {
        Self {
            cx: session.buffer.cx,
            cy: session.buffer.cy,
            rowoff: session.viewport.rowoff,
            coloff: session.viewport.coloff,
        }
    }
}

fn printable(key: KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT)
                && c.is_ascii()
                && !c.is_ascii_control() =>
        {
            Some(c)
        }
        _ => None,
    }
}

pub(crate) fn handle_key(session: &mut Session, key: KeyEvent) {
    match std::mem::take(&mut session.prompt) {
        Prompt::None => {}
        Prompt::SaveAs { input } => handle_save_as(session, input, key),
        Prompt::Search(state) => handle_search(session, state, key),
    }
}

fn handle_save_as(session: &mut Session, mut input: String, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            session.set_status("Save aborted".to_string());
            return;
        }
        KeyCode::Enter => {
            if !input.is_empty() {
                session.accept_filename(input);
                session.save_to_disk();
                return;
            }
        }
        KeyCode::Backspace | KeyCode::Delete => {
            input.pop();
        }
        _ => {
            if let Some(c) = printable(key) {
                input.push(c);
            }
        }
    }
    session.prompt = Prompt::SaveAs { input };
}

fn handle_search(session: &mut Session, mut state: SearchState, key: KeyEvent) {
    // The previous hit's paint is undone before anything else, matching the
    // one-hit-highlighted-at-a-time behavior.
    if let Some(saved) = state.saved.take() {
        session.buffer.restore_overlay(saved);
    }

    match key.code {
        KeyCode::Enter => {
            session.clear_status();
            return;
        }
        KeyCode::Esc => {
            session.buffer.cx = state.origin.cx;
            session.buffer.cy = state.origin.cy;
            session.viewport.rowoff = state.origin.rowoff;
            session.viewport.coloff = state.origin.coloff;
            session.clear_status();
            return;
        }
        KeyCode::Right | KeyCode::Down => state.forward = true,
        KeyCode::Left | KeyCode::Up => state.forward = false,
        KeyCode::Backspace | KeyCode::Delete => {
            state.query.pop();
            state.last_match = None;
        }
        // Any other key, bound or not, restarts the search from the top.
        _ => {
            if let Some(c) = printable(key) {
                state.query.push(c);
            }
            state.last_match = None;
        }
    }

    if state.last_match.is_none() {
        state.forward = true;
    }
    if let Some(hit) = session
        .buffer
        .find_wrapped(state.query.as_bytes(), state.last_match, state.forward)
    {
        state.last_match = Some(hit.row);
        session.buffer.cy = hit.row;
        session.buffer.cx = session.buffer.rows()[hit.row].rx_to_cx(hit.rx);
        // Forces the next scroll pass to put the hit at the top of the window.
        session.viewport.rowoff = session.buffer.line_count();
        state.saved = session.buffer.apply_match_overlay(hit, state.query.len());
    }
    session.prompt = Prompt::Search(state);
}
