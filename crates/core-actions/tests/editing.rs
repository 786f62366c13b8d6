//! End-to-end editing flows through the session key map.

use core_actions::Session;
use core_config::Config;
use core_events::{KeyCode, KeyEvent};
use std::io::Write;

fn session() -> Session {
    Session::new(Config::default(), 80, 24)
}

fn session_over(content: &str) -> (Session, tempfile::NamedTempFile) {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(content.as_bytes()).unwrap();
    tmp.flush().unwrap();
    let session = Session::open(
        Config::default(),
        80,
        24,
        tmp.path().to_str().unwrap(),
    )
    .unwrap();
    (session, tmp)
}

fn type_text(session: &mut Session, text: &str) {
    for c in text.chars() {
        let key = if c == '\n' {
            KeyEvent::plain(KeyCode::Enter)
        } else {
            KeyEvent::plain(KeyCode::Char(c))
        };
        session.handle_key(key);
    }
}

fn line(session: &Session, at: usize) -> &[u8] {
    session.buffer.row(at).expect("row").chars()
}

#[test]
fn typing_two_lines_leaves_cursor_after_last_char() {
    let mut s = session();
    type_text(&mut s, "hi\nx");
    assert_eq!(s.buffer.line_count(), 2);
    assert_eq!(line(&s, 0), b"hi");
    assert_eq!(line(&s, 1), b"x");
    assert_eq!((s.buffer.cy, s.buffer.cx), (1, 1));
}

#[test]
fn ctrl_enter_opens_indented_line_below() {
    let (mut s, _tmp) = session_over("    alpha\n");
    s.buffer.cx = 6; // mid-word
    s.handle_key(KeyEvent::ctrl(KeyCode::Enter));
    assert_eq!(line(&s, 0), b"    alpha");
    assert_eq!(line(&s, 1), b"    ");
    assert_eq!((s.buffer.cy, s.buffer.cx), (1, 4));
}

#[test]
fn ctrl_shift_enter_opens_line_above() {
    let (mut s, _tmp) = session_over("abc\n");
    s.buffer.cx = 2;
    s.handle_key(KeyEvent::ctrl_shift(KeyCode::Enter));
    assert_eq!(line(&s, 0), b"");
    assert_eq!(line(&s, 1), b"abc");
    assert_eq!((s.buffer.cy, s.buffer.cx), (0, 0));
}

#[test]
fn ctrl_x_deletes_current_line_keeping_position() {
    let (mut s, _tmp) = session_over("one\ntwo\nthree\n");
    s.buffer.cy = 1;
    s.handle_key(KeyEvent::ctrl(KeyCode::Char('x')));
    assert_eq!(s.buffer.line_count(), 2);
    assert_eq!(line(&s, 0), b"one");
    assert_eq!(line(&s, 1), b"three");
    assert_eq!(s.buffer.cy, 1);
}

#[test]
fn ctrl_x_on_last_line_moves_cursor_up() {
    let (mut s, _tmp) = session_over("only\n");
    s.handle_key(KeyEvent::ctrl(KeyCode::Char('x')));
    assert_eq!(s.buffer.line_count(), 0);
    assert_eq!((s.buffer.cy, s.buffer.cx), (0, 0));
}

#[test]
fn ctrl_shift_d_duplicates_line_below() {
    let (mut s, _tmp) = session_over("dup\nrest\n");
    s.buffer.cx = 2;
    s.handle_key(KeyEvent::ctrl_shift(KeyCode::Char('D')));
    assert_eq!(s.buffer.line_count(), 3);
    assert_eq!(line(&s, 0), b"dup");
    assert_eq!(line(&s, 1), b"dup");
    assert_eq!(line(&s, 2), b"rest");
    assert_eq!((s.buffer.cy, s.buffer.cx), (0, 2));
}

#[test]
fn ctrl_shift_arrows_move_line() {
    let (mut s, _tmp) = session_over("a\nb\nc\n");
    s.buffer.cy = 1;
    s.handle_key(KeyEvent::ctrl_shift(KeyCode::Up));
    assert_eq!(line(&s, 0), b"b");
    assert_eq!(line(&s, 1), b"a");
    assert_eq!(s.buffer.cy, 0);
    s.handle_key(KeyEvent::ctrl_shift(KeyCode::Down));
    assert_eq!(line(&s, 0), b"a");
    assert_eq!(s.buffer.cy, 1);
}

#[test]
fn delete_key_removes_byte_under_cursor() {
    let (mut s, _tmp) = session_over("ab\n");
    s.handle_key(KeyEvent::plain(KeyCode::Delete));
    assert_eq!(line(&s, 0), b"b");
    assert_eq!(s.buffer.cx, 0);
}

#[test]
fn ctrl_delete_removes_word_forward() {
    let (mut s, _tmp) = session_over("foo bar\n");
    s.handle_key(KeyEvent::ctrl(KeyCode::Delete));
    assert_eq!(line(&s, 0), b" bar");
    assert_eq!(s.buffer.cx, 0);
    assert_eq!(s.buffer.line_count(), 1);
}

#[test]
fn ctrl_delete_at_line_end_joins_lines() {
    let (mut s, _tmp) = session_over("ab\ncd\n");
    s.buffer.cx = 2;
    s.handle_key(KeyEvent::ctrl(KeyCode::Delete));
    assert_eq!(s.buffer.line_count(), 1);
    assert_eq!(line(&s, 0), b"abcd");
}

#[test]
fn ctrl_backspace_deletes_word_backward() {
    let (mut s, _tmp) = session_over("one two\n");
    s.buffer.cx = 7;
    s.handle_key(KeyEvent::ctrl(KeyCode::Backspace));
    assert_eq!(line(&s, 0), b"one ");
    assert_eq!(s.buffer.cx, 4);
}

#[test]
fn page_down_snaps_then_advances_a_screen() {
    let content: String = (0..100).map(|i| format!("line {i}\n")).collect();
    let (mut s, _tmp) = session_over(&content);
    s.prepare_frame();
    s.handle_key(KeyEvent::plain(KeyCode::PageDown));
    // 22 text rows: snap to row 21, then move 22 rows down.
    assert_eq!(s.buffer.cy, 43);
    s.handle_key(KeyEvent::plain(KeyCode::PageUp));
    s.prepare_frame();
    assert!(s.buffer.cy < 43);
}

#[test]
fn ctrl_down_scrolls_viewport_and_nudges_cursor() {
    let content: String = (0..50).map(|i| format!("line {i}\n")).collect();
    let (mut s, _tmp) = session_over(&content);
    s.prepare_frame();
    assert_eq!(s.viewport.rowoff, 0);
    s.handle_key(KeyEvent::ctrl(KeyCode::Down));
    assert_eq!(s.viewport.rowoff, 1);
    // Cursor was on row 0, now nudged into the window.
    assert_eq!(s.buffer.cy, 1);
}

#[test]
fn quit_with_unsaved_changes_needs_repeated_presses() {
    let mut s = session();
    type_text(&mut s, "unsaved");
    for expected_left in [3u32, 2, 1] {
        s.handle_key(KeyEvent::ctrl(KeyCode::Char('q')));
        assert!(!s.should_quit());
        let msg = s.message().expect("warning message");
        assert!(msg.contains(&format!("{expected_left} more times")));
    }
    s.handle_key(KeyEvent::ctrl(KeyCode::Char('q')));
    assert!(s.should_quit());
}

#[test]
fn other_key_resets_quit_countdown() {
    let mut s = session();
    type_text(&mut s, "unsaved");
    s.handle_key(KeyEvent::ctrl(KeyCode::Char('q')));
    s.handle_key(KeyEvent::plain(KeyCode::Right));
    // Counter is back at 3, so three more warnings before quitting.
    for _ in 0..3 {
        s.handle_key(KeyEvent::ctrl(KeyCode::Char('q')));
        assert!(!s.should_quit());
    }
    s.handle_key(KeyEvent::ctrl(KeyCode::Char('q')));
    assert!(s.should_quit());
}

#[test]
fn quit_is_immediate_when_unmodified() {
    let (mut s, _tmp) = session_over("saved\n");
    s.handle_key(KeyEvent::ctrl(KeyCode::Char('q')));
    assert!(s.should_quit());
}

#[test]
fn resize_updates_viewport_reserving_bars() {
    let mut s = session();
    s.handle_event(core_events::Event::Resize(100, 40));
    assert_eq!(s.viewport.screencols, 100);
    assert_eq!(s.viewport.screenrows, 38);
}
