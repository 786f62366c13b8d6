//! A single buffer line and its derived render state.
//!
//! `chars` is the authoritative byte sequence (no line terminator). `render`
//! and `hl` are derived: tabs expanded to the next tab stop and one highlight
//! class per render byte. The row itself never decides when to re-derive;
//! the owning buffer tracks dirtiness and calls `update_render` /
//! `set_highlight` during its refresh pass so the cross-line comment state is
//! threaded in document order.

use core_syntax::{Highlight, LineHighlight};

/// Tab stop used for render expansion and column mapping.
pub const TAB_STOP: usize = 4;

#[derive(Debug, Clone)]
pub struct Row {
    chars: Vec<u8>,
    /// Position of this row in the buffer. Renumbered atomically with every
    /// structural change; neighbors rely on it for open-comment chaining.
    pub(crate) idx: usize,
    render: Vec<u8>,
    hl: Vec<Highlight>,
    hl_open_comment: bool,
}

impl Row {
    pub(crate) fn new(text: &[u8], idx: usize) -> Self {
        Self {
            chars: text.to_vec(),
            idx,
            render: Vec::new(),
            hl: Vec::new(),
            hl_open_comment: false,
        }
    }

    pub fn idx(&self) -> usize {
        self.idx
    }

    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    /// Logical length in bytes.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Tab-expanded display bytes. Valid only while the row is not dirty.
    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// One highlight class per render byte.
    pub fn hl(&self) -> &[Highlight] {
        &self.hl
    }

    pub fn hl_open_comment(&self) -> bool {
        self.hl_open_comment
    }

    /// Leading run of whitespace bytes, used for auto-indent.
    pub fn leading_indent(&self) -> &[u8] {
        let end = self
            .chars
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(self.chars.len());
        &self.chars[..end]
    }

    /// Insert one byte; `at` saturates to the end instead of failing.
    pub(crate) fn insert_byte(&mut self, at: usize, b: u8) {
        let at = at.min(self.chars.len());
        self.chars.insert(at, b);
    }

    /// Delete one byte; `at` saturates to the last byte, no-op when empty.
    pub(crate) fn delete_byte(&mut self, at: usize) {
        if self.chars.is_empty() {
            return;
        }
        let at = at.min(self.chars.len() - 1);
        self.chars.remove(at);
    }

    pub(crate) fn append_bytes(&mut self, s: &[u8]) {
        self.chars.extend_from_slice(s);
    }

    pub(crate) fn truncate(&mut self, at: usize) {
        self.chars.truncate(at);
    }

    /// Rebuild `render` from `chars`: tabs expand to spaces up to the next
    /// tab-stop boundary, everything else is copied verbatim.
    pub(crate) fn update_render(&mut self) {
        self.render.clear();
        for &b in &self.chars {
            if b == b'\t' {
                self.render.push(b' ');
                while self.render.len() % TAB_STOP != 0 {
                    self.render.push(b' ');
                }
            } else {
                self.render.push(b);
            }
        }
    }

    pub(crate) fn set_highlight(&mut self, out: LineHighlight) {
        debug_assert_eq!(out.classes.len(), self.render.len());
        self.hl = out.classes;
        self.hl_open_comment = out.open_comment;
    }

    /// No-syntax path: every render byte is Normal and no comment can stay
    /// open.
    pub(crate) fn clear_highlight(&mut self) {
        self.hl.clear();
        self.hl.resize(self.render.len(), Highlight::Normal);
        self.hl_open_comment = false;
    }

    /// Paint `len` render bytes starting at `rx` as a search match.
    pub(crate) fn overlay_match(&mut self, rx: usize, len: usize) {
        let start = rx.min(self.hl.len());
        let end = (rx + len).min(self.hl.len());
        self.hl[start..end].fill(Highlight::Match);
    }

    pub(crate) fn replace_hl(&mut self, classes: Vec<Highlight>) {
        self.hl = classes;
    }

    /// Map a logical column to its render column: every byte is one column
    /// except tab, which advances to the next multiple of the tab stop.
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let mut rx = 0;
        for &b in self.chars.iter().take(cx) {
            if b == b'\t' {
                rx += (TAB_STOP - 1) - (rx % TAB_STOP);
            }
            rx += 1;
        }
        rx
    }

    /// Inverse of `cx_to_rx`: the logical column whose render column first
    /// exceeds `rx` (saturates to the line length).
    pub fn rx_to_cx(&self, rx: usize) -> usize {
        let mut cur_rx = 0;
        for (cx, &b) in self.chars.iter().enumerate() {
            if b == b'\t' {
                cur_rx += (TAB_STOP - 1) - (cur_rx % TAB_STOP);
            }
            cur_rx += 1;
            if cur_rx > rx {
                return cx;
            }
        }
        self.chars.len()
    }
}
