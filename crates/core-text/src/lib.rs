//! Line buffer, cursor model and the dirty-line refresh worklist.
//!
//! The buffer owns an ordered `Vec<Row>` (order *is* the line numbering), a
//! logical cursor `(cy, cx)` and a set of dirty line indices. Every mutation
//! of a row's bytes inserts its index into the dirty set; `refresh` drains
//! that set in ascending order, rebuilding render text and highlighting and
//! pushing the next index whenever a row's open-comment flag flips. That
//! replaces the original recursive re-highlight cascade with an iterative
//! worklist, so a file that is one giant unterminated comment cannot blow the
//! stack.
//!
//! Cursor invariants, restored after every public operation:
//! * `cy <= rows.len()` (`cy == rows.len()` is the virtual past-end row,
//!   where the column is pinned to 0);
//! * `cx <= rows[cy].len()` whenever `cy` names a real row.

mod motion;
mod row;
mod search;

pub use motion::Motion;
pub use row::{Row, TAB_STOP};
pub use search::{SavedHighlight, SearchMatch};

use core_syntax::{Syntax, highlight_line};
use std::collections::BTreeSet;

#[derive(Debug, Default)]
pub struct Buffer {
    rows: Vec<Row>,
    /// Cursor row; may equal `rows.len()` (virtual past-end row).
    pub cy: usize,
    /// Cursor column in logical bytes of row `cy`.
    pub cx: usize,
    /// Render column of the cursor, cached by `sync_rx` for scroll math and
    /// visual-column-preserving vertical movement.
    rx: usize,
    dirty_lines: BTreeSet<usize>,
    modified: u64,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a buffer from already-split lines (file load). The result is
    /// unmodified but every line still needs derivation.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut buf = Self::new();
        for line in lines {
            let at = buf.rows.len();
            buf.rows.push(Row::new(line.as_ref(), at));
            buf.dirty_lines.insert(at);
        }
        buf
    }

    pub fn line_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    /// The row under the cursor, `None` on the virtual past-end row.
    pub fn current_row(&self) -> Option<&Row> {
        self.rows.get(self.cy)
    }

    fn current_row_len(&self) -> usize {
        self.rows.get(self.cy).map_or(0, Row::len)
    }

    pub fn is_modified(&self) -> bool {
        self.modified > 0
    }

    pub fn mark_saved(&mut self) {
        self.modified = 0;
    }

    pub fn rx(&self) -> usize {
        self.rx
    }

    /// Recompute the cached render column from `(cy, cx)`. Called by the
    /// scroll pass before every render, mirroring when the original updated
    /// it; vertical motions read the cached value.
    pub fn sync_rx(&mut self) {
        self.rx = match self.rows.get(self.cy) {
            Some(row) => row.cx_to_rx(self.cx),
            None => 0,
        };
    }

    /// Insert a new line at `at` (clamped into `[0, line_count]`). With
    /// `auto_indent`, the leading whitespace of the line above is copied in
    /// front of `text`; the copied length is returned so callers can place
    /// the cursor after the inherited indentation.
    pub fn insert_row(&mut self, at: usize, text: &[u8], auto_indent: bool) -> usize {
        let at = at.min(self.rows.len());
        let mut content = if auto_indent && at > 0 {
            self.rows[at - 1].leading_indent().to_vec()
        } else {
            Vec::new()
        };
        let indent_len = content.len();
        content.extend_from_slice(text);

        self.rows.insert(at, Row::new(&content, at));
        self.renumber_from(at + 1);
        self.shift_dirty(at, true);
        self.dirty_lines.insert(at);
        // The following line's inherited comment state may have changed.
        if at + 1 < self.rows.len() {
            self.dirty_lines.insert(at + 1);
        }
        self.modified += 1;
        indent_len
    }

    /// Remove a line; `at` saturates to the last line, no-op when empty.
    pub fn delete_row(&mut self, at: usize) {
        if self.rows.is_empty() {
            return;
        }
        let at = at.min(self.rows.len() - 1);
        self.rows.remove(at);
        self.renumber_from(at);
        self.shift_dirty(at, false);
        if at < self.rows.len() {
            self.dirty_lines.insert(at);
        }
        self.modified += 1;
    }

    /// Insert one byte at the cursor, appending a fresh row first when the
    /// cursor sits on the virtual past-end row.
    pub fn insert_char(&mut self, b: u8) {
        if self.cy == self.rows.len() {
            self.insert_row(self.rows.len(), b"", false);
        }
        let cy = self.cy;
        self.rows[cy].insert_byte(self.cx, b);
        self.dirty_lines.insert(cy);
        self.cx += 1;
        self.modified += 1;
    }

    /// Enter. At column 0 an empty (auto-indented) line is opened above the
    /// cursor; otherwise the current line is split at the cursor, the suffix
    /// inherits the indentation of the line above and the cursor lands just
    /// past that indentation.
    pub fn insert_newline(&mut self) {
        if self.cx == 0 {
            self.insert_row(self.cy, b"", true);
            self.cy += 1;
        } else {
            let suffix = self.rows[self.cy].chars()[self.cx..].to_vec();
            let indent = self.insert_row(self.cy + 1, &suffix, true);
            let cy = self.cy;
            self.rows[cy].truncate(self.cx);
            self.dirty_lines.insert(cy);
            self.modified += 1;
            self.cy += 1;
            self.cx = indent;
        }
    }

    /// Backspace. On the virtual row this is only a cursor move; at (0,0) a
    /// no-op; at column 0 the line is merged onto its predecessor.
    pub fn delete_char(&mut self) {
        if self.cy == self.rows.len() {
            self.move_cursor(Motion::Left);
            return;
        }
        if self.cx == 0 && self.cy == 0 {
            return;
        }
        if self.cx > 0 {
            let cy = self.cy;
            self.rows[cy].delete_byte(self.cx - 1);
            self.dirty_lines.insert(cy);
            self.cx -= 1;
            self.modified += 1;
        } else {
            let content = self.rows[self.cy].chars().to_vec();
            let prev = self.cy - 1;
            self.cx = self.rows[prev].len();
            self.rows[prev].append_bytes(&content);
            self.dirty_lines.insert(prev);
            self.modified += 1;
            self.delete_row(self.cy);
            self.cy -= 1;
        }
    }

    /// Delete back to the previous word boundary. At column 0 (or on the
    /// virtual row) this deliberately degrades to a single `delete_char`,
    /// crossing the line join one byte at a time exactly like the original.
    pub fn delete_word(&mut self) {
        if self.cx == 0 || self.cy == self.rows.len() {
            self.delete_char();
            return;
        }
        let start = self.cx;
        self.move_cursor(Motion::WordLeft);
        let target = self.cx;
        self.cx = start;
        for _ in 0..start - target {
            self.delete_char();
        }
    }

    /// Swap a line with the one above it; no-op at the top. Both `idx`
    /// fields move with the swap.
    pub fn move_row_up(&mut self, at: usize) {
        if at == 0 || at >= self.rows.len() {
            return;
        }
        self.rows.swap(at - 1, at);
        self.rows[at - 1].idx = at - 1;
        self.rows[at].idx = at;
        self.dirty_lines.insert(at - 1);
        self.dirty_lines.insert(at);
        self.modified += 1;
    }

    /// Swap a line with the one below it; no-op at the bottom.
    pub fn move_row_down(&mut self, at: usize) {
        if self.rows.len() < 2 || at >= self.rows.len() - 1 {
            return;
        }
        self.rows.swap(at, at + 1);
        self.rows[at].idx = at;
        self.rows[at + 1].idx = at + 1;
        self.dirty_lines.insert(at);
        self.dirty_lines.insert(at + 1);
        self.modified += 1;
    }

    /// Insert a copy of the current line directly below it; the cursor does
    /// not move. No-op on the virtual row.
    pub fn duplicate_line(&mut self) {
        if self.cy == self.rows.len() {
            return;
        }
        let content = self.rows[self.cy].chars().to_vec();
        self.insert_row(self.cy + 1, &content, false);
    }

    /// Clamp the cursor column into the current row (0 on the virtual row).
    /// Applied after every motion and structural operation.
    pub fn clamp_cx(&mut self) {
        let max = self.current_row_len();
        if self.cx > max {
            self.cx = max;
        }
    }

    /// Buffer content as written to disk: every line followed by one `\n`,
    /// the last line included.
    pub fn to_bytes(&self) -> Vec<u8> {
        let total: usize = self.rows.iter().map(|r| r.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for row in &self.rows {
            out.extend_from_slice(row.chars());
            out.push(b'\n');
        }
        out
    }

    /// Queue every line for re-derivation (syntax switch, initial load).
    pub fn mark_all_dirty(&mut self) {
        self.dirty_lines = (0..self.rows.len()).collect();
    }

    /// Drain the dirty worklist in ascending order, rebuilding render text
    /// and highlighting. When a row's open-comment flag flips, the next row
    /// is queued; flags are binary, so no row re-enters the list twice for
    /// the same change and one edit settles in O(lines) steps.
    pub fn refresh(&mut self, syntax: Option<&Syntax>) {
        let mut refreshed = 0usize;
        while let Some(at) = self.dirty_lines.pop_first() {
            if at >= self.rows.len() {
                continue;
            }
            let prev_open = at > 0 && self.rows[at - 1].hl_open_comment();
            let row = &mut self.rows[at];
            row.update_render();
            let was_open = row.hl_open_comment();
            let now_open = match syntax {
                Some(syntax) => {
                    let out = highlight_line(row.render(), prev_open, syntax);
                    let open = out.open_comment;
                    row.set_highlight(out);
                    open
                }
                None => {
                    row.clear_highlight();
                    false
                }
            };
            if was_open != now_open && at + 1 < self.rows.len() {
                self.dirty_lines.insert(at + 1);
            }
            refreshed += 1;
        }
        if refreshed > 0 {
            tracing::trace!(target: "text.refresh", lines = refreshed, "refresh_settled");
        }
    }

    #[doc(hidden)]
    pub fn has_dirty_lines(&self) -> bool {
        !self.dirty_lines.is_empty()
    }

    fn renumber_from(&mut self, start: usize) {
        for i in start..self.rows.len() {
            self.rows[i].idx = i;
        }
    }

    /// Remap dirty indices across a row splice at `at` (insert or delete) so
    /// pending work keeps pointing at the same lines.
    fn shift_dirty(&mut self, at: usize, inserted: bool) {
        let shifted = self
            .dirty_lines
            .iter()
            .map(|&i| {
                if inserted {
                    if i >= at { i + 1 } else { i }
                } else if i > at {
                    i - 1
                } else {
                    i
                }
            })
            .collect();
        self.dirty_lines = shifted;
    }
}
