//! Incremental search over render text.
//!
//! Matching runs on render bytes (post tab expansion) so the reported column
//! is a render column; callers map it back through `rx_to_cx` to place the
//! cursor. Stepping starts from the previously reported row and walks one row
//! at a time with wrap-around, so "find next" from the only matching row is a
//! fixed point.

use crate::{Buffer, Row};
use core_syntax::Highlight;

/// Location of a search hit, in render coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    pub row: usize,
    pub rx: usize,
}

/// Snapshot of one row's highlight classes, taken before the match overlay
/// is painted so the row can be restored when the search moves on.
#[derive(Debug)]
pub struct SavedHighlight {
    row: usize,
    classes: Vec<Highlight>,
}

/// First occurrence of `needle` in `haystack`. The empty needle matches at
/// offset 0, which keeps an empty search prompt parked on the first row.
fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

impl Buffer {
    /// Find the next row containing `query`, starting one row past
    /// `last_match` (or from the top/bottom when there is none) and wrapping
    /// at the buffer edges. Every row is probed at most once.
    pub fn find_wrapped(
        &self,
        query: &[u8],
        last_match: Option<usize>,
        forward: bool,
    ) -> Option<SearchMatch> {
        let len = self.line_count();
        if len == 0 {
            return None;
        }
        let mut current: isize = match last_match {
            Some(row) => row as isize,
            None => -1,
        };
        for _ in 0..len {
            current += if forward { 1 } else { -1 };
            if current == -1 {
                current = len as isize - 1;
            } else if current == len as isize {
                current = 0;
            }
            let row = &self.rows()[current as usize];
            if let Some(rx) = find_subslice(row.render(), query) {
                return Some(SearchMatch {
                    row: current as usize,
                    rx,
                });
            }
        }
        None
    }

    /// Paint `len` render bytes at the match as `Highlight::Match`, returning
    /// the snapshot needed to undo it.
    pub fn apply_match_overlay(&mut self, m: SearchMatch, len: usize) -> Option<SavedHighlight> {
        let row = self.rows.get_mut(m.row)?;
        let saved = SavedHighlight {
            row: m.row,
            classes: row.hl().to_vec(),
        };
        row.overlay_match(m.rx, len);
        Some(saved)
    }

    /// Undo a match overlay. Skipped when the row has been edited out from
    /// under the snapshot.
    pub fn restore_overlay(&mut self, saved: SavedHighlight) {
        if let Some(row) = self.rows.get_mut(saved.row)
            && row.render().len() == saved.classes.len()
        {
            row.replace_hl(saved.classes);
        }
    }
}

// Keep `Row` in the module's public story without a circular use elsewhere.
impl Row {
    /// Render column of the first occurrence of `needle`, if any.
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        find_subslice(self.render(), needle)
    }
}
