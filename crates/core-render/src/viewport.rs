//! The visible window into the buffer.
//!
//! Offsets are recomputed from the cursor before every frame; the rest of the
//! render path just slices rows with them. `screenrows`/`screencols` count
//! text cells only (status and message bars are excluded by the caller).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// First buffer row on screen.
    pub rowoff: usize,
    /// First render column on screen.
    pub coloff: usize,
    pub screenrows: usize,
    pub screencols: usize,
}

impl Viewport {
    pub fn new(screenrows: usize, screencols: usize) -> Self {
        Self {
            rowoff: 0,
            coloff: 0,
            screenrows,
            screencols,
        }
    }

    pub fn resize(&mut self, screenrows: usize, screencols: usize) {
        self.screenrows = screenrows;
        self.screencols = screencols;
    }

    /// Pull the offsets so the cursor is inside the window. `gutter` narrows
    /// the text area on the left. After this: `rowoff <= cy < rowoff +
    /// screenrows` and `coloff <= rx < coloff + text columns`.
    pub fn scroll(&mut self, cy: usize, rx: usize, gutter: usize) {
        if cy < self.rowoff {
            self.rowoff = cy;
        }
        if cy >= self.rowoff + self.screenrows && self.screenrows > 0 {
            self.rowoff = cy - self.screenrows + 1;
        }
        let text_cols = self.screencols.saturating_sub(gutter);
        if rx < self.coloff {
            self.coloff = rx;
        }
        if rx >= self.coloff + text_cols && text_cols > 0 {
            self.coloff = rx - text_cols + 1;
        }
    }

    /// Scroll one row without losing the cursor: the offset moves first, then
    /// the caller nudges `cy` back inside if the window slid past it.
    pub fn scroll_down(&mut self, line_count: usize) {
        if self.rowoff + 1 <= line_count {
            self.rowoff += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.rowoff = self.rowoff.saturating_sub(1);
    }
}
