//! Cursor motions.
//!
//! Horizontal motion wraps across line boundaries; vertical motion restores
//! the cached render column so the cursor tracks its visual column through
//! tabbed lines. Word motion walks one classification run (word bytes vs
//! everything else) so repeated presses land on every boundary.

use crate::Buffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    WordLeft,
    WordRight,
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl Buffer {
    pub fn move_cursor(&mut self, motion: Motion) {
        match motion {
            Motion::Left => self.move_left(),
            Motion::Right => self.move_right(),
            Motion::Up => {
                if self.cy > 0 {
                    self.cy -= 1;
                    self.restore_visual_column();
                }
            }
            Motion::Down => {
                if self.cy < self.line_count() {
                    self.cy += 1;
                    self.restore_visual_column();
                }
            }
            Motion::WordLeft => self.move_word_left(),
            Motion::WordRight => self.move_word_right(),
        }
        self.clamp_cx();
    }

    fn move_left(&mut self) {
        if self.cx > 0 {
            self.cx -= 1;
        } else if self.cy > 0 {
            self.cy -= 1;
            self.cx = self.row(self.cy).map_or(0, |r| r.len());
        }
    }

    fn move_right(&mut self) {
        match self.row(self.cy) {
            Some(row) if self.cx < row.len() => self.cx += 1,
            Some(_) => {
                self.cy += 1;
                self.cx = 0;
            }
            None => {}
        }
    }

    fn restore_visual_column(&mut self) {
        let rx = self.rx();
        self.cx = self.row(self.cy).map_or(0, |row| row.rx_to_cx(rx));
    }

    /// Step to the start of the classification run left of the cursor; at
    /// column 0 this wraps like a plain left motion.
    fn move_word_left(&mut self) {
        if self.cx == 0 {
            self.move_left();
            return;
        }
        let Some(row) = self.row(self.cy) else {
            return;
        };
        let chars = row.chars();
        let class = is_word_byte(chars[self.cx - 1]);
        let mut cx = self.cx;
        while cx > 0 && is_word_byte(chars[cx - 1]) == class {
            cx -= 1;
        }
        self.cx = cx;
    }

    /// Step to the end of the classification run under the cursor; at the
    /// line end this wraps like a plain right motion.
    fn move_word_right(&mut self) {
        let Some(row) = self.row(self.cy) else {
            return;
        };
        if self.cx >= row.len() {
            self.move_right();
            return;
        }
        let chars = row.chars();
        let class = is_word_byte(chars[self.cx]);
        let mut cx = self.cx;
        while cx < chars.len() && is_word_byte(chars[cx]) == class {
            cx += 1;
        }
        self.cx = cx;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(lines: &[&str]) -> Buffer {
        let mut b = Buffer::from_lines(lines.iter().map(|l| l.as_bytes()));
        b.refresh(None);
        b
    }

    #[test]
    fn left_wraps_to_previous_line_end() {
        let mut b = buffer(&["abc", "de"]);
        b.cy = 1;
        b.move_cursor(Motion::Left);
        assert_eq!((b.cy, b.cx), (0, 3));
    }

    #[test]
    fn right_wraps_to_next_line_start() {
        let mut b = buffer(&["ab", "cd"]);
        b.cx = 2;
        b.move_cursor(Motion::Right);
        assert_eq!((b.cy, b.cx), (1, 0));
    }

    #[test]
    fn right_on_virtual_row_stays_put() {
        let mut b = buffer(&["ab"]);
        b.cy = 1; // virtual row
        b.move_cursor(Motion::Right);
        assert_eq!((b.cy, b.cx), (1, 0));
    }

    #[test]
    fn down_onto_virtual_row_pins_column_zero() {
        let mut b = buffer(&["abc"]);
        b.cx = 3;
        b.move_cursor(Motion::Down);
        assert_eq!((b.cy, b.cx), (1, 0));
    }

    #[test]
    fn vertical_motion_restores_visual_column_through_tabs() {
        let mut b = buffer(&["\tabc", "xxxxxxxx"]);
        b.cy = 1;
        b.cx = 5;
        b.sync_rx(); // rx = 5
        b.move_cursor(Motion::Up);
        // rx 5 falls on 'b' of the tabbed line (tab covers 0..4).
        assert_eq!((b.cy, b.cx), (0, 2));
    }

    #[test]
    fn word_right_walks_runs_and_wraps() {
        let mut b = buffer(&["foo  bar", "x"]);
        b.move_cursor(Motion::WordRight);
        assert_eq!(b.cx, 3);
        b.move_cursor(Motion::WordRight);
        assert_eq!(b.cx, 5);
        b.move_cursor(Motion::WordRight);
        assert_eq!(b.cx, 8);
        b.move_cursor(Motion::WordRight);
        assert_eq!((b.cy, b.cx), (1, 0));
    }

    #[test]
    fn word_left_walks_runs_and_wraps() {
        let mut b = buffer(&["foo  bar"]);
        b.cx = 8;
        b.move_cursor(Motion::WordLeft);
        assert_eq!(b.cx, 5);
        b.move_cursor(Motion::WordLeft);
        assert_eq!(b.cx, 3);
        b.move_cursor(Motion::WordLeft);
        assert_eq!(b.cx, 0);
        b.move_cursor(Motion::WordLeft);
        assert_eq!((b.cy, b.cx), (0, 0));
    }

    #[test]
    fn underscore_counts_as_word_byte() {
        let mut b = buffer(&["a_b c"]);
        b.move_cursor(Motion::WordRight);
        assert_eq!(b.cx, 3);
    }
}
