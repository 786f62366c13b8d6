//! Frame construction.
//!
//! A frame is a flat list of terminal commands built from pure inputs, then
//! handed to the writer for a single queued flush. Keeping construction free
//! of I/O lets tests assert on the command stream without a terminal.

use crate::style::{GUTTER_COLOR, color_for};
use crate::viewport::Viewport;
use core_text::Buffer;
use crossterm::style::Color;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One queued terminal operation. Translated 1:1 by the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    HideCursor,
    ShowCursor,
    MoveTo(u16, u16),
    ClearLine,
    Print(String),
    SetFg(Color),
    SetInverted(bool),
}

/// Status/message bar inputs the buffer does not know about.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusInfo<'a> {
    pub filename: Option<&'a str>,
    pub filetype: Option<&'a str>,
    pub modified: bool,
    /// Already expiry-filtered by the session.
    pub message: Option<&'a str>,
}

/// Width of the line-number gutter in screen cells: the digit count of the
/// line total plus the `": "` separator. An empty buffer has no gutter.
pub fn gutter_width(line_count: usize) -> usize {
    if line_count == 0 {
        0
    } else {
        digits(line_count) + 2
    }
}

fn digits(mut n: usize) -> usize {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}

/// Build the full frame: text rows, status bar, message bar, cursor.
pub fn build_frame(buffer: &Buffer, vp: &Viewport, info: &StatusInfo) -> Vec<Command> {
    let mut cmds = Vec::new();
    cmds.push(Command::HideCursor);
    cmds.push(Command::MoveTo(0, 0));

    let gutter = gutter_width(buffer.line_count());
    for y in 0..vp.screenrows {
        cmds.push(Command::MoveTo(0, y as u16));
        cmds.push(Command::ClearLine);
        let filerow = y + vp.rowoff;
        match buffer.row(filerow) {
            Some(_) => push_text_row(&mut cmds, buffer, vp, filerow, gutter),
            None => push_filler_row(&mut cmds, buffer, vp, y),
        }
    }

    push_status_bar(&mut cmds, buffer, vp, info);
    push_message_bar(&mut cmds, vp, info);

    let cursor_y = (buffer.cy - vp.rowoff) as u16;
    let cursor_x = (buffer.rx().saturating_sub(vp.coloff) + gutter) as u16;
    cmds.push(Command::MoveTo(cursor_x, cursor_y));
    cmds.push(Command::ShowCursor);
    cmds
}

fn push_text_row(cmds: &mut Vec<Command>, buffer: &Buffer, vp: &Viewport, filerow: usize, gutter: usize) {
    let row = &buffer.rows()[filerow];
    if gutter > 0 {
        cmds.push(Command::SetFg(GUTTER_COLOR));
        cmds.push(Command::Print(format!(
            "{:0width$}: ",
            row.idx(),
            width = gutter - 2
        )));
    }

    let text_cols = vp.screencols.saturating_sub(gutter);
    let start = vp.coloff.min(row.render().len());
    let end = (vp.coloff + text_cols).min(row.render().len());
    let bytes = &row.render()[start..end];
    let hl = &row.hl()[start..end];

    let mut color = Color::Reset;
    cmds.push(Command::SetFg(color));
    let mut run = String::new();
    for (&b, &class) in bytes.iter().zip(hl) {
        if b.is_ascii_control() {
            // Control bytes show inverted as '@' + code ('?' past 26).
            if !run.is_empty() {
                cmds.push(Command::Print(std::mem::take(&mut run)));
            }
            let sym = if b <= 26 { (b'@' + b) as char } else { '?' };
            cmds.push(Command::SetInverted(true));
            cmds.push(Command::Print(sym.to_string()));
            cmds.push(Command::SetInverted(false));
            cmds.push(Command::SetFg(color));
            continue;
        }
        let wanted = color_for(class);
        if wanted != color {
            if !run.is_empty() {
                cmds.push(Command::Print(std::mem::take(&mut run)));
            }
            color = wanted;
            cmds.push(Command::SetFg(color));
        }
        run.push(b as char);
    }
    if !run.is_empty() {
        cmds.push(Command::Print(run));
    }
    cmds.push(Command::SetFg(Color::Reset));
}

/// Rows past EOF show a `~`; an empty buffer gets the centered banner a third
/// of the way down.
fn push_filler_row(cmds: &mut Vec<Command>, buffer: &Buffer, vp: &Viewport, y: usize) {
    if buffer.line_count() == 0 && y == vp.screenrows / 3 {
        let mut banner = format!("tilde editor -- version {VERSION}");
        banner.truncate(vp.screencols);
        let mut padding = vp.screencols.saturating_sub(banner.len()) / 2;
        let mut line = String::new();
        if padding > 0 {
            line.push('~');
            padding -= 1;
        }
        line.extend(std::iter::repeat_n(' ', padding));
        line.push_str(&banner);
        cmds.push(Command::Print(line));
    } else {
        cmds.push(Command::Print("~".to_string()));
    }
}

fn push_status_bar(cmds: &mut Vec<Command>, buffer: &Buffer, vp: &Viewport, info: &StatusInfo) {
    cmds.push(Command::MoveTo(0, vp.screenrows as u16));
    cmds.push(Command::ClearLine);
    cmds.push(Command::SetInverted(true));

    let name = info.filename.unwrap_or("[No Name]");
    let name: String = name.chars().take(20).collect();
    let modified = if info.modified { " (modified)" } else { "" };
    let left = format!("{name} - {} lines{modified}", buffer.line_count());
    let right = format!(
        "{} | {}/{}",
        info.filetype.unwrap_or("no ft"),
        buffer.cy + 1,
        buffer.line_count()
    );

    // Widths are counted in chars, not bytes: the filename may be non-ASCII
    // and a byte truncate could split a char.
    let mut bar: String = left.chars().take(vp.screencols).collect();
    let mut used = bar.chars().count();
    let right_width = right.chars().count();
    while used < vp.screencols {
        if vp.screencols - used == right_width {
            bar.push_str(&right);
            break;
        }
        bar.push(' ');
        used += 1;
    }
    cmds.push(Command::Print(bar));
    cmds.push(Command::SetInverted(false));
}

fn push_message_bar(cmds: &mut Vec<Command>, vp: &Viewport, info: &StatusInfo) {
    cmds.push(Command::MoveTo(0, vp.screenrows as u16 + 1));
    cmds.push(Command::ClearLine);
    if let Some(msg) = info.message {
        let msg: String = msg.chars().take(vp.screencols).collect();
        cmds.push(Command::Print(msg));
    }
}
