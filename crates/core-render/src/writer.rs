//! Command flushing.
//!
//! Translates a built frame into queued crossterm operations and flushes
//! once. Ordering is preserved; nothing is emitted mid-frame, so the screen
//! never shows a partially painted state.

use crate::frame::Command;
use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Print, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{Write, stdout};

pub fn flush(cmds: Vec<Command>) -> Result<()> {
    let mut out = stdout();
    for c in cmds {
        match c {
            Command::HideCursor => queue!(out, Hide)?,
            Command::ShowCursor => queue!(out, Show)?,
            Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
            Command::ClearLine => queue!(out, Clear(ClearType::CurrentLine))?,
            Command::Print(s) => queue!(out, Print(s))?,
            Command::SetFg(color) => queue!(out, SetForegroundColor(color))?,
            Command::SetInverted(true) => queue!(out, SetAttribute(Attribute::Reverse))?,
            Command::SetInverted(false) => queue!(out, SetAttribute(Attribute::NoReverse))?,
        }
    }
    out.flush()?;
    Ok(())
}
