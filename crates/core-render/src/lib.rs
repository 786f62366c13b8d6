//! Viewport management and screen painting.
//!
//! Split into a pure half and an I/O half: `frame` builds a command list from
//! the buffer, viewport and status inputs; `writer` queues it to the terminal
//! in one flush. Tests run entirely against the command list.

mod frame;
mod style;
mod viewport;
mod writer;

pub use frame::{Command, StatusInfo, build_frame, gutter_width};
pub use style::color_for;
pub use viewport::Viewport;
pub use writer::flush;

use anyhow::Result;
use core_text::Buffer;

/// Build and flush one frame.
pub fn render(buffer: &Buffer, vp: &Viewport, info: &StatusInfo) -> Result<()> {
    let cmds = build_frame(buffer, vp, info);
    tracing::trace!(target: "render", commands = cmds.len(), "frame_flush");
    flush(cmds)
}
