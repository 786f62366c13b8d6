//! The editor session: one buffer, one viewport, one prompt, one key map.
//!
//! `Session` replaces ambient editor state with a single owned object the
//! main loop drives: feed it events, then ask it to prepare and describe the
//! next frame. All editing semantics live below in `core-text`; this crate
//! wires keys to operations and owns the file/prompt/status glue.

mod dispatcher;
pub mod io_ops;
mod prompt;

pub use io_ops::FileError;
pub use prompt::{Prompt, SearchState, Snapshot};

use core_config::Config;
use core_events::{Event, KeyEvent};
use core_render::{StatusInfo, Viewport, gutter_width};
use core_syntax::{Syntax, select_for_filename};
use core_text::Buffer;
use std::path::Path;
use std::time::Instant;

const STATUS_MESSAGE_SECS: u64 = 5;
const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

pub struct Session {
    pub buffer: Buffer,
    pub viewport: Viewport,
    syntax: Option<&'static Syntax>,
    filename: Option<String>,
    status: Option<(String, Instant)>,
    pub(crate) prompt: Prompt,
    quit_times_left: u32,
    config: Config,
    quit: bool,
}

impl Session {
    /// Fresh session with an empty buffer. `cols`/`rows` are the full
    /// terminal size; two rows are reserved for the status and message bars.
    pub fn new(config: Config, cols: u16, rows: u16) -> Self {
        let quit_times = config.editor.quit_times;
        let mut session = Self {
            buffer: Buffer::new(),
            viewport: Viewport::new(usize::from(rows.saturating_sub(2)), usize::from(cols)),
            syntax: None,
            filename: None,
            status: None,
            prompt: Prompt::None,
            quit_times_left: quit_times,
            config,
            quit: false,
        };
        session.set_status(HELP_MESSAGE.to_string());
        session
    }

    /// Session over a loaded file. A load failure is fatal to startup, so the
    /// error propagates instead of becoming a status message.
    pub fn open(config: Config, cols: u16, rows: u16, path: &str) -> Result<Self, FileError> {
        let buffer = io_ops::load(Path::new(path))?;
        let mut session = Self::new(config, cols, rows);
        session.buffer = buffer;
        session.filename = Some(path.to_string());
        session.syntax = select_for_filename(path);
        Ok(session)
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(cols, rows) => {
                self.viewport
                    .resize(usize::from(rows.saturating_sub(2)), usize::from(cols));
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        dispatcher::dispatch(self, key);
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Settle derived state and scroll the viewport onto the cursor. Called
    /// once per frame, before `status_info`.
    pub fn prepare_frame(&mut self) {
        let syntax = if self.config.editor.highlight {
            self.syntax
        } else {
            None
        };
        self.buffer.refresh(syntax);
        self.buffer.sync_rx();
        let gutter = gutter_width(self.buffer.line_count());
        self.viewport
            .scroll(self.buffer.cy, self.buffer.rx(), gutter);
    }

    /// Message-bar text: an active prompt always wins; otherwise the status
    /// message until it expires.
    pub fn message(&self) -> Option<String> {
        match &self.prompt {
            Prompt::SaveAs { input } => Some(format!("Save as: {input} (ESC to cancel)")),
            Prompt::Search(state) => {
                Some(format!("Search: {} (Use ESC/Arrows/Enter)", state.query))
            }
            Prompt::None => self
                .status
                .as_ref()
                .filter(|(_, at)| at.elapsed().as_secs() < STATUS_MESSAGE_SECS)
                .map(|(text, _)| text.clone()),
        }
    }

    pub fn status_info<'a>(&'a self, message: Option<&'a str>) -> StatusInfo<'a> {
        StatusInfo {
            filename: self.filename.as_deref(),
            filetype: self.syntax.map(|s| s.filetype),
            modified: self.buffer.is_modified(),
            message,
        }
    }

    pub fn set_status(&mut self, text: String) {
        self.status = Some((text, Instant::now()));
    }

    pub(crate) fn clear_status(&mut self) {
        self.status = None;
    }

    /// Ctrl+S. Without a filename this opens the save-as prompt instead of
    /// writing anything.
    pub fn save(&mut self) {
        if self.filename.is_none() {
            self.prompt = Prompt::SaveAs {
                input: String::new(),
            };
            return;
        }
        self.save_to_disk();
    }

    pub(crate) fn save_to_disk(&mut self) {
        let Some(name) = self.filename.clone() else {
            return;
        };
        match io_ops::save(&self.buffer, Path::new(&name)) {
            Ok(bytes) => {
                self.buffer.mark_saved();
                self.set_status(format!("{bytes} bytes written to disk"));
            }
            Err(e) => {
                tracing::warn!(target: "io", error = %e, "save_failed");
                self.set_status(format!("Can't save! I/O error: {e}"));
            }
        }
    }

    /// Accepting a name in the save-as prompt also re-selects the syntax
    /// descriptor and queues a full re-highlight.
    pub(crate) fn accept_filename(&mut self, name: String) {
        self.syntax = select_for_filename(&name);
        self.filename = Some(name);
        self.buffer.mark_all_dirty();
    }

    /// Ctrl+Q. Returns true while the unsaved-changes countdown is running.
    pub(crate) fn confirm_quit(&mut self) -> bool {
        if self.buffer.is_modified() && self.quit_times_left > 0 {
            let left = self.quit_times_left;
            self.set_status(format!(
                "Warning! File not saved. Press Ctrl-Q {left} more times to quit."
            ));
            self.quit_times_left -= 1;
            return true;
        }
        self.quit = true;
        false
    }

    pub(crate) fn reset_quit_counter(&mut self) {
        self.quit_times_left = self.config.editor.quit_times;
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn filetype(&self) -> Option<&'static str> {
        self.syntax.map(|s| s.filetype)
    }
}
