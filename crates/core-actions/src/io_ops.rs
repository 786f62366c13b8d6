//! File load and save.
//!
//! Load failures at startup are fatal and bubble up; save failures are
//! recoverable and surface as a status message, so the error here is typed
//! rather than stringly.

use core_text::Buffer;
use std::{fs, io, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("can't open {path}: {source}")]
    Open { path: String, source: io::Error },
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Read a file into a buffer. Line terminators (`\n`, `\r\n`) are stripped;
/// a trailing newline does not produce a final empty row.
pub fn load(path: &Path) -> Result<Buffer, FileError> {
    let content = fs::read(path).map_err(|source| FileError::Open {
        path: path.display().to_string(),
        source,
    })?;
    // An empty file has zero rows; split would yield one empty line.
    let mut lines: Vec<&[u8]> = if content.is_empty() {
        Vec::new()
    } else {
        content.split(|&b| b == b'\n').collect()
    };
    if content.last() == Some(&b'\n') {
        lines.pop();
    }
    let stripped = lines.iter().map(|line| match line.last() {
        Some(b'\r') => &line[..line.len() - 1],
        _ => *line,
    });
    let buffer = Buffer::from_lines(stripped);
    tracing::info!(target: "io", path = %path.display(), lines = buffer.line_count(), "file_loaded");
    Ok(buffer)
}

/// Write the buffer (one `\n` per line, last line included) and return the
/// byte count.
pub fn save(buffer: &Buffer, path: &Path) -> Result<usize, FileError> {
    let bytes = buffer.to_bytes();
    fs::write(path, &bytes)?;
    tracing::info!(target: "io", path = %path.display(), bytes = bytes.len(), "file_saved");
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_reports_path() {
        let err = load(Path::new("__no_such_file__.txt")).unwrap_err();
        assert!(err.to_string().contains("__no_such_file__.txt"));
    }

    #[test]
    fn load_strips_crlf_and_trailing_newline() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        fs::write(tmp.path(), b"one\r\ntwo\nthree\n").unwrap();
        let buffer = load(tmp.path()).unwrap();
        assert_eq!(buffer.line_count(), 3);
        assert_eq!(buffer.row(0).unwrap().chars(), b"one");
        assert_eq!(buffer.row(2).unwrap().chars(), b"three");
    }

    #[test]
    fn empty_file_loads_zero_rows() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let buffer = load(tmp.path()).unwrap();
        assert_eq!(buffer.line_count(), 0);
    }

    #[test]
    fn file_without_trailing_newline_keeps_last_line() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        fs::write(tmp.path(), b"a\nb").unwrap();
        let buffer = load(tmp.path()).unwrap();
        assert_eq!(buffer.line_count(), 2);
        assert_eq!(buffer.row(1).unwrap().chars(), b"b");
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let buffer = Buffer::from_lines([&b"alpha"[..], b"", b"gamma"]);
        let written = save(&buffer, tmp.path()).unwrap();
        assert_eq!(written, 13); // "alpha\n" + "\n" + "gamma\n"
        let loaded = load(tmp.path()).unwrap();
        assert_eq!(loaded.to_bytes(), buffer.to_bytes());
    }
}
