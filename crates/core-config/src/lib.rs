//! Configuration loading and parsing.
//!
//! Parses `tilde.toml` (or an override path provided by the binary),
//! extracting the `[editor]` table. Unknown fields are ignored (TOML
//! deserialization tolerance) and a file that fails to parse falls back to
//! defaults with a logged warning instead of aborting startup; a broken
//! config must never keep the editor from opening.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Consecutive quit presses required to discard unsaved changes.
    #[serde(default = "EditorConfig::default_quit_times")]
    pub quit_times: u32,
    /// Master switch for syntax highlighting.
    #[serde(default = "EditorConfig::default_highlight")]
    pub highlight: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            quit_times: Self::default_quit_times(),
            highlight: Self::default_highlight(),
        }
    }
}

impl EditorConfig {
    const fn default_quit_times() -> u32 {
        3
    }
    const fn default_highlight() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub editor: EditorConfig,
}

/// Best-effort config path following platform conventions (XDG / AppData
/// Roaming). A `tilde.toml` in the working directory wins over the platform
/// config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("tilde.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("tilde").join("tilde.toml");
    }
    PathBuf::from("tilde.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        // Missing file is the common case; defaults apply silently.
        return Ok(Config::default());
    };
    match toml::from_str::<Config>(&content) {
        Ok(config) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(config)
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.editor.quit_times, 3);
        assert!(cfg.editor.highlight);
    }

    #[test]
    fn parses_editor_table() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[editor]\nquit_times = 1\nhighlight = false\n").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.editor.quit_times, 1);
        assert!(!cfg.editor.highlight);
    }

    #[test]
    fn partial_table_keeps_remaining_defaults() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[editor]\nquit_times = 5\n").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.editor.quit_times, 5);
        assert!(cfg.editor.highlight);
    }

    #[test]
    fn unknown_fields_tolerated() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "[editor]\nquit_times = 2\nfuture_knob = \"yes\"\n[window]\nwidth = 80\n",
        )
        .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.editor.quit_times, 2);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[editor\nquit_times = ???\n").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg, Config::default());
    }
}
