//! Tilde entrypoint: CLI parsing, logging bootstrap, terminal guard and the
//! synchronous event loop.

use anyhow::Result;
use clap::Parser;
use core_actions::Session;
use core_terminal::{CrosstermBackend, TerminalBackend};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "tilde", version, about = "A small terminal text editor")]
struct Args {
    /// Optional path to open at startup. If omitted an empty buffer is used.
    pub path: Option<PathBuf>,
    /// Optional configuration file path (overrides discovery of `tilde.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

/// File-backed logging. The screen belongs to the editor while raw mode is
/// active, so nothing may write to stdout/stderr; everything goes through the
/// non-blocking appender into `tilde.log`.
fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("tilde.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "tilde.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        // Global subscriber already installed; drop the guard so the writer
        // thread shuts down.
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let args = Args::parse();
    let config = core_config::load_from(args.config.clone())?;

    let mut backend = CrosstermBackend::new();
    let (cols, rows) = backend.size()?;

    // A failed initial load is fatal; the error surfaces on the normal
    // screen, before raw mode.
    let mut session = match &args.path {
        Some(path) => Session::open(config, cols, rows, &path.to_string_lossy())?,
        None => Session::new(config, cols, rows),
    };

    backend.set_title("tilde")?;
    let _terminal = backend.enter_guard()?;

    while !session.should_quit() {
        session.prepare_frame();
        let message = session.message();
        let info = session.status_info(message.as_deref());
        core_render::render(&session.buffer, &session.viewport, &info)?;

        let event = core_input::read_event()?;
        session.handle_event(event);
    }

    info!(target: "runtime", "shutdown");
    Ok(())
}
