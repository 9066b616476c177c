//! Logging setup for titanctl
//!
//! The session owns the terminal in raw mode, so logs go to a file.
//! Path discovery follows a fallback chain:
//! 1. explicit path from config
//! 2. $TITAN_LOG_FILE
//! 3. $XDG_STATE_HOME/titan/session.log
//! 4. ~/.local/state/titan/session.log
//!
//! With no usable path, logs are discarded.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use titan_common::config::LogSettings;
use tracing_subscriber::EnvFilter;

/// Find where the session log should go
pub fn discover_log_path(settings: &LogSettings) -> Option<PathBuf> {
    if let Some(path) = &settings.file {
        return Some(path.clone());
    }

    if let Ok(path) = std::env::var("TITAN_LOG_FILE") {
        return Some(PathBuf::from(path));
    }

    if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
        return Some(PathBuf::from(xdg_state).join("titan").join("session.log"));
    }

    if let Ok(home) = std::env::var("HOME") {
        return Some(
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("titan")
                .join("session.log"),
        );
    }

    None
}

fn open_log(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber. Returns the log path in use, if any.
pub fn init(settings: &LogSettings) -> Option<PathBuf> {
    let filter = EnvFilter::try_new(&settings.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let opened = discover_log_path(settings)
        .and_then(|path| open_log(&path).ok().map(|file| (path, file)));

    match opened {
        Some((path, file)) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
            Some(path)
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .try_init();
            None
        }
    }
}
