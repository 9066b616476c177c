//! TUI host
//!
//! - backend: raw character surface on stdout
//! - overlay: ratatui document overlay on the alternate screen
//! - event_loop: raw mode setup, event polling, and teardown

mod backend;
mod event_loop;
mod overlay;

pub use backend::{map_key, CrosstermTerminal};
pub use event_loop::{run, SessionEnd};
pub use overlay::RatatuiViewer;
