//! titanctl - the TITAN-1 uplink terminal
//!
//! The session engine (editor, dispatcher, animator, viewer model) is
//! host-independent and driven through [`controller::TerminalController`].
//! The [`tui`] module hosts it on a real terminal.

pub mod animator;
pub mod boot;
pub mod commands;
pub mod controller;
pub mod dispatcher;
pub mod ghost;
pub mod line_editor;
pub mod logging;
pub mod session;
pub mod terminal;
pub mod tui;
pub mod viewer;

pub use controller::{Navigation, TerminalController};
pub use terminal::{Key, TerminalSurface};
pub use viewer::{DocumentSurface, DocumentView, FooterStatus};
