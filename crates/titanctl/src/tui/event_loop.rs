//! Event Loop - terminal setup, event polling, and teardown

use super::backend::{map_key, CrosstermTerminal};
use super::overlay::RatatuiViewer;
use crate::controller::{Navigation, TerminalController};
use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::io;
use std::time::{Duration, Instant};
use titan_common::{DocumentStore, TitanConfig};
use tracing::info;

/// Longest wait for input when nothing is scheduled
const IDLE_POLL: Duration = Duration::from_millis(250);

type Controller = TerminalController<CrosstermTerminal, RatatuiViewer>;

/// How the session ended
#[derive(Debug)]
pub enum SessionEnd {
    /// Ctrl+C
    Quit,
    /// `build` navigated away
    Navigate(Navigation),
}

/// Run an interactive session until the user quits or navigates away
pub fn run(config: &TitanConfig, store: DocumentStore) -> Result<SessionEnd> {
    enable_raw_mode().map_err(|e| {
        anyhow!(
            "Failed to enable raw mode: {}. Ensure you're running in a real terminal (TTY).",
            e
        )
    })?;

    let mut stdout = io::stdout();
    execute!(stdout, EnableBracketedPaste).map_err(|e| {
        let _ = disable_raw_mode();
        anyhow!("Failed to initialize terminal: {}", e)
    })?;

    let mut controller = TerminalController::new(
        config,
        store,
        CrosstermTerminal::new(),
        RatatuiViewer::new(),
    );

    let result = run_event_loop(&mut controller);

    // Always attempt cleanup, even when the loop failed
    let cleanup_result = restore_terminal(&mut controller);

    let end = result?;
    cleanup_result?;
    info!(?end, "session ended");
    Ok(end)
}

fn restore_terminal(controller: &mut Controller) -> Result<()> {
    if controller.session().viewer_open {
        controller.handle_key(crate::terminal::Key::Escape, Instant::now());
    }
    execute!(io::stdout(), DisableBracketedPaste)?;
    disable_raw_mode()?;
    println!();
    Ok(())
}

fn run_event_loop(controller: &mut Controller) -> Result<SessionEnd> {
    controller.boot(Instant::now());

    loop {
        if let Some(navigation) = controller.advance(Instant::now()) {
            return Ok(SessionEnd::Navigate(navigation));
        }

        let now = Instant::now();
        let timeout = controller
            .next_deadline()
            .map_or(IDLE_POLL, |deadline| {
                deadline.saturating_duration_since(now).min(IDLE_POLL)
            });

        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key)
                if key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                return Ok(SessionEnd::Quit);
            }
            Event::Key(key) => {
                if let Some(key) = map_key(key) {
                    controller.handle_key(key, Instant::now());
                }
            }
            Event::Paste(text) => controller.handle_text(&text, Instant::now()),
            Event::Resize(columns, rows) => controller.resize(columns, rows),
            _ => {}
        }
    }
}
