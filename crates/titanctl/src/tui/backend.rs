//! Raw character surface backed by crossterm

use crate::terminal::{Key, TerminalSurface};
use crossterm::cursor::MoveTo;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Stdout, Write};
use tracing::warn;

pub struct CrosstermTerminal {
    out: Stdout,
}

impl CrosstermTerminal {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSurface for CrosstermTerminal {
    fn write(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            warn!("terminal write failed: {}", e);
        }
    }

    fn clear(&mut self) {
        if let Err(e) = execute!(self.out, Clear(ClearType::All), Clear(ClearType::Purge), MoveTo(0, 0)) {
            warn!("terminal clear failed: {}", e);
        }
    }
}

/// Translate a crossterm key event. Key releases map to `None`.
pub fn map_key(event: KeyEvent) -> Option<Key> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let key = match event.code {
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char(c) if !event.modifiers.contains(KeyModifiers::CONTROL) => Key::Char(c),
        _ => Key::Other,
    };
    Some(key)
}
