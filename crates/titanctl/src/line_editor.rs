//! Line Editor
//!
//! Consumes one key at a time and keeps `Session::current_line` in step
//! with what is on screen: every change to the buffer is paired with the
//! matching terminal write.

use crate::boot::prompt;
use crate::ghost::{Completer, GhostSuggestion};
use crate::session::Session;
use crate::terminal::{clear_to_eol, Key, TerminalSurface};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Still composing
    Pending,
    /// Enter was pressed; carries the trimmed line
    Submit(String),
}

#[derive(Debug)]
pub struct LineEditor {
    hostname: String,
    ghost: Option<GhostSuggestion>,
}

impl LineEditor {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            ghost: None,
        }
    }

    /// Suggestion currently drawn after the cursor
    pub fn ghost(&self) -> Option<&GhostSuggestion> {
        self.ghost.as_ref()
    }

    pub fn handle(
        &mut self,
        key: Key,
        session: &mut Session,
        completer: &Completer<'_>,
        out: &mut dyn TerminalSurface,
    ) -> EditOutcome {
        // Stale ghost text must never survive into the next state
        self.clear_ghost(out);

        match key {
            Key::Enter => {
                out.write("\r\n");
                let line = std::mem::take(&mut session.current_line);
                return EditOutcome::Submit(line.trim().to_string());
            }
            Key::Backspace => {
                if session.current_line.pop().is_some() {
                    out.write("\u{8} \u{8}");
                }
                self.update_ghost(session, completer, out);
            }
            Key::Tab => self.complete(session, completer, out),
            Key::Up => {
                if session.history_back() {
                    self.redraw_from_history(session, out);
                }
            }
            Key::Down => {
                if session.history_forward() {
                    self.redraw_from_history(session, out);
                }
            }
            other => {
                if let Some(c) = other.printable() {
                    session.current_line.push(c);
                    let mut buf = [0u8; 4];
                    out.write(c.encode_utf8(&mut buf));
                    self.update_ghost(session, completer, out);
                }
            }
        }

        EditOutcome::Pending
    }

    pub fn clear_ghost(&mut self, out: &mut dyn TerminalSurface) {
        if let Some(ghost) = self.ghost.take() {
            ghost.erase(out);
        }
    }

    fn update_ghost(
        &mut self,
        session: &Session,
        completer: &Completer<'_>,
        out: &mut dyn TerminalSurface,
    ) {
        self.ghost = GhostSuggestion::compute(&session.current_line, completer);
        if let Some(ghost) = &self.ghost {
            ghost.draw(out);
        }
    }

    fn complete(
        &mut self,
        session: &mut Session,
        completer: &Completer<'_>,
        out: &mut dyn TerminalSurface,
    ) {
        if let Some(rest) = completer.completion(&session.current_line) {
            session.current_line.push_str(&rest);
            out.write(&rest);
        }
    }

    fn redraw_from_history(&mut self, session: &mut Session, out: &mut dyn TerminalSurface) {
        out.write(&format!(
            "\r{}{}",
            prompt(session.role, &self.hostname),
            clear_to_eol()
        ));
        session.current_line = session.history_line();
        out.write(&session.current_line);
    }
}
