//! Session state for one terminal session
//!
//! Owned by the controller and mutated only on the serialized input path
//! (line editor and command dispatcher). Never persisted.

use titan_common::Role;

#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Current privilege tier
    pub role: Role,

    /// Input echoed since the last prompt
    pub current_line: String,

    /// Submitted commands, oldest first
    pub history: Vec<String>,

    /// `None` when not browsing; `Some(0)` is the most recent entry
    pub history_cursor: Option<usize>,

    /// An animation is in flight; ordinary typing is ignored
    pub rendering: bool,

    /// Enter was pressed during the current animation
    pub skip_requested: bool,

    /// The document overlay owns the keyboard
    pub viewer_open: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted command and stop browsing history
    pub fn record_command(&mut self, line: &str) {
        if !line.is_empty() {
            self.history.push(line.to_string());
        }
        self.history_cursor = None;
    }

    /// History entry under the cursor, counting back from the newest
    pub fn history_entry(&self, cursor: usize) -> Option<&str> {
        self.history
            .len()
            .checked_sub(cursor + 1)
            .and_then(|i| self.history.get(i))
            .map(String::as_str)
    }

    /// Step one entry back in time. Returns false at the oldest entry.
    pub fn history_back(&mut self) -> bool {
        let next = self.history_cursor.map_or(0, |c| c + 1);
        if next < self.history.len() {
            self.history_cursor = Some(next);
            true
        } else {
            false
        }
    }

    /// Step one entry towards the present. Returns false when not browsing.
    pub fn history_forward(&mut self) -> bool {
        match self.history_cursor {
            None => false,
            Some(0) => {
                self.history_cursor = None;
                true
            }
            Some(c) => {
                self.history_cursor = Some(c - 1);
                true
            }
        }
    }

    /// Line shown for the current cursor position
    pub fn history_line(&self) -> String {
        self.history_cursor
            .and_then(|c| self.history_entry(c))
            .unwrap_or_default()
            .to_string()
    }
}
