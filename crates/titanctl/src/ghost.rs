//! Ghost text autocomplete for `access <partial>`
//!
//! The suggestion is a rendering hint only. It is drawn dimmed after the
//! cursor, the cursor is put back, and it is erased before the next key.

use crate::terminal::{move_left, TerminalSurface};
use owo_colors::OwoColorize;
use titan_common::policy::visible_codes;
use titan_common::{DocumentStore, Role};

const ACCESS_PREFIX: &str = "access ";

/// Candidate source for completion: codes the role may see
pub struct Completer<'a> {
    store: &'a DocumentStore,
    role: Role,
}

impl<'a> Completer<'a> {
    pub fn new(store: &'a DocumentStore, role: Role) -> Self {
        Self { store, role }
    }

    /// Partial argument of an in-progress `access` command
    pub fn partial(line: &str) -> Option<&str> {
        line.strip_prefix(ACCESS_PREFIX)
            .map(|rest| rest.split(' ').next().unwrap_or_default())
    }

    pub fn matches(&self, partial: &str) -> Vec<&'a str> {
        visible_codes(self.store, self.role)
            .into_iter()
            .filter(|code| code.starts_with(partial))
            .collect()
    }

    /// Suffix that completes the line, when exactly one code fits
    pub fn completion(&self, line: &str) -> Option<String> {
        let partial = Self::partial(line)?;
        match self.matches(partial).as_slice() {
            [only] => Some(only[partial.len()..].to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GhostSuggestion {
    pub remaining: String,
}

impl GhostSuggestion {
    /// Suggestion for the line, if one applies
    pub fn compute(line: &str, completer: &Completer<'_>) -> Option<Self> {
        let partial = Completer::partial(line)?;
        if partial.is_empty() {
            return None;
        }
        completer
            .completion(line)
            .filter(|rest| !rest.is_empty())
            .map(|remaining| Self { remaining })
    }

    fn width(&self) -> usize {
        self.remaining.chars().count()
    }

    /// Draw dimmed text after the cursor and step back over it
    pub fn draw(&self, out: &mut dyn TerminalSurface) {
        out.write(&self.remaining.bright_black().to_string());
        out.write(&move_left(self.width()));
    }

    /// Blank out what `draw` wrote and step back again
    pub fn erase(&self, out: &mut dyn TerminalSurface) {
        out.write(&" ".repeat(self.width()));
        out.write(&move_left(self.width()));
    }
}
