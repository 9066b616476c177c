//! Terminal surface and key input
//!
//! The session engine only needs raw character writes and a clear
//! primitive. Keys arrive either already decoded (crossterm) or as raw
//! terminal input sequences.

use crossterm::cursor::MoveLeft;
use crossterm::terminal::{Clear, ClearType};
use crossterm::Command;
use titan_common::redaction::MASK_GLYPH;

/// Raw character output. Writes may carry ANSI escape sequences.
pub trait TerminalSurface {
    fn write(&mut self, text: &str);
    fn clear(&mut self);
}

/// One unit of keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Tab,
    Up,
    Down,
    Escape,
    Other,
}

impl Key {
    /// Characters the line editor accepts: printable ASCII, plus the mask
    /// glyph so a redacted code copied from `list` can be entered
    pub fn printable(&self) -> Option<char> {
        match self {
            Key::Char(c) if (' '..='~').contains(c) || *c == MASK_GLYPH => Some(*c),
            _ => None,
        }
    }
}

/// Decode a chunk of raw terminal input into keys
pub fn decode_raw(input: &str) -> Vec<Key> {
    let mut keys = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        let key = match c {
            '\r' | '\n' => Key::Enter,
            '\u{7f}' | '\u{8}' => Key::Backspace,
            '\t' => Key::Tab,
            '\u{1b}' => {
                if chars.peek() == Some(&'[') {
                    chars.next();
                    match chars.next() {
                        Some('A') => Key::Up,
                        Some('B') => Key::Down,
                        _ => Key::Other,
                    }
                } else {
                    Key::Escape
                }
            }
            c => Key::Char(c),
        };
        keys.push(key);
    }

    keys
}

fn ansi(command: impl Command) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = command.write_ansi(&mut out);
    out
}

/// Cursor left by `columns`; empty for zero
pub fn move_left(columns: usize) -> String {
    if columns == 0 {
        return String::new();
    }
    ansi(MoveLeft(columns.min(u16::MAX as usize) as u16))
}

pub fn clear_to_eol() -> String {
    ansi(Clear(ClearType::UntilNewLine))
}
