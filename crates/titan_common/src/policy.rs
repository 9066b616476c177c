//! Access Policy
//!
//! Decides how a document presents itself to a role. This is checked before
//! any field or body leaves the store.

use crate::document::{AccessLevel, DocumentRecord, DocumentStore};
use crate::redaction::{redact_description, redact_identifier};
use crate::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clearance {
    /// Public document, shown as-is to everyone
    VisiblePlain,
    /// Restricted document seen by an unprivileged role: redacted and locked
    VisibleLocked,
    /// Restricted document seen by a privileged role
    FullyOpen,
}

impl Clearance {
    pub fn is_locked(&self) -> bool {
        matches!(self, Clearance::VisibleLocked)
    }
}

pub fn clearance(record: &DocumentRecord, role: Role) -> Clearance {
    match (record.access_level, role.is_privileged()) {
        (AccessLevel::Public, _) => Clearance::VisiblePlain,
        (AccessLevel::Restricted, true) => Clearance::FullyOpen,
        (AccessLevel::Restricted, false) => Clearance::VisibleLocked,
    }
}

/// Codes a role may autocomplete, in code order
pub fn visible_codes(store: &DocumentStore, role: Role) -> Vec<&str> {
    store
        .iter()
        .filter(|(_, record)| !clearance(record, role).is_locked())
        .map(|(code, _)| code)
        .collect()
}

/// Identifier and description as a role is allowed to see them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEntry {
    pub clearance: Clearance,
    pub code: String,
    pub description: String,
}

pub fn display_entry(code: &str, record: &DocumentRecord, role: Role) -> DisplayEntry {
    let clearance = clearance(record, role);
    let (code, description) = if clearance.is_locked() {
        (
            redact_identifier(code, role),
            redact_description(&record.description, role),
        )
    } else {
        (code.to_string(), record.description.clone())
    };
    DisplayEntry {
        clearance,
        code,
        description,
    }
}
