//! Document records and the in-memory document store
//!
//! The store is loaded once at startup and is read by everything else.
//! The only mutation is the scripted narrative reveal that runs when a
//! session elevates to admin.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Descriptions overwritten when an admin logs in
pub const ADMIN_REVEAL: &[(&str, &str)] = &[
    ("alpha-roster", "Active personnel list."),
    ("containment-procedures", "Standard operating procedures."),
    ("incident-log-09", "After action report: Sector 7 breach."),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Public,
    Restricted,
}

impl AccessLevel {
    pub fn is_public(&self) -> bool {
        matches!(self, AccessLevel::Public)
    }
}

/// One entry of the document index, in its wire shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(rename = "desc")]
    pub description: String,

    #[serde(rename = "access")]
    pub access_level: AccessLevel,

    /// Rich text body (HTML fragment)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl DocumentRecord {
    pub fn new(description: impl Into<String>, access_level: AccessLevel) -> Self {
        Self {
            description: description.into(),
            access_level,
            content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Body text, if the record carries a non-empty one
    pub fn literal_content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }
}

/// Keyed collection of documents, ordered by code
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    records: BTreeMap<String, DocumentRecord>,
    revision: u64,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<I, K>(records: I) -> Self
    where
        I: IntoIterator<Item = (K, DocumentRecord)>,
        K: Into<String>,
    {
        Self {
            records: records.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            revision: 0,
        }
    }

    /// Parse the JSON index (`{ code: { desc, access, content? } }`)
    pub fn from_json(json: &str) -> Result<Self> {
        let records: BTreeMap<String, DocumentRecord> = serde_json::from_str(json)?;
        Ok(Self {
            records,
            revision: 0,
        })
    }

    pub fn get(&self, code: &str) -> Option<&DocumentRecord> {
        self.records.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.records.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Codes in lexicographic order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DocumentRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Bumped on every mutation so derived indexes know to rebuild
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Entries in index order: public before restricted, then by code
    pub fn listing_order(&self) -> Vec<(&str, &DocumentRecord)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|(code_a, a), (code_b, b)| {
            match (a.access_level.is_public(), b.access_level.is_public()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => code_a.cmp(code_b),
            }
        });
        entries
    }

    /// Apply the admin-login narrative reveal. Returns how many records changed.
    pub fn reveal_narrative(&mut self) -> usize {
        let mut changed = 0;
        for (code, description) in ADMIN_REVEAL {
            if let Some(record) = self.records.get_mut(*code) {
                record.description = (*description).to_string();
                changed += 1;
            }
        }
        if changed > 0 {
            self.revision += 1;
        }
        changed
    }
}
