//! Redaction Engine
//!
//! Role-parameterized masking of document fields:
//! - Identifiers keep their first 10% (rounded up) and mask the rest
//! - Descriptions are masked entirely
//! - Full bodies get a fixed set of proper nouns replaced
//!
//! Every transform is the identity for privileged roles.

use crate::document::DocumentStore;
use crate::role::Role;
use std::collections::HashMap;

/// Glyph used for every masked character
pub const MASK_GLYPH: char = '█';

/// Narrative substitutions applied to document bodies for unprivileged roles
pub const NARRATIVE_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("Director Hollender", "Director █████"),
    ("O5 Council", "█████ Council"),
    ("MTF Alpha-1", "MTF █████"),
    ("Red Right Hand", "██████████"),
];

/// Number of leading characters left readable in a redacted identifier
pub fn visible_prefix_len(char_count: usize) -> usize {
    char_count.div_ceil(10)
}

/// Mask all but the first 10% of an identifier
pub fn redact_identifier(text: &str, role: Role) -> String {
    if role.is_privileged() {
        return text.to_string();
    }

    let total = text.chars().count();
    let visible = visible_prefix_len(total);
    text.chars()
        .enumerate()
        .map(|(i, c)| if i < visible { c } else { MASK_GLYPH })
        .collect()
}

/// Mask a description completely
pub fn redact_description(text: &str, role: Role) -> String {
    if role.is_privileged() {
        return text.to_string();
    }
    std::iter::repeat(MASK_GLYPH)
        .take(text.chars().count())
        .collect()
}

/// Replace sensitive proper nouns in a document body
pub fn redact_narrative(content: &str, role: Role) -> String {
    if role.is_privileged() {
        return content.to_string();
    }
    NARRATIVE_SUBSTITUTIONS
        .iter()
        .fold(content.to_string(), |body, (from, to)| body.replace(from, to))
}

/// True if the text carries at least one mask glyph
pub fn contains_mask(text: &str) -> bool {
    text.contains(MASK_GLYPH)
}

/// Reverse lookup from a redacted identifier back to its real code.
///
/// Built lazily for one (role, store revision) pair and rebuilt when either
/// changes. When two codes share a redacted form the lexicographically first
/// one wins.
#[derive(Debug, Default)]
pub struct RedactedIndex {
    built_for: Option<(Role, u64)>,
    by_display: HashMap<String, String>,
}

impl RedactedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the cached mapping
    pub fn invalidate(&mut self) {
        self.built_for = None;
        self.by_display.clear();
    }

    pub fn resolve(&mut self, display: &str, store: &DocumentStore, role: Role) -> Option<&str> {
        let key = (role, store.revision());
        if self.built_for != Some(key) {
            self.rebuild(store, role);
        }
        self.by_display.get(display).map(String::as_str)
    }

    fn rebuild(&mut self, store: &DocumentStore, role: Role) {
        self.by_display.clear();
        for code in store.codes() {
            self.by_display
                .entry(redact_identifier(code, role))
                .or_insert_with(|| code.to_string());
        }
        self.built_for = Some((role, store.revision()));
        tracing::debug!(
            role = %role,
            entries = self.by_display.len(),
            "rebuilt redacted identifier index"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{AccessLevel, DocumentRecord};

    #[test]
    fn test_identifier_keeps_first_tenth() {
        // 12 chars -> ceil(1.2) = 2 visible
        assert_eq!(redact_identifier("alpha-roster", Role::Guest), "al██████████");
        // 3 chars -> 1 visible
        assert_eq!(redact_identifier("abc", Role::Guest), "a██");
        assert_eq!(redact_identifier("", Role::Guest), "");
    }

    #[test]
    fn test_identifier_identity_for_privileged() {
        assert_eq!(redact_identifier("alpha-roster", Role::Builder), "alpha-roster");
        assert_eq!(redact_identifier("alpha-roster", Role::Admin), "alpha-roster");
    }

    #[test]
    fn test_redaction_is_idempotent() {
        for role in [Role::Guest, Role::Builder, Role::Admin] {
            for text in ["containment-procedures", "x", "incident-log-09", "[ENCRYPTED] file"] {
                let once = redact_identifier(text, role);
                assert_eq!(redact_identifier(&once, role), once);
                let once = redact_description(text, role);
                assert_eq!(redact_description(&once, role), once);
            }
        }
    }

    #[test]
    fn test_description_fully_masked() {
        let masked = redact_description("Top secret", Role::Guest);
        assert_eq!(masked.chars().count(), 10);
        assert!(masked.chars().all(|c| c == MASK_GLYPH));
    }

    #[test]
    fn test_narrative_substitution() {
        let body = "Director Hollender briefed the O5 Council on MTF Alpha-1 (Red Right Hand).";
        let redacted = redact_narrative(body, Role::Guest);
        assert_eq!(
            redacted,
            "Director █████ briefed the █████ Council on MTF █████ (██████████)."
        );
        assert_eq!(redact_narrative(body, Role::Admin), body);
    }

    #[test]
    fn test_reverse_index_resolves_redacted_form() {
        let store = DocumentStore::from_records([
            ("alpha-roster", DocumentRecord::new("a", AccessLevel::Restricted)),
            ("beta-memo", DocumentRecord::new("b", AccessLevel::Public)),
        ]);
        let mut index = RedactedIndex::new();
        let masked = redact_identifier("alpha-roster", Role::Guest);
        assert_eq!(index.resolve(&masked, &store, Role::Guest), Some("alpha-roster"));
        // Privileged view is unmasked, so the masked form no longer resolves
        assert_eq!(index.resolve(&masked, &store, Role::Admin), None);
    }

    #[test]
    fn test_reverse_index_collision_prefers_first_code() {
        let store = DocumentStore::from_records([
            ("aaaa", DocumentRecord::new("1", AccessLevel::Public)),
            ("abbb", DocumentRecord::new("2", AccessLevel::Public)),
        ]);
        let mut index = RedactedIndex::new();
        assert_eq!(index.resolve("a███", &store, Role::Guest), Some("aaaa"));
    }
}
