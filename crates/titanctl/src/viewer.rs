//! Document Viewer
//!
//! Builds what the overlay shows for a resolved document, and turns the
//! HTML-ish bodies from the index into plain lines a terminal can draw.
//! The overlay itself sits behind [`DocumentSurface`].

use regex::Regex;
use std::sync::LazyLock;
use titan_common::redaction::{redact_narrative, MASK_GLYPH};
use titan_common::{AccessLevel, DocumentRecord, Result, Role};

const RESTRICTED_NOTICE: &str =
    "RESTRICTED CONTENT. ENCRYPTION KEY REQUIRED. UNAUTHORIZED ACCESS ATTEMPT LOGGED.";
const RESTRICTED_BLOCKS: usize = 800;

const FILLER_DATE: &str = "2026-01-24";
const FILLER_REF: &str = "ALPHA-SEC-99";
const FILLER_BODY: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod \
tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud \
exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.";

/// Overlay that displays one document at a time and captures input while open
pub trait DocumentSurface {
    fn show(&mut self, view: &DocumentView) -> Result<()>;
    fn scroll(&mut self, delta: i32) -> Result<()>;
    fn redraw(&mut self) -> Result<()>;
    fn hide(&mut self) -> Result<()>;
}

/// Footer indicator under the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterStatus {
    Declassified,
    Classified,
    Unauthorized,
}

impl FooterStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FooterStatus::Declassified => "Declassified [SC-5] Material",
            FooterStatus::Classified => "Classified [SC-5] Material",
            FooterStatus::Unauthorized => "CLEARANCE LEVEL: UNAUTHORIZED",
        }
    }

    /// Green footer for declassified material, red otherwise
    pub fn is_alert(&self) -> bool {
        !matches!(self, FooterStatus::Declassified)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentView {
    /// Title bar text
    pub heading: String,
    /// Rich text body (HTML fragment)
    pub body: String,
    pub status: FooterStatus,
}

impl DocumentView {
    /// A document with literal content. Unprivileged roles get the
    /// narrative redaction layer.
    pub fn from_content(code: &str, content: &str, access: AccessLevel, role: Role) -> Self {
        let status = if access.is_public() {
            FooterStatus::Declassified
        } else {
            FooterStatus::Classified
        };
        Self {
            heading: code.to_string(),
            body: redact_narrative(content, role),
            status,
        }
    }

    /// Generic filler for documents without content
    pub fn simulated(record: &DocumentRecord) -> Self {
        let title = record.description.replace("[ENCRYPTED]", "");
        let title = title.trim();
        Self {
            heading: title.to_string(),
            body: format!(
                "<h1>{}</h1><hr><p>DATE: {}<br>REF: {}</p><br><p>{}</p>",
                title, FILLER_DATE, FILLER_REF, FILLER_BODY
            ),
            status: FooterStatus::Classified,
        }
    }

    /// Stand-in shown for restricted documents to unprivileged roles.
    /// Nothing from the record itself is included.
    pub fn restricted() -> Self {
        let visible = RESTRICTED_NOTICE.len() / 10;
        let blocks: String = std::iter::repeat(MASK_GLYPH).take(RESTRICTED_BLOCKS).collect();
        Self {
            heading: "RESTRICTED ACCESS".to_string(),
            body: format!(
                "<h1>RESTRICTED ACCESS</h1><hr><p>{}{}</p>",
                &RESTRICTED_NOTICE[..visible],
                blocks
            ),
            status: FooterStatus::Unauthorized,
        }
    }

    /// Body as plain text lines
    pub fn lines(&self) -> Vec<String> {
        rich_text_lines(&self.body)
    }
}

static BREAK_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*(br|hr)\s*/?\s*>|<\s*/\s*(p|div|h[1-6]|li|tr|table|ul|ol|blockquote)\s*>")
        .expect("static regex")
});

static RULE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<\s*hr\s*/?\s*>").expect("static regex"));

static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static regex"));

static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").expect("static regex"));

/// Flatten an HTML fragment into display lines.
///
/// Block-closing tags and `<br>` end a line, `<hr>` becomes a rule, other
/// tags are dropped, and the common entities are decoded. Runs of blank
/// lines collapse to one.
pub fn rich_text_lines(html: &str) -> Vec<String> {
    let unfolded = html.replace(['\r', '\n'], " ");
    let ruled = RULE_TAG.replace_all(&unfolded, "\n----------------------------------------\n");
    let broken = BREAK_TAGS.replace_all(&ruled, "\n");
    let stripped = ANY_TAG.replace_all(&broken, "");
    let decoded = decode_entities(&stripped);

    let mut lines: Vec<String> = Vec::new();
    for raw in decoded.split('\n') {
        let line = SPACE_RUN.replace_all(raw.trim(), " ").into_owned();
        let previous_blank = lines.last().map_or(true, |l| l.is_empty());
        if line.is_empty() && previous_blank {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
