// ABOUTME: Assembles the archived Markdown document: YAML frontmatter, optional heading, body.
// ABOUTME: ArchiveRecord holds one run's values; build() renders it without touching the clock.

use std::borrow::Cow;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::extract::ExtractedDocument;

/// Title used when the page has none.
pub const UNTITLED: &str = "Untitled";

/// The values that make up one archived page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRecord {
    pub url: String,
    pub title: Option<String>,
    pub date_saved: DateTime<Utc>,
    pub body_markdown: String,
}

impl ArchiveRecord {
    /// Collect the record for `extracted`, converting its content to Markdown.
    pub fn new(url: &str, extracted: &ExtractedDocument, saved_at: DateTime<Utc>) -> Self {
        Self {
            url: url.to_string(),
            title: extracted.metadata.title.clone(),
            date_saved: saved_at,
            body_markdown: extracted.root.to_markdown(),
        }
    }

    /// The title as written to frontmatter, falling back to [`UNTITLED`].
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED)
    }

    /// `date_saved` as RFC 3339 in UTC with millisecond precision.
    pub fn date_saved_iso(&self) -> String {
        self.date_saved.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Render frontmatter, heading (only for a real, non-empty title) and body.
    pub fn render(&self) -> String {
        let mut content = format!(
            "---\nurl: {}\ntitle: {}\ndate_saved: {}\n---\n",
            yaml_scalar(&self.url),
            yaml_scalar(self.display_title()),
            self.date_saved_iso(),
        );

        if let Some(heading) = self.title.as_deref().filter(|t| !t.is_empty()) {
            content.push_str("# ");
            content.push_str(heading);
            content.push_str("\n\n");
        }

        content.push_str(&self.body_markdown);
        content
    }
}

/// Render the archived document for `extracted` fetched from `url` at `saved_at`.
pub fn build(url: &str, extracted: &ExtractedDocument, saved_at: DateTime<Utc>) -> String {
    ArchiveRecord::new(url, extracted, saved_at).render()
}

/// Emit `value` as a plain YAML scalar when that is unambiguous, otherwise
/// as a double-quoted scalar. JSON string escapes are valid in YAML double quotes.
pub fn yaml_scalar(value: &str) -> Cow<'_, str> {
    if needs_quoting(value) {
        Cow::Owned(serde_json::Value::String(value.to_string()).to_string())
    } else {
        Cow::Borrowed(value)
    }
}

fn needs_quoting(value: &str) -> bool {
    const INDICATORS: &[char] = &[
        '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%',
        '@', '`',
    ];
    const KEYWORDS: &[&str] = &["true", "false", "yes", "no", "on", "off", "null", "~"];

    let Some(first) = value.chars().next() else {
        return true;
    };

    INDICATORS.contains(&first)
        || value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace)
        || value.ends_with(':')
        || value.contains(": ")
        || value.contains(" #")
        || value.chars().any(char::is_control)
        || KEYWORDS.iter().any(|k| value.eq_ignore_ascii_case(k))
        || value.parse::<f64>().is_ok()
}
