// ABOUTME: Readable-content extraction: raw HTML in, title metadata plus a content node out.
// ABOUTME: Backed by dom_smoothie's Readability port; the content node renders to Markdown.

use dom_smoothie::{Config, Readability};

use crate::error::ArchiveError;
use crate::formats::html_to_markdown;

/// Default minimum character count for a readable candidate.
pub const DEFAULT_CHAR_THRESHOLD: usize = 100;

/// Metadata pulled from the page alongside its content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: Option<String>,
}

/// The readable content region of a page, held as HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentNode {
    html: String,
}

impl ContentNode {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Render this node as Markdown text.
    pub fn to_markdown(&self) -> String {
        html_to_markdown(&self.html)
    }
}

/// A page reduced to its readable content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub metadata: Metadata,
    pub root: ContentNode,
}

impl ExtractedDocument {
    pub fn new(title: Option<String>, root: ContentNode) -> Self {
        Self {
            metadata: Metadata { title },
            root,
        }
    }
}

/// Extract the readable part of `html`.
///
/// `url` is used to resolve relative links. An empty extracted title is
/// reported as absent.
pub fn extract(
    html: &str,
    url: &str,
    char_threshold: usize,
) -> Result<ExtractedDocument, ArchiveError> {
    let cfg = Config {
        char_threshold,
        ..Default::default()
    };

    let mut readability = Readability::new(html, Some(url), Some(cfg)).map_err(|e| {
        ArchiveError::extract(url, "Extract", Some(anyhow::anyhow!("{}", e)))
    })?;
    let article = readability.parse().map_err(|e| {
        ArchiveError::extract(url, "Extract", Some(anyhow::anyhow!("{}", e)))
    })?;

    let title = Some(article.title.trim().to_string()).filter(|t| !t.is_empty());
    tracing::debug!(
        url,
        title = title.as_deref().unwrap_or(""),
        text_len = article.text_content.len(),
        "extracted readable content"
    );

    Ok(ExtractedDocument::new(
        title,
        ContentNode::new(article.content.to_string()),
    ))
}
