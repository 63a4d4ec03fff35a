// ABOUTME: Converts extracted article HTML into Markdown text.
// ABOUTME: Wraps htmd with <br> preprocessing and blank-line normalization.

//! Output format conversion module.
//!
//! The Markdown produced here is the body of an archived document; its rendering
//! fidelity is whatever htmd gives us, tidied up so the output stays readable.

use once_cell::sync::Lazy;
use regex::Regex;

static BR_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?\s*>").unwrap());
static EXCESS_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Replace <br>, <br/> and <br /> with newlines.
fn preprocess_br_tags(html: &str) -> String {
    BR_TAG.replace_all(html, "\n").into_owned()
}

/// Collapse more than 2 consecutive newlines to exactly 2.
fn collapse_blank_lines_to_two(text: &str) -> String {
    EXCESS_BLANK_LINES.replace_all(text, "\n\n").into_owned()
}

/// Convert HTML to Markdown using htmd.
///
/// Skips script, style and noscript tags, preserves links and images, and
/// normalizes runs of blank lines. On conversion error the preprocessed HTML
/// is returned unchanged.
pub fn html_to_markdown(html: &str) -> String {
    let preprocessed = preprocess_br_tags(html);

    let converter = htmd::HtmlToMarkdown::builder()
        .skip_tags(vec!["script", "style", "noscript"])
        .build();

    let md = match converter.convert(&preprocessed) {
        Ok(md) => md,
        Err(e) => {
            tracing::warn!(error = %e, "markdown conversion failed, keeping HTML");
            preprocessed
        }
    };

    collapse_blank_lines_to_two(&md)
}
