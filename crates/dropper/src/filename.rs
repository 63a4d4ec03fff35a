// ABOUTME: Turns an arbitrary page title into a filesystem-safe, collision-resistant filename.
// ABOUTME: The name always ends in "-<base36 id><ext>" and never exceeds the byte budget.

use unicode_normalization::UnicodeNormalization;

use crate::error::ArchiveError;

/// Default UTF-8 byte budget for a generated filename.
pub const DEFAULT_MAX_BYTES: usize = 250;

/// Largest id accepted by [`normalize`] (2^53 - 1).
pub const MAX_ID: i64 = (1 << 53) - 1;

const FALLBACK_NAME: &str = "untitled";

const FORBIDDEN_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Device names that Windows refuses regardless of extension.
const RESERVED_NAMES: &[&str] = &[
    "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7", "com8",
    "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

/// Build a filename from `title`, `id` and `ext` within [`DEFAULT_MAX_BYTES`].
pub fn normalize_default(title: &str, id: i64, ext: &str) -> Result<String, ArchiveError> {
    normalize(title, id, ext, DEFAULT_MAX_BYTES)
}

/// Build a filename from `title`, `id` and `ext` whose UTF-8 length is at most `max_bytes`.
///
/// The title is NFKC-normalized, stripped of characters that are illegal on common
/// filesystems, kept clear of reserved device names, and truncated a character at a
/// time from the end until it fits. The `-<base36 id><ext>` suffix is never truncated.
///
/// Fails with an InvalidArgument error if `id` is negative or above [`MAX_ID`], if
/// `ext` does not start with `.`, if the suffix alone exceeds `max_bytes`, or if the
/// title truncates away entirely and `untitled` plus the suffix does not fit.
pub fn normalize(title: &str, id: i64, ext: &str, max_bytes: usize) -> Result<String, ArchiveError> {
    if !(0..=MAX_ID).contains(&id) {
        return Err(ArchiveError::invalid_argument(
            "Normalize",
            format!("id must be a non-negative integer no greater than {}, got {}", MAX_ID, id),
        ));
    }
    if !ext.starts_with('.') {
        return Err(ArchiveError::invalid_argument(
            "Normalize",
            format!("ext must start with '.', got {:?}", ext),
        ));
    }

    let suffix = format!("-{}{}", to_base36(id as u64), ext);
    if suffix.len() > max_bytes {
        return Err(ArchiveError::invalid_argument(
            "Normalize",
            format!("max_bytes {} cannot hold suffix {}", max_bytes, suffix),
        ));
    }

    let mut name = sanitize_title(title);

    while name.len() + suffix.len() > max_bytes {
        name.pop();
    }
    if name.is_empty() {
        if FALLBACK_NAME.len() + suffix.len() > max_bytes {
            return Err(ArchiveError::invalid_argument(
                "Normalize",
                format!("max_bytes {} cannot hold {}{}", max_bytes, FALLBACK_NAME, suffix),
            ));
        }
        name.push_str(FALLBACK_NAME);
    }

    name.push_str(&suffix);
    Ok(name)
}

/// Apply the character rules to a title, producing the name part without a suffix.
fn sanitize_title(title: &str) -> String {
    let replaced: String = title
        .nfkc()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();

    let collapsed = collapse_underscores(&replaced);
    let trimmed = collapsed.trim_matches(|c: char| is_edge_space(c) || c == '.');

    let mut name = if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    };

    if is_reserved(&name) {
        name.push('_');
    }
    name
}

/// Whitespace as the ECMAScript `\s` class defines it, which counts the BOM
/// (U+FEFF) and leaves out NEL (U+0085).
fn is_edge_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{000B}' | '\u{000C}' | '\r' | ' ' | '\u{00A0}' | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}' | '\u{2029}' | '\u{202F}' | '\u{205F}' | '\u{3000}' | '\u{FEFF}'
    )
}

fn is_forbidden(c: char) -> bool {
    ('\u{0000}'..='\u{001F}').contains(&c) || FORBIDDEN_CHARS.contains(&c)
}

fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES
        .iter()
        .any(|reserved| name.eq_ignore_ascii_case(reserved))
}

/// Collapse every run of `_` into a single `_`.
pub fn collapse_underscores(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_underscore = false;
    for c in s.chars() {
        if c == '_' {
            if prev_underscore {
                continue;
            }
            prev_underscore = true;
        } else {
            prev_underscore = false;
        }
        out.push(c);
    }
    out
}

/// Render `n` in base 36 using `0-9a-z`.
pub fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn base36_matches_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn empty_title_falls_back_to_untitled() {
        assert_eq!(normalize_default("", 5, ".md").unwrap(), "untitled-5.md");
    }

    #[test]
    fn whitespace_and_dots_only_falls_back_to_untitled() {
        assert_eq!(normalize_default("  ..  ", 5, ".md").unwrap(), "untitled-5.md");
    }

    #[test]
    fn reserved_name_gets_trailing_underscore() {
        assert_eq!(normalize_default("con", 0, ".md").unwrap(), "con_-0.md");
        assert_eq!(normalize_default("LPT9", 0, ".md").unwrap(), "LPT9_-0.md");
        assert_eq!(normalize_default("console", 0, ".md").unwrap(), "console-0.md");
    }

    #[test]
    fn forbidden_characters_become_single_underscore() {
        let name = normalize_default("a/b\\c:d*e?f\"g<h>i|j", 1, ".md").unwrap();
        assert_eq!(name, "a_b_c_d_e_f_g_h_i_j-1.md");

        let name = normalize_default("What?: <Nothing>", 1, ".md").unwrap();
        assert_eq!(name, "What_ _Nothing_-1.md");
    }

    #[test]
    fn control_characters_are_replaced() {
        let name = normalize_default("tab\there\nnewline\u{1f}", 2, ".md").unwrap();
        assert_eq!(name, "tab_here_newline_-2.md");
    }

    #[test]
    fn leading_and_trailing_dots_and_spaces_are_trimmed() {
        let name = normalize_default("  ...hidden title...  ", 3, ".md").unwrap();
        assert_eq!(name, "hidden title-3.md");
    }

    #[test]
    fn fullwidth_characters_are_nfkc_normalized() {
        let name = normalize_default("Ｒｕｓｔ　１２３", 4, ".md").unwrap();
        assert_eq!(name, "Rust 123-4.md");
    }

    #[test]
    fn fullwidth_forbidden_characters_are_caught_after_normalization() {
        // U+FF1A FULLWIDTH COLON folds to ':' under NFKC.
        let name = normalize_default("a：b", 4, ".md").unwrap();
        assert_eq!(name, "a_b-4.md");
    }

    #[test]
    fn collapse_is_idempotent() {
        let once = collapse_underscores("a__b___c_");
        assert_eq!(once, "a_b_c_");
        assert_eq!(collapse_underscores(&once), once);
    }

    #[test]
    fn truncation_keeps_suffix_and_budget() {
        let title = "x".repeat(500);
        let name = normalize(&title, 42, ".md", 20).unwrap();
        assert!(name.len() <= 20, "too long: {}", name);
        assert!(name.ends_with("-16.md"), "suffix lost: {}", name);
        assert_eq!(name, format!("{}-16.md", "x".repeat(14)));
    }

    #[test]
    fn truncation_does_not_split_multibyte_characters() {
        // Each character is three bytes in UTF-8.
        let title = "日本語のタイトル".repeat(40);
        let name = normalize(&title, 7, ".md", 50).unwrap();
        assert!(name.len() <= 50);
        assert!(name.ends_with("-7.md"));
        let stem = name.trim_end_matches("-7.md");
        assert!(stem.chars().all(|c| c.len_utf8() == 3));
        assert_eq!(stem.len(), 45);
    }

    #[test]
    fn rejects_negative_id() {
        let err = normalize_default("t", -1, ".md").unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn rejects_id_beyond_exact_range() {
        assert!(normalize_default("t", MAX_ID, ".md").is_ok());
        let err = normalize_default("t", MAX_ID + 1, ".md").unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn rejects_extension_without_dot() {
        let err = normalize_default("t", 1, "md").unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn short_title_fits_budget_too_small_for_fallback() {
        assert_eq!(normalize("t", 1, ".md", 10).unwrap(), "t-1.md");
        assert_eq!(
            normalize("T", 1_700_000_000_000, ".md", 15).unwrap(),
            "T-loyw3v28.md"
        );
    }

    #[test]
    fn rejects_budget_smaller_than_suffix() {
        let err = normalize("title", 1, ".md", 4).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn rejects_budget_when_title_truncates_away_and_fallback_does_not_fit() {
        // One 3-byte character plus "-1.md" needs 8 bytes; 7 empties the name.
        let err = normalize("日", 1, ".md", 7).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(normalize("日", 1, ".md", 8).unwrap(), "日-1.md");
    }

    #[test]
    fn byte_order_mark_is_trimmed_like_whitespace() {
        assert_eq!(normalize_default("\u{FEFF}Title", 1, ".md").unwrap(), "Title-1.md");
        assert_eq!(normalize_default("Title\u{FEFF}\u{00A0}", 1, ".md").unwrap(), "Title-1.md");
    }

    #[test]
    fn next_line_character_is_not_trimmed() {
        assert_eq!(
            normalize_default("\u{0085}Title", 1, ".md").unwrap(),
            "\u{0085}Title-1.md"
        );
    }

    #[test]
    fn same_input_gives_same_output() {
        let a = normalize_default("Some: Title", 99, ".md").unwrap();
        let b = normalize_default("Some: Title", 99, ".md").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_ids_give_distinct_names() {
        let a = normalize_default("Same", 1, ".md").unwrap();
        let b = normalize_default("Same", 2, ".md").unwrap();
        assert_ne!(a, b);
    }
}
