//! Text cleanup and truncation helpers.
//!
//! All truncation is by character count and never splits a UTF-8 code point.

use std::sync::OnceLock;

use regex::Regex;

/// Marker appended whenever rendered output is cut for size.
pub const TRUNCATION_MARKER: &str = "\n\n[Content truncated due to size limits]";

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn unwanted_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Keep word chars, whitespace, and common punctuation
    RE.get_or_init(|| Regex::new(r#"[^\w\s\-.,;:!?()\[\]{}"'/]"#).unwrap())
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_whitespace(text: &str) -> String {
    whitespace_re().replace_all(text, " ").trim().to_string()
}

/// Normalize whitespace and strip unusual characters.
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let collapsed = whitespace_re().replace_all(text, " ");
    unwanted_re().replace_all(&collapsed, "").trim().to_string()
}

/// Take at most `max_chars` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Truncate to `max_chars` total, appending [`TRUNCATION_MARKER`] when cut.
///
/// Prefers cutting at a paragraph boundary when one exists past the halfway
/// point, so reports do not end mid-sentence. The result, marker included,
/// never exceeds `max_chars`.
pub fn safe_truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let marker_len = TRUNCATION_MARKER.chars().count();
    if max_chars <= marker_len {
        return truncate_chars(text, max_chars).to_string();
    }

    let budget = max_chars - marker_len;
    let head = truncate_chars(text, budget);

    // Prefer a paragraph boundary in the back half of the budget
    if let Some(cut) = head.rfind("\n\n") {
        if cut > budget / 2 {
            return format!("{}{}", &head[..cut], TRUNCATION_MARKER);
        }
    }

    format!("{}{}", head, TRUNCATION_MARKER)
}
