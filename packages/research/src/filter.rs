//! Content validity filtering.
//!
//! A pure predicate that screens out bot-walls, paywalls, navigation-only
//! pages, and other pages with no real prose. The pattern lists are policy
//! constants kept compatible with prior behavior; do not reorder or reword
//! entries without checking downstream expectations.

/// Minimum body length for content to be worth keeping.
pub const MIN_CONTENT_LEN: usize = 50;

/// Minimum length for a "."-separated sentence to count as meaningful.
const MIN_SENTENCE_LEN: usize = 20;

/// Meaningful sentences required for acceptance.
const MIN_SENTENCES: usize = 2;

/// UI-pattern hits per word above which content counts as navigation-only.
const MAX_UI_RATIO: f64 = 0.3;

/// Substrings indicating blocked, missing, or restricted pages.
pub const ERROR_PATTERNS: &[&str] = &[
    "javascript is disabled",
    "page restricted",
    "access denied",
    "403 forbidden",
    "404 not found",
    "503 service unavailable",
    "login required",
    "subscription required",
    "paywall",
    "please enable javascript",
    "cookies required",
    "captcha",
    "robot verification",
    "cloudflare",
    "enable cookies",
    "browser not supported",
    "content not available",
    "page not found",
    "unauthorized access",
    "permission denied",
];

/// Substrings indicating navigation chrome rather than content.
pub const UI_PATTERNS: &[&str] = &[
    "skip to main content",
    "toggle navigation",
    "menu",
    "search",
    "login",
    "sign up",
    "cookie policy",
];

/// Decide whether extracted text is valid, meaningful content.
///
/// Four independent checks; any single failure rejects:
/// minimum length, blocked-page patterns (in body, title, or description),
/// navigation-chrome density, and a minimum count of real sentences.
pub fn is_valid_content(body: &str, description: &str, title: &str) -> bool {
    let trimmed = body.trim();
    if trimmed.chars().count() < MIN_CONTENT_LEN {
        return false;
    }

    let body_lower = body.to_lowercase();
    let title_lower = title.to_lowercase();
    let description_lower = description.to_lowercase();

    for pattern in ERROR_PATTERNS {
        if body_lower.contains(pattern)
            || title_lower.contains(pattern)
            || description_lower.contains(pattern)
        {
            return false;
        }
    }

    // Hit count of UI patterns relative to word count, not per-word overlap
    let ui_hits = UI_PATTERNS
        .iter()
        .filter(|p| body_lower.contains(*p))
        .count();
    let word_count = body.split_whitespace().count();
    if word_count > 0 && ui_hits as f64 / word_count as f64 > MAX_UI_RATIO {
        return false;
    }

    let meaningful_sentences = body
        .split('.')
        .filter(|s| s.trim().chars().count() > MIN_SENTENCE_LEN)
        .count();

    meaningful_sentences >= MIN_SENTENCES
}
