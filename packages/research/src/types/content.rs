//! Extracted content - the outcome of one resolution attempt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::text::truncate_chars;

/// Maximum length kept from a resolver failure message.
const MAX_ERROR_LEN: usize = 100;

/// Content extracted for one candidate source.
///
/// Produced exactly once per attempted candidate. Failures are encoded in
/// the `error` field rather than raised, so a bad page never aborts a batch.
/// Error-populated content is never promoted to valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Page or paper title
    pub title: String,

    /// Source URL
    pub url: String,

    /// Page description or synthesized byline
    pub description: String,

    /// Extracted body text
    pub body: String,

    /// When the resolution attempt happened
    pub fetched_at: DateTime<Utc>,

    /// Failure description, if resolution or validation failed
    pub error: Option<String>,
}

impl ExtractedContent {
    /// Create successfully extracted content.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            description: description.into(),
            body: body.into(),
            fetched_at: Utc::now(),
            error: None,
        }
    }

    /// Create an error-populated result for a failed resolution.
    ///
    /// The message is truncated so a giant backtrace never bloats a report.
    pub fn failure(url: impl Into<String>, message: &str) -> Self {
        Self {
            title: "Error".to_string(),
            url: url.into(),
            description: "Content extraction failed".to_string(),
            body: String::new(),
            fetched_at: Utc::now(),
            error: Some(truncate_chars(message, MAX_ERROR_LEN).to_string()),
        }
    }

    /// Create a placeholder for binary documents that cannot be extracted.
    ///
    /// Not an error, but carries no usable body either.
    pub fn pdf_placeholder(url: impl Into<String>) -> Self {
        Self {
            title: "PDF Document".to_string(),
            url: url.into(),
            description: "PDF document - contents cannot be extracted directly".to_string(),
            body: "[PDF document - contents cannot be extracted directly]".to_string(),
            fetched_at: Utc::now(),
            error: None,
        }
    }

    /// Attach a validation-rejection marker, clearing the body.
    pub fn rejected(mut self, reason: impl Into<String>) -> Self {
        self.body = String::new();
        self.error = Some(reason.into());
        self
    }

    /// Whether resolution failed or was rejected by validation.
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// Trimmed body text, if there is any.
    pub fn usable_body(&self) -> Option<&str> {
        let body = self.body.trim();
        (!body.is_empty()).then_some(body)
    }
}
