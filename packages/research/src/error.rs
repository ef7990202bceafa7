//! Typed errors for the research library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

use crate::types::source::Provenance;

/// Errors that can occur during a research run.
#[derive(Debug, Error)]
pub enum ResearchError {
    /// A search provenance failed entirely
    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    /// Invalid query parameters, rejected before any network activity
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Unexpected internal fault
    #[error("internal error: {0}")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A named search provenance failed entirely.
///
/// Per-candidate extraction failures never surface here; they are absorbed
/// into error-populated [`ExtractedContent`](crate::types::content::ExtractedContent)
/// values so the run can continue.
#[derive(Debug, Error)]
#[error("{provenance} search failed: {message}")]
pub struct SearchError {
    /// Which provenance failed
    pub provenance: Provenance,

    /// Truncated failure description
    pub message: String,

    /// Underlying transport error, if any
    #[source]
    pub source: Option<FetchError>,
}

impl SearchError {
    /// Create a search error for a provenance.
    pub fn new(provenance: Provenance, message: impl Into<String>) -> Self {
        Self {
            provenance,
            message: message.into(),
            source: None,
        }
    }

    /// Attach the transport error that caused this failure.
    pub fn with_source(mut self, source: FetchError) -> Self {
        self.source = Some(source);
        self
    }
}

/// Errors from the HTTP fetch capability.
///
/// Transport failures are distinguished from HTTP-status failures so callers
/// can treat rate limiting (429) differently from a dead connection.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request could not be completed (DNS, connect, timeout, ...)
    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },
}

impl FetchError {
    /// HTTP status code, if this is a status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this failure is an explicit rate-limit signal.
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }
}

/// Result type alias for research operations.
pub type Result<T> = std::result::Result<T, ResearchError>;

/// Result type alias for search operations.
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_rate_limited() {
        let err = FetchError::Status {
            url: "https://api.example.com".to_string(),
            status: 429,
        };
        assert!(err.is_rate_limited());

        let err = FetchError::Status {
            url: "https://api.example.com".to_string(),
            status: 500,
        };
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn test_search_error_display() {
        let err = SearchError::new(Provenance::Academic, "connection refused");
        assert_eq!(err.to_string(), "academic search failed: connection refused");
    }
}
