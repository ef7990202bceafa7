//! Candidate sources - unvalidated search hits before content resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a candidate came from: a web search engine or an academic database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Web search engine result
    Web,

    /// Academic metadata API result
    Academic,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Web => write!(f, "web"),
            Provenance::Academic => write!(f, "academic"),
        }
    }
}

/// Structured metadata carried by academic candidates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AcademicMeta {
    /// Formatted author list ("A. Author, B. Author, et al.")
    pub authors: String,

    /// Publication year if known
    pub year: Option<i32>,

    /// Venue (journal or conference) if known
    pub venue: String,

    /// Paper abstract, empty when the API had none
    pub abstract_text: String,
}

impl AcademicMeta {
    /// Whether there is a non-empty abstract to synthesize content from.
    pub fn has_abstract(&self) -> bool {
        !self.abstract_text.trim().is_empty()
    }
}

/// A single search hit, not yet fetched or validated.
///
/// Immutable once produced by a searcher. Unique by URL within one research
/// run; uniqueness is maintained by the orchestrator's tried-set, not
/// enforced globally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSource {
    /// Result title
    pub title: String,

    /// Target URL
    pub url: String,

    /// Short snippet shown in search results
    pub snippet: String,

    /// Which searcher produced this candidate
    pub provenance: Provenance,

    /// Structured metadata (academic candidates only)
    pub metadata: Option<AcademicMeta>,
}

impl CandidateSource {
    /// Create a new candidate.
    pub fn new(title: impl Into<String>, url: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: String::new(),
            provenance,
            metadata: None,
        }
    }

    /// Create a web candidate.
    pub fn web(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(title, url, Provenance::Web)
    }

    /// Create an academic candidate.
    pub fn academic(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(title, url, Provenance::Academic)
    }

    /// Add a snippet.
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    /// Attach academic metadata.
    pub fn with_metadata(mut self, metadata: AcademicMeta) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Abstract text, if this candidate carries one.
    pub fn abstract_text(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .filter(|m| m.has_abstract())
            .map(|m| m.abstract_text.as_str())
    }
}
