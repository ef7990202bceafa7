//! Research queries and source scoping.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ResearchError, Result};
use crate::types::source::Provenance;

/// Bounds on how many valid sources a single run may target.
pub const MIN_TARGET_COUNT: usize = 1;
pub const MAX_TARGET_COUNT: usize = 5;

/// Which provenances a run should draw candidates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceScope {
    /// Web search only
    Web,

    /// Academic databases only
    Academic,

    /// Both, balanced across provenances
    Both,
}

impl SourceScope {
    /// Parse a scope string, coercing unknown values to the safe default.
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "web" => SourceScope::Web,
            "academic" => SourceScope::Academic,
            _ => SourceScope::Both,
        }
    }

    /// Whether candidates of this provenance are in scope.
    pub fn includes(&self, provenance: Provenance) -> bool {
        match self {
            SourceScope::Web => provenance == Provenance::Web,
            SourceScope::Academic => provenance == Provenance::Academic,
            SourceScope::Both => true,
        }
    }
}

impl Default for SourceScope {
    fn default() -> Self {
        SourceScope::Both
    }
}

impl fmt::Display for SourceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceScope::Web => write!(f, "web"),
            SourceScope::Academic => write!(f, "academic"),
            SourceScope::Both => write!(f, "both"),
        }
    }
}

/// Parameters for one research run.
///
/// Validated at construction; an invalid query never reaches the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchQuery {
    /// Natural-language query text (non-empty)
    pub text: String,

    /// Which provenances to search
    pub scope: SourceScope,

    /// How many valid sources to collect (1..=5)
    pub target_count: usize,
}

impl ResearchQuery {
    /// Create a validated query.
    ///
    /// Rejects empty text and out-of-range target counts with
    /// [`ResearchError::InvalidQuery`]. An unrecognized scope string should
    /// be coerced with [`SourceScope::parse_or_default`] before calling.
    pub fn new(text: impl Into<String>, scope: SourceScope, target_count: usize) -> Result<Self> {
        let text = text.into();

        if text.trim().is_empty() {
            return Err(ResearchError::InvalidQuery {
                reason: "query text cannot be empty".to_string(),
            });
        }

        if !(MIN_TARGET_COUNT..=MAX_TARGET_COUNT).contains(&target_count) {
            return Err(ResearchError::InvalidQuery {
                reason: format!(
                    "target count must be between {} and {}, got {}",
                    MIN_TARGET_COUNT, MAX_TARGET_COUNT, target_count
                ),
            });
        }

        Ok(Self {
            text,
            scope,
            target_count,
        })
    }

    /// Create a query with the default scope and a target of 2.
    pub fn simple(text: impl Into<String>) -> Result<Self> {
        Self::new(text, SourceScope::default(), 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_text() {
        let err = ResearchQuery::new("   ", SourceScope::Both, 2).unwrap_err();
        assert!(matches!(err, ResearchError::InvalidQuery { .. }));
    }

    #[test]
    fn test_rejects_out_of_range_target() {
        assert!(ResearchQuery::new("rust", SourceScope::Both, 0).is_err());
        assert!(ResearchQuery::new("rust", SourceScope::Both, 6).is_err());
        assert!(ResearchQuery::new("rust", SourceScope::Both, 1).is_ok());
        assert!(ResearchQuery::new("rust", SourceScope::Both, 5).is_ok());
    }

    #[test]
    fn test_scope_coercion() {
        assert_eq!(SourceScope::parse_or_default("web"), SourceScope::Web);
        assert_eq!(SourceScope::parse_or_default("ACADEMIC"), SourceScope::Academic);
        assert_eq!(SourceScope::parse_or_default("everything"), SourceScope::Both);
        assert_eq!(SourceScope::parse_or_default(""), SourceScope::Both);
    }

    #[test]
    fn test_scope_includes() {
        use crate::types::source::Provenance;

        assert!(SourceScope::Both.includes(Provenance::Web));
        assert!(SourceScope::Both.includes(Provenance::Academic));
        assert!(SourceScope::Web.includes(Provenance::Web));
        assert!(!SourceScope::Web.includes(Provenance::Academic));
        assert!(!SourceScope::Academic.includes(Provenance::Web));
    }
}
