//! Research results and the bounded text report.

use serde::{Deserialize, Serialize};

use crate::text::safe_truncate;
use crate::types::content::ExtractedContent;
use crate::types::query::{ResearchQuery, SourceScope};
use crate::types::source::CandidateSource;

const SECTION_RULE: &str = "========================================";

/// Everything one research run produced.
///
/// Built once per run and immutable thereafter. The error list holds
/// non-fatal notes accumulated during the run; rendering is a pure function
/// of this value plus a size budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchResult {
    /// The validated query that drove the run
    pub query: ResearchQuery,

    /// Every candidate seen, across all provenances
    pub candidates: Vec<CandidateSource>,

    /// Contents that passed validation, at most `query.target_count`
    pub accepted: Vec<ExtractedContent>,

    /// Templated run summary
    pub summary: String,

    /// Total candidates seen
    pub total_candidates: usize,

    /// Wall-clock run time in seconds
    pub elapsed_secs: f64,

    /// Non-fatal errors recorded during the run
    pub errors: Vec<String>,
}

impl ResearchResult {
    /// Whether the run found nothing at all.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Whether the run collected as many valid sources as requested.
    pub fn target_met(&self) -> bool {
        self.accepted.len() >= self.query.target_count
    }

    /// Render the result as bounded text.
    ///
    /// Output never exceeds `max_size` characters; when cut, it ends with
    /// the fixed truncation marker.
    pub fn render(&self, max_size: usize) -> String {
        let mut out = format!("Research Query: {}\n\n", self.query.text);

        let source_text = match self.query.scope {
            SourceScope::Both => "web and academic sources".to_string(),
            scope => format!("{} sources", scope),
        };
        out.push_str(&format!(
            "Searched {} - Found {} results\n\n",
            source_text,
            self.candidates.len()
        ));

        if !self.candidates.is_empty() {
            out.push_str("SEARCH RESULTS:\n");
            for (i, candidate) in self.candidates.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", i + 1, candidate.title));
                out.push_str(&format!("   URL: {}\n", candidate.url));
                out.push_str(&format!("   {}\n\n", candidate.snippet));
            }
        }

        if !self.accepted.is_empty() {
            out.push_str(&format!(
                "DETAILED CONTENT FROM TOP {} SOURCES:\n\n",
                self.accepted.len()
            ));
            for (i, content) in self.accepted.iter().enumerate() {
                if let Some(error) = &content.error {
                    out.push_str(&format!(
                        "{rule}\nSOURCE {n}: Error\n{rule}\n",
                        rule = SECTION_RULE,
                        n = i + 1
                    ));
                    out.push_str(&format!("Error: {}\n\n", error));
                } else {
                    out.push_str(&format!(
                        "{rule}\nSOURCE {n}: {title}\n{rule}\n\n",
                        rule = SECTION_RULE,
                        n = i + 1,
                        title = content.title
                    ));
                    out.push_str(&format!("URL: {}\n", content.url));
                    out.push_str(&format!("Description: {}\n\n", content.description));
                    out.push_str(&format!("Content:\n{}\n\n", content.body));
                }
            }
        }

        out.push_str("\nRESEARCH SUMMARY:\n");
        out.push_str(&self.summary);

        if !self.errors.is_empty() {
            out.push_str("\n\nERRORS ENCOUNTERED:\n");
            for error in &self.errors {
                out.push_str(&format!("- {}\n", error));
            }
        }

        safe_truncate(&out, max_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TRUNCATION_MARKER;
    use crate::types::query::SourceScope;

    fn sample_result() -> ResearchResult {
        let query = ResearchQuery::new("rust async runtimes", SourceScope::Both, 2).unwrap();
        ResearchResult {
            query,
            candidates: vec![
                CandidateSource::web("Tokio docs", "https://tokio.rs").with_snippet("Async runtime"),
                CandidateSource::academic("Async paper", "https://example.org/paper"),
            ],
            accepted: vec![ExtractedContent::new(
                "Tokio docs",
                "https://tokio.rs",
                "The async runtime for Rust",
                "Tokio is an asynchronous runtime for the Rust programming language.",
            )],
            summary: "Completed research on: rust async runtimes".to_string(),
            total_candidates: 2,
            elapsed_secs: 1.25,
            errors: vec!["academic search rate limited".to_string()],
        }
    }

    #[test]
    fn test_render_round_trip_without_truncation() {
        let result = sample_result();
        let text = result.render(100_000);

        for content in &result.accepted {
            assert!(text.contains(&content.title));
            assert!(text.contains(&content.url));
        }
        assert!(text.contains("RESEARCH SUMMARY:"));
        assert!(text.contains("ERRORS ENCOUNTERED:"));
        assert!(!text.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_render_respects_size_budget() {
        let result = sample_result();
        let text = result.render(200);

        assert!(text.chars().count() <= 200);
        assert!(text.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_render_error_banner() {
        let mut result = sample_result();
        result.accepted = vec![ExtractedContent::failure(
            "https://broken.example.com",
            "connection reset",
        )];

        let text = result.render(100_000);
        assert!(text.contains("SOURCE 1: Error"));
        assert!(text.contains("connection reset"));
    }
}
