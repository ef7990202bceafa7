//! Content resolution - turn one candidate into extracted text.

pub mod html;

use scraper::Html;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::filter::is_valid_content;
use crate::text::truncate_chars;
use crate::traits::fetcher::Fetcher;
use crate::types::config::ContentConfig;
use crate::types::content::ExtractedContent;
use crate::types::source::{CandidateSource, Provenance};

/// Error string recorded when content fails the validity filter.
pub const VALIDATION_FAILED: &str =
    "content validation failed - low quality or restricted content";

/// Resolves candidates into extracted content.
///
/// Infallible by contract: every failure mode is encoded into an
/// error-populated [`ExtractedContent`] so one bad candidate never aborts
/// its batch. Academic candidates with an abstract are synthesized from
/// metadata without a network fetch.
pub struct ContentResolver<F> {
    fetcher: Arc<F>,
    config: ContentConfig,
}

impl<F: Fetcher> ContentResolver<F> {
    /// Create a resolver over a fetch capability.
    pub fn new(fetcher: Arc<F>, config: ContentConfig) -> Self {
        Self { fetcher, config }
    }

    /// Resolve one candidate. Always returns a value.
    pub async fn resolve(&self, source: &CandidateSource) -> ExtractedContent {
        if source.provenance == Provenance::Academic {
            if let Some(abstract_text) = source.abstract_text() {
                if let Some(content) = self.from_academic_metadata(source, abstract_text) {
                    return content;
                }
                // Abstract failed validation; treat the URL as a web page
                warn!(url = %source.url, "academic abstract rejected, falling back to fetch");
            }
        }

        self.fetch_and_extract(&source.url).await
    }

    /// Synthesize content from academic metadata, or `None` if the abstract
    /// does not pass validation.
    fn from_academic_metadata(
        &self,
        source: &CandidateSource,
        abstract_text: &str,
    ) -> Option<ExtractedContent> {
        let meta = source.metadata.as_ref()?;

        if !is_valid_content(abstract_text, "", &source.title) {
            return None;
        }

        let year_text = meta
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Unknown year".to_string());

        let mut parts = vec![
            format!("Authors: {}", meta.authors),
            format!("Year: {}", year_text),
        ];
        if !meta.venue.is_empty() {
            parts.push(format!("Published in: {}", meta.venue));
        }
        parts.push(String::new());
        parts.push("Abstract:".to_string());
        parts.push(abstract_text.to_string());

        info!(url = %source.url, "using abstract for academic source");

        Some(ExtractedContent::new(
            &source.title,
            &source.url,
            format!("Academic paper by {} ({})", meta.authors, year_text),
            parts.join("\n"),
        ))
    }

    /// Fetch a URL and extract title, description, and body from it.
    pub async fn fetch_and_extract(&self, url: &str) -> ExtractedContent {
        debug!(url = %url, "extracting content");

        let response = match self
            .fetcher
            .get(url, "text/html,application/xhtml+xml", self.config.fetch_timeout())
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "content fetch failed");
                return ExtractedContent::failure(url, &e.to_string());
            }
        };

        // Binary formats cannot be parsed as text; short-circuit with a
        // placeholder instead of feeding garbage to the extractor
        if let Some(ct) = &response.content_type {
            if ct.contains("application/pdf") {
                debug!(url = %url, "PDF document, returning placeholder");
                return ExtractedContent::pdf_placeholder(url);
            }
        }

        // Error status pages are parsed anyway; the validity filter catches
        // 403/404 pages by their text
        let document = Html::parse_document(truncate_chars(&response.body, self.config.max_parse_len));

        let title = html::extract_title(&document);
        let description = html::extract_description(&document);
        let body = html::extract_body(&document, &self.config);

        if !is_valid_content(&body, &description, &title) {
            info!(url = %url, "content rejected by validity filter");
            return ExtractedContent::new(title, url, description, "").rejected(VALIDATION_FAILED);
        }

        debug!(url = %url, body_len = body.len(), "content extraction completed");
        ExtractedContent::new(title, url, description, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{valid_article_html, MockFetcher};
    use crate::types::source::AcademicMeta;

    fn resolver(fetcher: MockFetcher) -> ContentResolver<MockFetcher> {
        ContentResolver::new(Arc::new(fetcher), ContentConfig::default())
    }

    fn academic_candidate(abstract_text: &str) -> CandidateSource {
        CandidateSource::academic("A Study of Things", "https://papers.example.org/1")
            .with_metadata(AcademicMeta {
                authors: "A. One, B. Two".to_string(),
                year: Some(2021),
                venue: "Journal of Things".to_string(),
                abstract_text: abstract_text.to_string(),
            })
    }

    #[tokio::test]
    async fn test_web_page_extraction() {
        let fetcher = MockFetcher::new().with_page("https://example.com/article", &valid_article_html());
        let content = resolver(fetcher)
            .fetch_and_extract("https://example.com/article")
            .await;

        assert!(!content.is_failure());
        assert_eq!(content.title, "Understanding Ownership");
        assert!(content.usable_body().is_some());
    }

    #[tokio::test]
    async fn test_academic_abstract_skips_fetch() {
        let abstract_text = "We study the performance of asynchronous runtimes under load. \
Our experiments show significant differences between scheduling strategies. \
We conclude with recommendations for practitioners.";

        // No page registered: a fetch would produce a failure result
        let content = resolver(MockFetcher::new())
            .resolve(&academic_candidate(abstract_text))
            .await;

        assert!(!content.is_failure());
        assert!(content.body.contains("Authors: A. One, B. Two"));
        assert!(content.body.contains("Year: 2021"));
        assert!(content.body.contains("Published in: Journal of Things"));
        assert!(content.body.contains(abstract_text));
        assert!(content.description.contains("Academic paper by"));
    }

    #[tokio::test]
    async fn test_invalid_abstract_falls_back_to_fetch() {
        let fetcher =
            MockFetcher::new().with_page("https://papers.example.org/1", &valid_article_html());

        // Too short to validate, so the resolver fetches the URL instead
        let content = resolver(fetcher).resolve(&academic_candidate("Too short.")).await;

        assert!(!content.is_failure());
        assert_eq!(content.title, "Understanding Ownership");
    }

    #[tokio::test]
    async fn test_pdf_short_circuits() {
        let fetcher = MockFetcher::new().with_content_type(
            "https://example.com/paper.pdf",
            "application/pdf",
            "%PDF-1.4 binary bytes",
        );
        let content = resolver(fetcher)
            .fetch_and_extract("https://example.com/paper.pdf")
            .await;

        assert!(!content.is_failure());
        assert_eq!(content.title, "PDF Document");
    }

    #[tokio::test]
    async fn test_fetch_failure_becomes_error_content() {
        let content = resolver(MockFetcher::new())
            .fetch_and_extract("https://unreachable.example.com")
            .await;

        assert!(content.is_failure());
        assert!(content.usable_body().is_none());
    }

    #[tokio::test]
    async fn test_low_quality_page_is_rejected() {
        let fetcher = MockFetcher::new().with_page(
            "https://example.com/wall",
            "<html><head><title>Checking your browser</title></head>\
             <body><p>Please complete the captcha to continue. This check verifies you are human.</p></body></html>",
        );
        let content = resolver(fetcher)
            .fetch_and_extract("https://example.com/wall")
            .await;

        assert!(content.is_failure());
        assert_eq!(content.error.as_deref(), Some(VALIDATION_FAILED));
        assert!(content.usable_body().is_none());
    }
}
