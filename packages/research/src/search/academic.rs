//! Academic search via the Semantic Scholar Graph API.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{SearchError, SearchResult};
use crate::search::pacer::SearchPacer;
use crate::text::truncate_chars;
use crate::traits::fetcher::{FetchResponse, Fetcher};
use crate::traits::searcher::Searcher;
use crate::types::config::SearchConfig;
use crate::types::source::{AcademicMeta, CandidateSource, Provenance};

const SEARCH_ENDPOINT: &str = "https://api.semanticscholar.org/graph/v1/paper/search";
const PAPER_FIELDS: &str = "title,authors,year,venue,url,abstract";

const MAX_TITLE_LEN: usize = 100;
const MAX_URL_LEN: usize = 150;
const MAX_AUTHORS: usize = 3;
const PUB_INFO_BUDGET: usize = 75;
const ABSTRACT_SNIPPET_BUDGET: usize = 125;

/// Base delay for the single rate-limit retry.
const RETRY_BASE_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    data: Vec<Paper>,
}

#[derive(Debug, Deserialize)]
struct Paper {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<Author>,
    year: Option<i32>,
    venue: Option<String>,
    url: Option<String>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Author {
    name: Option<String>,
}

/// Semantic Scholar searcher.
///
/// Degrades gracefully: rate limiting or any non-success API status yields
/// an empty candidate list instead of failing the run, so web results alone
/// can still satisfy the request. Only transport failures surface as
/// [`SearchError`].
pub struct AcademicSearcher<F> {
    fetcher: Arc<F>,
    config: SearchConfig,
    pacer: SearchPacer,
}

impl<F: Fetcher> AcademicSearcher<F> {
    /// Create an academic searcher sharing the given pacer.
    pub fn new(fetcher: Arc<F>, config: SearchConfig, pacer: SearchPacer) -> Self {
        Self {
            fetcher,
            config,
            pacer,
        }
    }

    /// Fetch with a single backoff retry on explicit rate-limit signals.
    async fn fetch_with_retry(&self, url: &str) -> SearchResult<FetchResponse> {
        for attempt in 0..2u32 {
            self.pacer.wait().await;

            let response = self
                .fetcher
                .get(url, "application/json", self.config.academic_timeout())
                .await
                .map_err(|e| {
                    SearchError::new(Provenance::Academic, e.to_string()).with_source(e)
                })?;

            if response.status == 429 && attempt == 0 {
                let delay = RETRY_BASE_DELAY * 2u32.pow(attempt);
                warn!(delay_secs = delay.as_secs(), "academic API rate limited, retrying once");
                tokio::time::sleep(delay).await;
                continue;
            }

            return Ok(response);
        }
        unreachable!("retry loop always returns within two attempts")
    }

    fn parse_papers(&self, body: &str, limit: usize) -> Vec<CandidateSource> {
        let parsed: ApiResponse = match serde_json::from_str(body) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "failed to parse academic API response");
                return Vec::new();
            }
        };

        parsed
            .data
            .into_iter()
            .take(limit)
            .map(|paper| self.paper_to_candidate(paper))
            .collect()
    }

    fn paper_to_candidate(&self, paper: Paper) -> CandidateSource {
        let title = paper.title.unwrap_or_else(|| "Untitled Paper".to_string());
        let url = paper.url.unwrap_or_default();
        let venue = paper.venue.unwrap_or_default();
        let abstract_text = paper.abstract_text.unwrap_or_default();

        let author_text = format_authors(&paper.authors);

        // A missing year leaves the parentheses empty
        let year_text = paper.year.map(|y| y.to_string()).unwrap_or_default();
        let mut pub_info = format!("{} ({})", author_text, year_text);
        if !venue.is_empty() {
            pub_info.push_str(&format!(" - {}", venue));
        }

        let abstract_for_snippet = if abstract_text.is_empty() {
            "No abstract available"
        } else {
            abstract_text.as_str()
        };

        let snippet = if pub_info.chars().count() > PUB_INFO_BUDGET {
            format!(
                "{}... {}",
                truncate_chars(&pub_info, PUB_INFO_BUDGET),
                truncate_chars(abstract_for_snippet, ABSTRACT_SNIPPET_BUDGET)
            )
        } else {
            format!("{} {}", pub_info, abstract_for_snippet)
        };

        CandidateSource::academic(
            truncate_chars(&title, MAX_TITLE_LEN),
            truncate_chars(&url, MAX_URL_LEN),
        )
        .with_snippet(truncate_chars(&snippet, self.config.max_snippet_len))
        .with_metadata(AcademicMeta {
            authors: author_text,
            year: paper.year,
            venue,
            abstract_text,
        })
    }
}

/// Format an author list as at most three names plus "et al.".
fn format_authors(authors: &[Author]) -> String {
    let names: Vec<&str> = authors
        .iter()
        .filter_map(|a| a.name.as_deref())
        .filter(|n| !n.is_empty())
        .collect();

    if names.is_empty() {
        return "Unknown authors".to_string();
    }

    let mut shown: Vec<String> = names
        .iter()
        .take(MAX_AUTHORS)
        .map(|n| n.to_string())
        .collect();
    if names.len() > MAX_AUTHORS {
        shown.push("et al.".to_string());
    }

    shown.join(", ")
}

#[async_trait]
impl<F: Fetcher> Searcher for AcademicSearcher<F> {
    fn provenance(&self) -> Provenance {
        Provenance::Academic
    }

    async fn search(&self, query: &str, limit: usize) -> SearchResult<Vec<CandidateSource>> {
        info!(query = %query, limit = limit, "academic search starting");

        let limit_param = limit.to_string();
        let url = Url::parse_with_params(
            SEARCH_ENDPOINT,
            &[
                ("query", query),
                ("limit", limit_param.as_str()),
                ("fields", PAPER_FIELDS),
            ],
        )
        .map_err(|e| SearchError::new(Provenance::Academic, e.to_string()))?;

        let response = self.fetch_with_retry(url.as_str()).await?;

        if response.status == 429 {
            warn!("academic API rate limit reached, returning empty results");
            return Ok(Vec::new());
        }
        if !response.is_success() {
            warn!(status = response.status, "academic API returned non-success, returning empty results");
            return Ok(Vec::new());
        }

        let candidates = self.parse_papers(&response.body, limit);
        debug!(count = candidates.len(), "academic search parsed papers");
        info!(count = candidates.len(), "academic search completed");

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetcher;
    use serde_json::json;

    fn searcher_with(fetcher: MockFetcher) -> AcademicSearcher<MockFetcher> {
        AcademicSearcher::new(
            Arc::new(fetcher),
            SearchConfig::default(),
            SearchPacer::new(Duration::from_millis(0)),
        )
    }

    fn api_url(query: &str, limit: usize) -> String {
        let limit_param = limit.to_string();
        Url::parse_with_params(
            SEARCH_ENDPOINT,
            &[
                ("query", query),
                ("limit", limit_param.as_str()),
                ("fields", PAPER_FIELDS),
            ],
        )
        .unwrap()
        .to_string()
    }

    #[test]
    fn test_format_authors() {
        let authors = vec![
            Author { name: Some("A. One".to_string()) },
            Author { name: Some("B. Two".to_string()) },
            Author { name: Some("C. Three".to_string()) },
            Author { name: Some("D. Four".to_string()) },
        ];
        assert_eq!(format_authors(&authors), "A. One, B. Two, C. Three, et al.");
        assert_eq!(format_authors(&authors[..2]), "A. One, B. Two");
        assert_eq!(format_authors(&[]), "Unknown authors");
    }

    #[tokio::test]
    async fn test_maps_papers_to_candidates() {
        let body = json!({
            "data": [{
                "title": "Attention Is All You Need",
                "authors": [{"name": "A. Vaswani"}, {"name": "N. Shazeer"}],
                "year": 2017,
                "venue": "NeurIPS",
                "url": "https://example.org/attention",
                "abstract": "We propose the Transformer, a model architecture based on attention."
            }]
        })
        .to_string();

        let searcher = searcher_with(MockFetcher::new().with_page(&api_url("attention", 5), &body));
        let results = searcher.search("attention", 5).await.unwrap();

        assert_eq!(results.len(), 1);
        let candidate = &results[0];
        assert_eq!(candidate.provenance, Provenance::Academic);
        assert_eq!(candidate.title, "Attention Is All You Need");
        let meta = candidate.metadata.as_ref().unwrap();
        assert_eq!(meta.authors, "A. Vaswani, N. Shazeer");
        assert_eq!(meta.year, Some(2017));
        assert!(meta.has_abstract());
    }

    #[tokio::test(start_paused = true)]
    async fn test_persistent_rate_limit_degrades_to_empty() {
        // One backoff retry, then give up without failing the run
        let searcher = searcher_with(MockFetcher::new().with_status(&api_url("q", 5), 429));
        let results = searcher.search("q", 5).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_degrades_to_empty() {
        let searcher = searcher_with(MockFetcher::new().with_status(&api_url("q", 5), 500));
        let results = searcher.search("q", 5).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_body_degrades_to_empty() {
        let searcher = searcher_with(MockFetcher::new().with_page(&api_url("q", 5), "not json"));
        let results = searcher.search("q", 5).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_missing_fields_get_placeholders() {
        let body = json!({"data": [{}]}).to_string();
        let searcher = searcher_with(MockFetcher::new().with_page(&api_url("q", 5), &body));

        let results = searcher.search("q", 5).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Untitled Paper");
        assert!(results[0].snippet.contains("No abstract available"));
        // Missing authors and year render as placeholders, not omissions
        assert!(results[0].snippet.starts_with("Unknown authors ()"));
        // No abstract means no synthesized-content path
        assert!(results[0].abstract_text().is_none());
    }
}
