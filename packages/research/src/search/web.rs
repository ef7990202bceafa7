//! Web search via the DuckDuckGo HTML endpoint.

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{SearchError, SearchResult};
use crate::text::truncate_chars;
use crate::traits::fetcher::Fetcher;
use crate::traits::searcher::Searcher;
use crate::types::config::SearchConfig;
use crate::types::source::{CandidateSource, Provenance};

const SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

const MAX_TITLE_LEN: usize = 100;
const MAX_URL_LEN: usize = 150;

/// DuckDuckGo HTML-results searcher.
///
/// Queries the no-JavaScript results page and parses the structural
/// `.result` blocks with CSS selectors.
pub struct WebSearcher<F> {
    fetcher: Arc<F>,
    config: SearchConfig,
}

impl<F: Fetcher> WebSearcher<F> {
    /// Create a web searcher over a fetch capability.
    pub fn new(fetcher: Arc<F>, config: SearchConfig) -> Self {
        Self { fetcher, config }
    }

    /// Parse the results page into candidates, capped at `limit`.
    fn parse_results(&self, html: &str, limit: usize) -> Vec<CandidateSource> {
        let document = Html::parse_document(html);

        // Static selectors; parse failures here would be programmer error
        let result_sel = Selector::parse(".result").unwrap();
        let title_sel = Selector::parse(".result__title a").unwrap();
        let snippet_sel = Selector::parse(".result__snippet").unwrap();

        let mut candidates = Vec::new();

        for block in document.select(&result_sel) {
            if candidates.len() >= limit {
                break;
            }

            let Some(title_elem) = block.select(&title_sel).next() else {
                continue;
            };

            let title = title_elem.text().collect::<String>().trim().to_string();
            let href = title_elem.value().attr("href").unwrap_or_default();
            let href = unwrap_redirect(href);

            let snippet = block
                .select(&snippet_sel)
                .next()
                .map(|s| s.text().collect::<String>().trim().to_string())
                .unwrap_or_else(|| "No snippet available".to_string());

            candidates.push(
                CandidateSource::web(
                    truncate_chars(&title, MAX_TITLE_LEN),
                    truncate_chars(&href, MAX_URL_LEN),
                )
                .with_snippet(truncate_chars(&snippet, self.config.max_snippet_len)),
            );
        }

        candidates
    }
}

/// Resolve a redirect-wrapped result href to its real target.
///
/// DuckDuckGo wraps targets as `//duckduckgo.com/l/?uddg=<encoded>`; the
/// `uddg` query parameter holds the destination.
fn unwrap_redirect(href: &str) -> String {
    if !href.contains("duckduckgo.com") {
        return href.to_string();
    }

    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else {
        href.to_string()
    };

    if let Ok(url) = Url::parse(&absolute) {
        if let Some((_, target)) = url.query_pairs().find(|(k, _)| k == "uddg") {
            return target.into_owned();
        }
    }

    href.to_string()
}

#[async_trait]
impl<F: Fetcher> Searcher for WebSearcher<F> {
    fn provenance(&self) -> Provenance {
        Provenance::Web
    }

    async fn search(&self, query: &str, limit: usize) -> SearchResult<Vec<CandidateSource>> {
        info!(query = %query, limit = limit, "web search starting");

        let url = Url::parse_with_params(SEARCH_ENDPOINT, &[("q", query)])
            .map_err(|e| SearchError::new(Provenance::Web, e.to_string()))?;

        let response = self
            .fetcher
            .get(url.as_str(), "text/html,application/xhtml+xml", self.config.web_timeout())
            .await
            .map_err(|e| SearchError::new(Provenance::Web, e.to_string()).with_source(e))?;

        if !response.is_success() {
            warn!(status = response.status, "web search returned non-success status");
            return Err(SearchError::new(
                Provenance::Web,
                format!("search engine returned HTTP {}", response.status),
            ));
        }

        let candidates = self.parse_results(&response.body, limit);
        debug!(count = candidates.len(), "web search parsed results");
        info!(count = candidates.len(), "web search completed");

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetcher;

    fn results_page() -> String {
        r##"
        <html><body>
          <div class="result">
            <h2 class="result__title"><a href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Frust&rut=abc">Rust language</a></h2>
            <a class="result__snippet">A systems programming language.</a>
          </div>
          <div class="result">
            <h2 class="result__title"><a href="https://tokio.rs/">Tokio</a></h2>
            <a class="result__snippet">Asynchronous runtime for Rust.</a>
          </div>
          <div class="result">
            <h2 class="result__title"></h2>
          </div>
        </body></html>
        "##
        .to_string()
    }

    #[test]
    fn test_unwrap_redirect() {
        let wrapped = "//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fpage&rut=xyz";
        assert_eq!(unwrap_redirect(wrapped), "https://example.com/page");

        let direct = "https://example.com/page";
        assert_eq!(unwrap_redirect(direct), direct);
    }

    #[tokio::test]
    async fn test_parses_result_blocks() {
        let fetcher = Arc::new(MockFetcher::new().with_page(
            "https://html.duckduckgo.com/html/?q=rust",
            &results_page(),
        ));
        let searcher = WebSearcher::new(fetcher, SearchConfig::default());

        let results = searcher.search("rust", 10).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Rust language");
        assert_eq!(results[0].url, "https://example.com/rust");
        assert_eq!(results[0].snippet, "A systems programming language.");
        assert_eq!(results[1].url, "https://tokio.rs/");
        assert!(results.iter().all(|r| r.provenance == Provenance::Web));
    }

    #[tokio::test]
    async fn test_caps_at_limit() {
        let fetcher = Arc::new(MockFetcher::new().with_page(
            "https://html.duckduckgo.com/html/?q=rust",
            &results_page(),
        ));
        let searcher = WebSearcher::new(fetcher, SearchConfig::default());

        let results = searcher.search("rust", 1).await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_non_success_is_a_search_error() {
        let fetcher = Arc::new(MockFetcher::new().with_status(
            "https://html.duckduckgo.com/html/?q=rust",
            503,
        ));
        let searcher = WebSearcher::new(fetcher, SearchConfig::default());

        let err = searcher.search("rust", 5).await.unwrap_err();
        assert_eq!(err.provenance, Provenance::Web);
    }
}
