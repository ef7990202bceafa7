//! The research run: search, collect, summarize.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::error::Result;
use crate::pipeline::collect::collect_valid_content;
use crate::resolve::ContentResolver;
use crate::search::{AcademicSearcher, SearchPacer, WebSearcher};
use crate::text::truncate_chars;
use crate::traits::fetcher::{Fetcher, HttpFetcher};
use crate::traits::searcher::Searcher;
use crate::types::config::Settings;
use crate::types::query::{ResearchQuery, SourceScope};
use crate::types::report::ResearchResult;

/// Candidates requested per provenance, as a multiple of the target count.
pub const SEARCH_MULTIPLIER: usize = 3;

/// Characters kept of a search failure note.
const MAX_ERROR_NOTE_LEN: usize = 100;

const NO_RESULTS_SUMMARY: &str =
    "No valid search results found. Please try a different query.";

/// Runs research queries end to end.
///
/// Dispatches the query to every searcher whose provenance the query's scope
/// includes, then hands all candidates to the collection loop. A failed
/// provenance is recorded and skipped; the run continues with whatever the
/// other provenances returned. Search-level failures are the only entries in
/// the result's error list; per-candidate resolution failures stay in the
/// collection's skip log.
pub struct Researcher<F> {
    searchers: Vec<Box<dyn Searcher>>,
    resolver: ContentResolver<F>,
    settings: Settings,
}

impl Researcher<HttpFetcher> {
    /// Researcher with the default HTTP fetcher and searchers.
    pub fn new(settings: Settings) -> Self {
        let fetcher = Arc::new(HttpFetcher::new(settings.search.user_agent.clone()));
        Self::with_fetcher(fetcher, settings)
    }
}

impl<F: Fetcher + 'static> Researcher<F> {
    /// Standard searchers over a custom fetch capability.
    pub fn with_fetcher(fetcher: Arc<F>, settings: Settings) -> Self {
        let pacer = SearchPacer::new(settings.search.academic_min_interval());
        let searchers: Vec<Box<dyn Searcher>> = vec![
            Box::new(WebSearcher::new(fetcher.clone(), settings.search.clone())),
            Box::new(AcademicSearcher::new(
                fetcher.clone(),
                settings.search.clone(),
                pacer,
            )),
        ];
        Self::from_parts(searchers, fetcher, settings)
    }

    /// Assemble a researcher from explicit searchers.
    pub fn from_parts(
        searchers: Vec<Box<dyn Searcher>>,
        fetcher: Arc<F>,
        settings: Settings,
    ) -> Self {
        let resolver = ContentResolver::new(fetcher, settings.content.clone());
        Self {
            searchers,
            resolver,
            settings,
        }
    }

    /// The settings this researcher runs with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run one research query end to end.
    pub async fn run(&self, query: &ResearchQuery) -> Result<ResearchResult> {
        let start = Instant::now();
        info!(
            query = %query.text,
            scope = %query.scope,
            target = query.target_count,
            "research starting"
        );

        // Over-fetch so the collection loop has retry headroom
        let expanded = std::cmp::min(
            query.target_count * SEARCH_MULTIPLIER,
            self.settings.search.max_results,
        );

        let mut candidates = Vec::new();
        let mut errors = Vec::new();

        for searcher in &self.searchers {
            if !query.scope.includes(searcher.provenance()) {
                continue;
            }
            match searcher.search(&query.text, expanded).await {
                Ok(results) => {
                    info!(
                        provenance = %searcher.provenance(),
                        count = results.len(),
                        "search completed"
                    );
                    candidates.extend(results);
                }
                Err(e) => {
                    warn!(provenance = %e.provenance, error = %e, "search failed, continuing");
                    errors.push(truncate_chars(&e.to_string(), MAX_ERROR_NOTE_LEN).to_string());
                }
            }
        }

        if candidates.is_empty() {
            warn!(query = %query.text, "no search results found");
            return Ok(ResearchResult {
                query: query.clone(),
                candidates: Vec::new(),
                accepted: Vec::new(),
                summary: NO_RESULTS_SUMMARY.to_string(),
                total_candidates: 0,
                elapsed_secs: start.elapsed().as_secs_f64(),
                errors,
            });
        }

        let collection = collect_valid_content(&candidates, query, &self.resolver).await;
        let summary = summarize(query, candidates.len(), collection.accepted.len());
        let elapsed = start.elapsed().as_secs_f64();

        info!(
            accepted = collection.accepted.len(),
            total = candidates.len(),
            elapsed_secs = elapsed,
            "research completed"
        );

        Ok(ResearchResult {
            query: query.clone(),
            total_candidates: candidates.len(),
            candidates,
            accepted: collection.accepted,
            summary,
            elapsed_secs: elapsed,
            errors,
        })
    }
}

/// Templated run summary.
fn summarize(query: &ResearchQuery, total: usize, accepted: usize) -> String {
    let source_text = match query.scope {
        SourceScope::Both => "web and academic databases".to_string(),
        scope => format!("{} sources", scope),
    };

    let mut summary = format!("Completed research on: {}\n", query.text);
    summary.push_str(&format!(
        "Found {} potential sources from {}\n",
        total, source_text
    ));
    summary.push_str(&format!(
        "Successfully extracted valid content from {} high-quality sources",
        accepted
    ));

    let target = query.target_count;
    if accepted == target {
        summary.push_str(&format!(" (target of {} achieved)\n", target));
    } else if accepted < target {
        summary.push_str(&format!(
            " (target was {}, but only {} valid sources found)\n",
            target, accepted
        ));
    } else {
        summary.push_str(&format!(" (exceeded target of {})\n", target));
    }

    if accepted < total {
        summary.push_str(&format!(
            "Filtered out {} sources with restricted access or low-quality content\n",
            total - accepted
        ));
    }

    summary.push_str(
        "The information above represents the most relevant and accessible content found on this topic.",
    );
    summary
}
