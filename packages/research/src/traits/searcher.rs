//! Search capability - one implementation per provenance.

use async_trait::async_trait;

use crate::error::SearchResult;
use crate::types::source::{CandidateSource, Provenance};

/// Turns a query string into an ordered list of candidate sources.
///
/// "No results" is `Ok(vec![])`, never an error. A
/// [`SearchError`](crate::error::SearchError) means the provenance failed
/// entirely for an unrecoverable reason, such as a network failure that is
/// not rate limiting.
///
/// # Implementations
///
/// - [`WebSearcher`](crate::search::WebSearcher) - DuckDuckGo HTML results
/// - [`AcademicSearcher`](crate::search::AcademicSearcher) - Semantic Scholar
/// - [`MockSearcher`](crate::testing::MockSearcher) - for testing
#[async_trait]
pub trait Searcher: Send + Sync {
    /// Which provenance this searcher produces.
    fn provenance(&self) -> Provenance;

    /// Search for candidates, capped at `limit`.
    async fn search(&self, query: &str, limit: usize) -> SearchResult<Vec<CandidateSource>>;
}
