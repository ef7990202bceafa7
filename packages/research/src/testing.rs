//! Test support: offline mocks for the network seams and HTML fixtures.
//!
//! Used by the crate's own tests and by integration tests; everything here
//! runs without touching the network.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{FetchError, FetchResult, SearchError, SearchResult};
use crate::traits::fetcher::{FetchResponse, Fetcher};
use crate::traits::searcher::Searcher;
use crate::types::source::{CandidateSource, Provenance};

/// In-memory fetcher keyed by exact URL.
///
/// Unregistered URLs fail with a transport error, which is what a dead
/// connection looks like to callers. Every requested URL is recorded for
/// assertions.
pub struct MockFetcher {
    responses: Arc<RwLock<HashMap<String, FetchResponse>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a 200 `text/html` response.
    pub fn with_page(self, url: &str, html: &str) -> Self {
        self.insert(
            url,
            FetchResponse {
                status: 200,
                content_type: Some("text/html; charset=utf-8".to_string()),
                body: html.to_string(),
                final_url: url.to_string(),
            },
        );
        self
    }

    /// Register an empty response with the given status.
    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.insert(
            url,
            FetchResponse {
                status,
                content_type: Some("text/html".to_string()),
                body: String::new(),
                final_url: url.to_string(),
            },
        );
        self
    }

    /// Register a 200 response with an explicit content type.
    pub fn with_content_type(self, url: &str, content_type: &str, body: &str) -> Self {
        self.insert(
            url,
            FetchResponse {
                status: 200,
                content_type: Some(content_type.to_lowercase()),
                body: body.to_string(),
                final_url: url.to_string(),
            },
        );
        self
    }

    /// Another handle onto the same response table and call log.
    pub fn clone_handle(&self) -> Self {
        Self {
            responses: self.responses.clone(),
            calls: self.calls.clone(),
        }
    }

    /// Every URL requested so far, in order.
    pub fn fetched_urls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    fn insert(&self, url: &str, response: FetchResponse) {
        self.responses
            .write()
            .unwrap()
            .insert(url.to_string(), response);
    }
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn get(&self, url: &str, _accept: &str, _timeout: Duration) -> FetchResult<FetchResponse> {
        self.calls.write().unwrap().push(url.to_string());

        match self.responses.read().unwrap().get(url) {
            Some(response) => Ok(response.clone()),
            None => Err(FetchError::Transport {
                url: url.to_string(),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "no mock response registered",
                )),
            }),
        }
    }
}

/// Canned searcher for one provenance.
///
/// Returns its configured candidates truncated to the requested limit, or a
/// configured failure. Requests are recorded for assertions.
pub struct MockSearcher {
    provenance: Provenance,
    results: Vec<CandidateSource>,
    fail_with: Option<String>,
    calls: Arc<RwLock<Vec<(String, usize)>>>,
}

impl MockSearcher {
    pub fn new(provenance: Provenance) -> Self {
        Self {
            provenance,
            results: Vec::new(),
            fail_with: None,
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Candidates every search returns.
    pub fn with_results(mut self, results: Vec<CandidateSource>) -> Self {
        self.results = results;
        self
    }

    /// Make every search fail with this message.
    pub fn failing(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_string());
        self
    }

    /// Another handle onto the same configuration and call log.
    pub fn clone_handle(&self) -> Self {
        Self {
            provenance: self.provenance,
            results: self.results.clone(),
            fail_with: self.fail_with.clone(),
            calls: self.calls.clone(),
        }
    }

    /// Every (query, limit) pair searched so far.
    pub fn requests(&self) -> Vec<(String, usize)> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Searcher for MockSearcher {
    fn provenance(&self) -> Provenance {
        self.provenance
    }

    async fn search(&self, query: &str, limit: usize) -> SearchResult<Vec<CandidateSource>> {
        self.calls
            .write()
            .unwrap()
            .push((query.to_string(), limit));

        if let Some(message) = &self.fail_with {
            return Err(SearchError::new(self.provenance, message.clone()));
        }

        Ok(self.results.iter().take(limit).cloned().collect())
    }
}

/// A well-formed article page that passes the validity filter.
pub fn valid_article_html() -> String {
    "<html><head>\
     <title>Understanding Ownership</title>\
     <meta name=\"description\" content=\"How a program manages memory through ownership.\">\
     </head><body>\
     <p>Ownership is a set of rules that governs how a program manages memory. \
     Every value has a single owning variable at any point in time.</p>\
     <p>When the owner goes out of scope the value is dropped and its memory \
     is reclaimed without a garbage collector.</p>\
     <p>Borrowing lets other parts of the program read or modify a value \
     without taking ownership of it, checked at compile time.</p>\
     </body></html>"
        .to_string()
}

/// A page whose extracted body is too short to pass validation.
pub fn thin_page_html() -> String {
    "<html><head><title>Stub</title></head>\
     <body><p>Just a tiny stub page.</p></body></html>"
        .to_string()
}
