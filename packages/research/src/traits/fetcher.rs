//! HTTP fetch capability shared by searchers and the content resolver.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};

/// Response from an HTTP GET.
///
/// Non-success statuses are returned as values, not errors, so callers can
/// distinguish rate limiting from transport failures.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,

    /// Content-Type header, lowercased, if present
    pub content_type: Option<String>,

    /// Response body as text
    pub body: String,

    /// Final URL after redirects
    pub final_url: String,
}

impl FetchResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Convert a non-success response into a status error.
    pub fn ensure_success(self) -> FetchResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Status {
                url: self.final_url.clone(),
                status: self.status,
            })
        }
    }
}

/// HTTP GET with a per-call timeout.
///
/// The single network seam of the library: both searchers and the content
/// resolver go through this trait, so tests can run fully offline with
/// [`MockFetcher`](crate::testing::MockFetcher).
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch a URL, following redirects.
    async fn get(&self, url: &str, accept: &str, timeout: Duration) -> FetchResult<FetchResponse>;
}

/// Real fetcher backed by `reqwest`.
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl HttpFetcher {
    /// Create a fetcher with the given user agent.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::limited(5))
                .build()
                .expect("failed to create HTTP client"),
            user_agent: user_agent.into(),
        }
    }

    /// Use a pre-built `reqwest` client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(crate::types::config::DEFAULT_USER_AGENT)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str, accept: &str, timeout: Duration) -> FetchResult<FetchResponse> {
        debug!(url = %url, "HTTP fetch starting");

        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", accept)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "HTTP request failed");
                FetchError::Transport {
                    url: url.to_string(),
                    source: Box::new(e),
                }
            })?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_lowercase());

        let body = response.text().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: Box::new(e),
        })?;

        debug!(url = %url, status = status, body_len = body.len(), "HTTP fetch completed");

        Ok(FetchResponse {
            status,
            content_type,
            body,
            final_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_success() {
        let ok = FetchResponse {
            status: 200,
            content_type: None,
            body: String::new(),
            final_url: "https://example.com".to_string(),
        };
        assert!(ok.ensure_success().is_ok());

        let not_found = FetchResponse {
            status: 404,
            content_type: None,
            body: String::new(),
            final_url: "https://example.com".to_string(),
        };
        let err = not_found.ensure_success().unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
