//! Configuration for search and content resolution.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default browser-like user agent; some engines answer bots with a wall.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration for search operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Hard cap on candidates requested per provenance
    pub max_results: usize,

    /// Default target count when a caller does not supply one
    pub default_num_results: usize,

    /// Web search request timeout (seconds)
    pub web_timeout_secs: f64,

    /// Academic API request timeout (seconds)
    pub academic_timeout_secs: f64,

    /// Minimum interval between academic API requests (seconds)
    pub academic_min_interval_secs: f64,

    /// Snippet length cap (characters)
    pub max_snippet_len: usize,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 10,
            default_num_results: 2,
            web_timeout_secs: 10.0,
            academic_timeout_secs: 5.0,
            academic_min_interval_secs: 2.0,
            max_snippet_len: 200,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl SearchConfig {
    /// Web search timeout as a [`Duration`].
    pub fn web_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.web_timeout_secs)
    }

    /// Academic search timeout as a [`Duration`].
    pub fn academic_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.academic_timeout_secs)
    }

    /// Academic pacing interval as a [`Duration`].
    pub fn academic_min_interval(&self) -> Duration {
        Duration::from_secs_f64(self.academic_min_interval_secs)
    }
}

/// Configuration for content resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Fetch timeout for candidate pages (seconds)
    pub fetch_timeout_secs: f64,

    /// Characters of a document fed to the HTML parser
    pub max_parse_len: usize,

    /// Paragraph blocks taken in the first extraction pass
    pub max_paragraphs: usize,

    /// Elements scanned in the heading fallback pass
    pub max_elements: usize,

    /// Rendered report size default (characters)
    pub max_content_size: usize,

    /// User agent sent with every fetch
    pub user_agent: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 8.0,
            max_parse_len: 100_000,
            max_paragraphs: 5,
            max_elements: 8,
            max_content_size: 8_000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ContentConfig {
    /// Fetch timeout as a [`Duration`].
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.fetch_timeout_secs)
    }
}

/// Combined settings for a research engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Search configuration
    pub search: SearchConfig,

    /// Content resolution configuration
    pub content: ContentConfig,
}

impl Settings {
    /// Create settings with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the search config.
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Replace the content config.
    pub fn with_content(mut self, content: ContentConfig) -> Self {
        self.content = content;
        self
    }

    /// Load settings from `RESEARCH_*` environment variables.
    ///
    /// Unset or unparseable variables keep their defaults.
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Some(max) = env_parse::<usize>("RESEARCH_MAX_RESULTS") {
            settings.search.max_results = max;
        }
        if let Some(n) = env_parse::<usize>("RESEARCH_DEFAULT_NUM_RESULTS") {
            settings.search.default_num_results = n;
        }
        if let Some(t) = env_parse::<f64>("RESEARCH_WEB_TIMEOUT") {
            settings.search.web_timeout_secs = t;
        }
        if let Ok(ua) = std::env::var("RESEARCH_USER_AGENT") {
            settings.search.user_agent = ua.clone();
            settings.content.user_agent = ua;
        }
        if let Some(size) = env_parse::<usize>("RESEARCH_MAX_CONTENT_SIZE") {
            settings.content.max_content_size = size;
        }

        settings
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::new();
        assert_eq!(settings.search.max_results, 10);
        assert_eq!(settings.search.academic_min_interval(), Duration::from_secs(2));
        assert_eq!(settings.content.max_paragraphs, 5);
    }

    #[test]
    fn test_builder() {
        let settings = Settings::new().with_search(SearchConfig {
            max_results: 4,
            ..Default::default()
        });
        assert_eq!(settings.search.max_results, 4);
        assert_eq!(settings.search.default_num_results, 2);
    }
}
