//! Query-Driven Research Aggregation Library
//!
//! Turns one natural-language query into a bounded text report by searching
//! web and academic sources, fetching and extracting candidate pages,
//! filtering out low-quality or restricted content, and retrying in balanced
//! batches until a target number of valid sources is collected.
//!
//! # Design
//!
//! - Single network seam: everything reaches the network through the
//!   [`Fetcher`] trait, so the whole pipeline runs offline under test
//! - Failure isolation: one bad candidate never aborts its batch, and one
//!   failed search provenance never aborts the run
//! - Bounded output: reports are rendered to a hard character budget with an
//!   explicit truncation marker
//!
//! # Usage
//!
//! ```rust,ignore
//! use research::{Researcher, ResearchQuery, Settings, SourceScope};
//!
//! let researcher = Researcher::new(Settings::from_env());
//! let query = ResearchQuery::new("rust async runtimes", SourceScope::Both, 3)?;
//!
//! let result = researcher.run(&query).await?;
//! println!("{}", result.render(8_000));
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (Fetcher, Searcher)
//! - [`types`] - Queries, candidates, extracted content, results
//! - [`search`] - Searcher implementations, one per provenance
//! - [`resolve`] - Candidate fetching and HTML content extraction
//! - [`filter`] - Content validity heuristics
//! - [`balance`] - Cross-provenance candidate ordering
//! - [`pipeline`] - The batch-retry collection loop and run driver
//! - [`testing`] - Mock implementations for testing

pub mod balance;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod resolve;
pub mod search;
pub mod testing;
pub mod text;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{FetchError, ResearchError, Result, SearchError};
pub use pipeline::{Researcher, StopReason};
pub use traits::fetcher::{FetchResponse, Fetcher, HttpFetcher};
pub use traits::searcher::Searcher;
pub use types::config::{ContentConfig, SearchConfig, Settings};
pub use types::content::ExtractedContent;
pub use types::query::{ResearchQuery, SourceScope};
pub use types::report::ResearchResult;
pub use types::source::{AcademicMeta, CandidateSource, Provenance};
