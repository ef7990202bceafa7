//! Searcher implementations, one per provenance.

pub mod academic;
pub mod pacer;
pub mod web;

pub use academic::AcademicSearcher;
pub use pacer::SearchPacer;
pub use web::WebSearcher;
