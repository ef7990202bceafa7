//! Capability traits consumed by the pipeline.

pub mod fetcher;
pub mod searcher;
