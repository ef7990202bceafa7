//! Research run orchestration.

pub mod collect;
pub mod run;

pub use collect::{collect_valid_content, Collection, StopReason, MAX_BATCH_SIZE, MAX_ITERATIONS};
pub use run::{Researcher, SEARCH_MULTIPLIER};
