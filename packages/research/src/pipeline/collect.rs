//! Batch-retry content collection.
//!
//! Pulls candidates in fixed-size batches, resolves each batch concurrently,
//! and keeps going until the target is met, the candidates run out, or the
//! iteration budget is spent.

use std::collections::HashSet;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::balance::select_candidates;
use crate::filter::MIN_CONTENT_LEN;
use crate::resolve::{ContentResolver, VALIDATION_FAILED};
use crate::traits::fetcher::Fetcher;
use crate::types::content::ExtractedContent;
use crate::types::query::ResearchQuery;
use crate::types::source::CandidateSource;

/// Hard cap on batch iterations per run.
pub const MAX_ITERATIONS: usize = 5;

/// Maximum candidates resolved concurrently in one batch.
pub const MAX_BATCH_SIZE: usize = 3;

/// Why the collection loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Enough valid sources were collected
    TargetReached,

    /// Every candidate has been tried
    CandidatesExhausted,

    /// The iteration budget ran out; not an error
    IterationCapReached,
}

/// Collection loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Collecting,
    Done(StopReason),
}

/// Outcome of one collection run.
#[derive(Debug)]
pub struct Collection {
    /// Contents that passed validation, at most the query's target count
    pub accepted: Vec<ExtractedContent>,

    /// Skip notes: validation rejections, thin pages, failed fetches.
    /// Per-candidate failures never surface in the final report
    pub skipped: Vec<String>,

    /// Distinct URLs a resolution was attempted for
    pub tried: usize,

    /// Batches issued
    pub iterations: usize,

    /// Which termination predicate fired
    pub stop_reason: StopReason,
}

/// Collect valid content for a query from an ordered candidate list.
///
/// The first batch comes from the balancer's selection, padded to the batch
/// size from the remaining candidates in order; subsequent batches
/// take the next untried candidates (by URL) in original order. Within a
/// batch all resolutions run concurrently; batches are strictly sequential
/// because each batch's selection depends on the previous tried-set.
pub async fn collect_valid_content<F: Fetcher>(
    candidates: &[CandidateSource],
    query: &ResearchQuery,
    resolver: &ContentResolver<F>,
) -> Collection {
    let target = query.target_count;
    let batch_size = std::cmp::min(MAX_BATCH_SIZE, candidates.len());

    let mut accepted: Vec<ExtractedContent> = Vec::new();
    let mut skipped: Vec<String> = Vec::new();
    let mut tried: HashSet<String> = HashSet::new();
    let mut iterations = 0usize;
    let mut first_batch = true;
    let mut phase = Phase::Collecting;

    let balanced = select_candidates(candidates, query);

    info!(
        target = target,
        available = candidates.len(),
        batch_size = batch_size,
        "collection starting"
    );

    while phase == Phase::Collecting {
        // Three independent termination predicates, checked in order
        if accepted.len() >= target {
            phase = Phase::Done(StopReason::TargetReached);
            break;
        }
        if iterations >= MAX_ITERATIONS {
            phase = Phase::Done(StopReason::IterationCapReached);
            break;
        }

        let batch: Vec<&CandidateSource> = if first_batch {
            // Balancer order first, padded to a full batch from the
            // remaining candidates in original order
            let selected: HashSet<&str> = balanced.iter().map(|c| c.url.as_str()).collect();
            balanced
                .iter()
                .chain(candidates.iter().filter(|c| !selected.contains(c.url.as_str())))
                .take(batch_size)
                .collect()
        } else {
            candidates
                .iter()
                .filter(|c| !tried.contains(&c.url))
                .take(batch_size)
                .collect()
        };
        first_batch = false;

        if batch.is_empty() {
            phase = Phase::Done(StopReason::CandidatesExhausted);
            break;
        }

        iterations += 1;
        info!(
            batch = iterations,
            size = batch.len(),
            needed = target - accepted.len(),
            "resolving batch"
        );

        // Concurrent within the batch; each resolution is failure-isolated
        let results = join_all(batch.iter().map(|c| resolver.resolve(c))).await;

        for (candidate, content) in batch.iter().zip(results) {
            tried.insert(candidate.url.clone());

            match &content.error {
                Some(error) if error == VALIDATION_FAILED => {
                    debug!(url = %content.url, "skipping invalid content");
                    skipped.push(format!("skipped invalid content from {}", content.url));
                }
                Some(error) => {
                    warn!(url = %content.url, error = %error, "content extraction failed, skipping");
                    skipped.push(format!(
                        "content extraction failed for {}: {}",
                        content.url, error
                    ));
                }
                None if content.body.trim().chars().count() < MIN_CONTENT_LEN => {
                    debug!(url = %content.url, "skipping source with insufficient content");
                    skipped.push(format!("insufficient content from {}", content.url));
                }
                None => {
                    debug!(
                        url = %content.url,
                        have = accepted.len() + 1,
                        target = target,
                        "valid content found"
                    );
                    accepted.push(content);
                    if accepted.len() >= target {
                        break;
                    }
                }
            }
        }
    }

    let stop_reason = match phase {
        Phase::Done(reason) => reason,
        // Unreachable: the loop only exits through Done
        Phase::Collecting => StopReason::CandidatesExhausted,
    };

    match stop_reason {
        StopReason::TargetReached => {
            info!(accepted = accepted.len(), iterations = iterations, "target reached")
        }
        StopReason::CandidatesExhausted => {
            info!(accepted = accepted.len(), iterations = iterations, "candidates exhausted")
        }
        StopReason::IterationCapReached => warn!(
            accepted = accepted.len(),
            cap = MAX_ITERATIONS,
            "iteration cap reached, stopping collection"
        ),
    }

    Collection {
        accepted,
        skipped,
        tried: tried.len(),
        iterations,
        stop_reason,
    }
}
