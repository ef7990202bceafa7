//! Source balancing across provenances.

use crate::types::query::{ResearchQuery, SourceScope};
use crate::types::source::{CandidateSource, Provenance};

/// Order candidates for extraction, at most `target_count` of them.
///
/// With scope `Both`, web and academic candidates are interleaved
/// alternately, each provenance capped at `max(1, target / 2)`, so one noisy
/// provenance cannot crowd out the other. Single-provenance scopes take the
/// first `target` candidates as-is.
pub fn select_candidates(
    candidates: &[CandidateSource],
    query: &ResearchQuery,
) -> Vec<CandidateSource> {
    let target = query.target_count;

    if query.scope != SourceScope::Both {
        return candidates.iter().take(target).cloned().collect();
    }

    let web: Vec<&CandidateSource> = candidates
        .iter()
        .filter(|c| c.provenance == Provenance::Web)
        .collect();
    let academic: Vec<&CandidateSource> = candidates
        .iter()
        .filter(|c| c.provenance == Provenance::Academic)
        .collect();

    let max_per_type = std::cmp::max(1, target / 2);
    let mut combined: Vec<CandidateSource> = Vec::with_capacity(target);

    for i in 0..std::cmp::max(web.len(), academic.len()) {
        if combined.len() >= target {
            break;
        }
        if i < web.len() && count_of(&combined, Provenance::Web) < max_per_type {
            combined.push(web[i].clone());
        }
        if combined.len() >= target {
            break;
        }
        if i < academic.len() && count_of(&combined, Provenance::Academic) < max_per_type {
            combined.push(academic[i].clone());
        }
    }

    combined.truncate(target);
    combined
}

fn count_of(candidates: &[CandidateSource], provenance: Provenance) -> usize {
    candidates
        .iter()
        .filter(|c| c.provenance == provenance)
        .count()
}
