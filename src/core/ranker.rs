use std::cmp::Ordering;

use crate::models::ScoredCandidate;

/// Order scored candidates and keep the best `top_n`
///
/// Candidates are sorted by overall score, then split into runs: a run starts
/// at its highest score and takes every following candidate within
/// `tie_epsilon` of that leading score. Inside a run the tie-breaks decide:
/// higher reliability fit, then lower price, then catalog order. Ranks are
/// assigned 1..=len.
pub fn rank<'a>(
    mut scored: Vec<ScoredCandidate<'a>>,
    top_n: usize,
    tie_epsilon: f64,
) -> Vec<ScoredCandidate<'a>> {
    scored.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.catalog_index.cmp(&b.catalog_index))
    });

    let mut start = 0;
    while start < scored.len() {
        let leader = scored[start].score;
        let end = scored[start..]
            .iter()
            .position(|candidate| leader - candidate.score > tie_epsilon)
            .map_or(scored.len(), |offset| start + offset);

        scored[start..end].sort_by(break_tie);
        start = end;
    }

    scored.truncate(top_n);

    for (position, candidate) in scored.iter_mut().enumerate() {
        candidate.rank = position + 1;
    }

    scored
}

fn break_tie(a: &ScoredCandidate<'_>, b: &ScoredCandidate<'_>) -> Ordering {
    b.breakdown
        .reliability
        .total_cmp(&a.breakdown.reliability)
        .then_with(|| {
            a.listing
                .effective_price()
                .total_cmp(&b.listing.effective_price())
        })
        .then_with(|| a.catalog_index.cmp(&b.catalog_index))
}
