use crate::core::tables::JustificationPolicy;
use crate::models::{Criterion, Justification, ScoreBreakdown};

fn strong_point(criterion: Criterion) -> &'static str {
    match criterion {
        Criterion::Budget => "Priced comfortably within your budget",
        Criterion::Usage => "Body type is well suited to how you plan to use it",
        Criterion::Family => "Enough room for your whole family",
        Criterion::Preference => "Matches the brands and vehicle types you asked for",
        Criterion::Reliability => "Strong reliability record with low running costs",
    }
}

fn consideration(criterion: Criterion) -> &'static str {
    match criterion {
        Criterion::Budget => "Price sits near the edge of your budget",
        Criterion::Usage => "Body type is a weak fit for your main use",
        Criterion::Family => "May be tight on seats for your family",
        Criterion::Preference => "Outside your stated brand or vehicle type preferences",
        Criterion::Reliability => "Reliability, recall history or parts supply is a concern",
    }
}

/// Explain a breakdown in plain language
///
/// Works from the breakdown alone so the explanation can never disagree with
/// the score it describes.
pub fn justify(breakdown: &ScoreBreakdown, policy: &JustificationPolicy) -> Justification {
    // Stable sort keeps criterion order among equal scores
    let mut by_strength: Vec<(Criterion, f64)> = breakdown.iter().collect();
    by_strength.sort_by(|a, b| b.1.total_cmp(&a.1));

    let strong_points = by_strength
        .iter()
        .filter(|(_, score)| *score >= policy.strong_threshold)
        .map(|(criterion, _)| strong_point(*criterion).to_string())
        .collect();

    let mut weakest: Vec<(Criterion, f64)> = breakdown.iter().collect();
    weakest.sort_by(|a, b| a.1.total_cmp(&b.1));

    let considerations = weakest
        .iter()
        .filter(|(_, score)| *score <= policy.caution_threshold)
        .map(|(criterion, _)| consideration(*criterion).to_string())
        .collect();

    Justification {
        summary: summarize(&by_strength, policy),
        strong_points,
        considerations,
    }
}

fn summarize(by_strength: &[(Criterion, f64)], policy: &JustificationPolicy) -> String {
    let (first, top_score) = by_strength[0];
    let second = by_strength[1].0;

    if top_score >= policy.strong_threshold {
        format!("A strong pick for its {} and {}.", first.label(), second.label())
    } else if top_score > policy.caution_threshold {
        format!("A reasonable option, best on {} and {}.", first.label(), second.label())
    } else {
        format!("A weak overall fit; its best points are {} and {}.", first.label(), second.label())
    }
}
