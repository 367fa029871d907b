use crate::core::scoring::clamp_unit;
use crate::core::tables::AggregationWeights;
use crate::models::{Criterion, Priorities, ScoreBreakdown};

/// Per-criterion weights derived from a profile's priorities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriterionWeights {
    pub budget: f64,
    pub usage: f64,
    pub family: f64,
    pub preference: f64,
    pub reliability: f64,
}

impl CriterionWeights {
    /// Map the six questionnaire priorities onto the five criteria
    ///
    /// `fuelEconomy` drives budget fit, `comfort` and `space` drive family fit,
    /// `safety` and `reliability` drive reliability fit. Usage and preference
    /// carry fixed weights. `performance` has no criterion of its own.
    pub fn from_priorities(priorities: &Priorities, fixed: &AggregationWeights) -> Self {
        let mean = |a: u8, b: u8| (f64::from(a) + f64::from(b)) / 2.0;

        Self {
            budget: f64::from(priorities.fuel_economy),
            usage: fixed.usage,
            family: mean(priorities.comfort, priorities.space),
            preference: fixed.preference,
            reliability: mean(priorities.safety, priorities.reliability),
        }
    }

    #[inline]
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Budget => self.budget,
            Criterion::Usage => self.usage,
            Criterion::Family => self.family,
            Criterion::Preference => self.preference,
            Criterion::Reliability => self.reliability,
        }
    }

    pub fn total(&self) -> f64 {
        Criterion::ALL.iter().map(|&c| self.get(c)).sum()
    }
}

/// Weighted mean of the breakdown, clamped to [0, 1]
///
/// Falls back to the unweighted mean when every weight is zero.
pub fn aggregate(breakdown: &ScoreBreakdown, weights: &CriterionWeights) -> f64 {
    let total_weight = weights.total();

    let overall = if total_weight > 0.0 {
        breakdown
            .iter()
            .map(|(criterion, score)| weights.get(criterion) * score)
            .sum::<f64>()
            / total_weight
    } else {
        breakdown.iter().map(|(_, score)| score).sum::<f64>() / Criterion::ALL.len() as f64
    };

    clamp_unit(overall)
}
