use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::listing::{ListingAttribute, VehicleListing};

/// The fixed set of scoring criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Criterion {
    Budget,
    Usage,
    Family,
    Preference,
    Reliability,
}

impl Criterion {
    pub const ALL: [Criterion; 5] = [
        Criterion::Budget,
        Criterion::Usage,
        Criterion::Family,
        Criterion::Preference,
        Criterion::Reliability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Budget => "budget",
            Criterion::Usage => "usage",
            Criterion::Family => "family",
            Criterion::Preference => "preference",
            Criterion::Reliability => "reliability",
        }
    }

    /// Short label used in summaries
    pub fn label(&self) -> &'static str {
        match self {
            Criterion::Budget => "budget fit",
            Criterion::Usage => "suitability for your usage",
            Criterion::Family => "room for your family",
            Criterion::Preference => "match with your brand and type preferences",
            Criterion::Reliability => "reliability and running costs",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-criterion sub-scores, each in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub budget: f64,
    pub usage: f64,
    pub family: f64,
    pub preference: f64,
    pub reliability: f64,
}

impl ScoreBreakdown {
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

    pub fn set(&mut self, criterion: Criterion, value: f64) {
        let slot = match criterion {
            Criterion::Budget => &mut self.budget,
            Criterion::Usage => &mut self.usage,
            Criterion::Family => &mut self.family,
            Criterion::Preference => &mut self.preference,
            Criterion::Reliability => &mut self.reliability,
        };
        *slot = value;
    }

    /// Sub-scores in criterion order
    pub fn iter(&self) -> impl Iterator<Item = (Criterion, f64)> + '_ {
        Criterion::ALL.iter().map(move |&c| (c, self.get(c)))
    }
}

/// Human-readable explanation of a recommendation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Justification {
    pub summary: String,
    #[serde(rename = "strongPoints")]
    pub strong_points: Vec<String>,
    pub considerations: Vec<String>,
}

/// Candidate scored against a profile, before and after ranking
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub listing: &'a VehicleListing,
    /// Position in the caller's catalog
    pub catalog_index: usize,
    pub breakdown: ScoreBreakdown,
    pub score: f64,
    /// 1-based, assigned by the ranker
    pub rank: usize,
    pub defaulted: Vec<ListingAttribute>,
}

/// One entry of the final recommendation list
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResult<'a> {
    pub listing: &'a VehicleListing,
    pub score: f64,
    pub rank: usize,
    pub breakdown: ScoreBreakdown,
    pub justification: Justification,
    #[serde(rename = "defaultedAttributes")]
    pub defaulted_attributes: Vec<ListingAttribute>,
}
