//! Immutable scoring tables injected into the engine at construction.
//!
//! Every constant the scorers, filter, aggregator and justifier rely on lives
//! here so it can be loaded from configuration and versioned independently of
//! the scoring code.

use serde::Deserialize;
use std::collections::HashMap;

use crate::error::EngineError;
use crate::models::{AvailabilityTier, CostTier, MainPurpose};

/// Bumped whenever a default table or scoring rule changes meaning
pub const SCORING_VERSION: &str = "1";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineTables {
    #[serde(default)]
    pub budget: BudgetPolicy,
    #[serde(default)]
    pub family: FamilyPolicy,
    #[serde(default)]
    pub usage: UsageMatrix,
    #[serde(default)]
    pub preference: PreferencePolicy,
    #[serde(default)]
    pub reliability: ReliabilityTables,
    #[serde(default)]
    pub weights: AggregationWeights,
    #[serde(default)]
    pub justification: JustificationPolicy,
    #[serde(default)]
    pub ranking: RankingPolicy,
    #[serde(default)]
    pub filter: FilterPolicy,
}

impl Default for EngineTables {
    fn default() -> Self {
        Self {
            budget: BudgetPolicy::default(),
            family: FamilyPolicy::default(),
            usage: UsageMatrix::default(),
            preference: PreferencePolicy::default(),
            reliability: ReliabilityTables::default(),
            weights: AggregationWeights::default(),
            justification: JustificationPolicy::default(),
            ranking: RankingPolicy::default(),
            filter: FilterPolicy::default(),
        }
    }
}

impl EngineTables {
    /// Check every table value against its domain
    pub fn validate(&self) -> Result<(), EngineError> {
        non_negative("budget.tolerance", self.budget.tolerance)?;
        if self.budget.tolerance >= 1.0 {
            return Err(EngineError::InvalidTables(format!(
                "budget.tolerance must be below 1.0, got {}",
                self.budget.tolerance
            )));
        }

        non_negative("family.penalty_per_seat", self.family.penalty_per_seat)?;
        unit("family.elderly_access_bonus", self.family.elderly_access_bonus)?;

        unit("usage.neutral", self.usage.neutral)?;
        for (purpose, row) in &self.usage.entries {
            for (category, &value) in row {
                unit(&format!("usage.entries.{}.{}", purpose, category), value)?;
            }
        }

        unit("preference.full_match", self.preference.full_match)?;
        unit("preference.partial_match", self.preference.partial_match)?;
        unit("preference.no_signal", self.preference.no_signal)?;
        unit("preference.mismatch", self.preference.mismatch)?;

        let tiers = &self.reliability;
        for (name, value) in [
            ("reliability.maintenance.low", tiers.maintenance.low),
            ("reliability.maintenance.medium", tiers.maintenance.medium),
            ("reliability.maintenance.high", tiers.maintenance.high),
            ("reliability.parts.wide", tiers.parts.wide),
            ("reliability.parts.moderate", tiers.parts.moderate),
            ("reliability.parts.scarce", tiers.parts.scarce),
            ("reliability.recalls.beyond", tiers.recalls.beyond),
        ] {
            unit(name, value)?;
        }
        for step in &tiers.recalls.steps {
            unit("reliability.recalls.steps", step.score)?;
        }

        non_negative("weights.usage", self.weights.usage)?;
        non_negative("weights.preference", self.weights.preference)?;

        unit("justification.strong_threshold", self.justification.strong_threshold)?;
        unit("justification.caution_threshold", self.justification.caution_threshold)?;
        if self.justification.caution_threshold >= self.justification.strong_threshold {
            return Err(EngineError::InvalidTables(
                "justification.caution_threshold must be below strong_threshold".to_string(),
            ));
        }

        if !(self.ranking.tie_epsilon > 0.0 && self.ranking.tie_epsilon.is_finite()) {
            return Err(EngineError::InvalidTables(format!(
                "ranking.tie_epsilon must be positive, got {}",
                self.ranking.tie_epsilon
            )));
        }

        Ok(())
    }
}

fn non_negative(name: &str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidTables(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )))
    }
}

fn unit(name: &str, value: f64) -> Result<(), EngineError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::InvalidTables(format!(
            "{} must lie in [0, 1], got {}",
            name, value
        )))
    }
}

/// Tolerance band around the stated budget
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BudgetPolicy {
    #[serde(default = "default_budget_tolerance")]
    pub tolerance: f64,
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self { tolerance: default_budget_tolerance() }
    }
}

impl BudgetPolicy {
    /// Inclusive price band `[min × (1 − tol), max × (1 + tol)]`
    #[inline]
    pub fn band(&self, min: f64, max: f64) -> (f64, f64) {
        (min * (1.0 - self.tolerance), max * (1.0 + self.tolerance))
    }
}

fn default_budget_tolerance() -> f64 { 0.15 }

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FamilyPolicy {
    /// Families larger than this are hard-filtered on seating
    #[serde(default = "default_hard_seating_threshold")]
    pub hard_seating_threshold: u32,
    #[serde(default = "default_penalty_per_seat")]
    pub penalty_per_seat: f64,
    #[serde(default = "default_elderly_access_bonus")]
    pub elderly_access_bonus: f64,
}

impl Default for FamilyPolicy {
    fn default() -> Self {
        Self {
            hard_seating_threshold: default_hard_seating_threshold(),
            penalty_per_seat: default_penalty_per_seat(),
            elderly_access_bonus: default_elderly_access_bonus(),
        }
    }
}

fn default_hard_seating_threshold() -> u32 { 4 }
fn default_penalty_per_seat() -> f64 { 0.25 }
fn default_elderly_access_bonus() -> f64 { 0.05 }

/// Purpose × category compatibility
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UsageMatrix {
    /// Score for combinations absent from the matrix
    #[serde(default = "default_usage_neutral")]
    pub neutral: f64,
    #[serde(default = "default_usage_entries")]
    pub entries: HashMap<MainPurpose, HashMap<String, f64>>,
}

impl Default for UsageMatrix {
    fn default() -> Self {
        Self {
            neutral: default_usage_neutral(),
            entries: default_usage_entries(),
        }
    }
}

impl UsageMatrix {
    /// Lookup by purpose and lowercase category
    pub fn lookup(&self, purpose: MainPurpose, category: &str) -> Option<f64> {
        self.entries
            .get(&purpose)
            .and_then(|row| row.get(category))
            .copied()
    }
}

fn default_usage_neutral() -> f64 { 0.5 }

fn default_usage_entries() -> HashMap<MainPurpose, HashMap<String, f64>> {
    let rows: [(MainPurpose, &[(&str, f64)]); 6] = [
        (
            MainPurpose::Family,
            &[
                ("suv", 0.9),
                ("minivan", 1.0),
                ("wagon", 0.8),
                ("sedan", 0.7),
                ("crossover", 0.85),
                ("pickup", 0.5),
                ("hatch", 0.5),
                ("coupe", 0.2),
                ("convertible", 0.2),
                ("sports", 0.2),
            ],
        ),
        (
            MainPurpose::Work,
            &[
                ("pickup", 1.0),
                ("van", 1.0),
                ("suv", 0.7),
                ("wagon", 0.7),
                ("sedan", 0.6),
                ("hatch", 0.6),
                ("sports", 0.2),
                ("convertible", 0.2),
            ],
        ),
        (
            MainPurpose::Urban,
            &[
                ("hatch", 1.0),
                ("sedan", 0.8),
                ("crossover", 0.8),
                ("suv", 0.6),
                ("minivan", 0.4),
                ("pickup", 0.3),
                ("van", 0.3),
            ],
        ),
        (
            MainPurpose::Leisure,
            &[
                ("convertible", 1.0),
                ("sports", 0.9),
                ("coupe", 0.9),
                ("suv", 0.7),
                ("crossover", 0.7),
                ("sedan", 0.6),
                ("van", 0.3),
            ],
        ),
        (
            MainPurpose::Travel,
            &[
                ("sedan", 0.9),
                ("suv", 0.9),
                ("wagon", 0.9),
                ("minivan", 0.8),
                ("crossover", 0.8),
                ("hatch", 0.5),
                ("sports", 0.4),
            ],
        ),
        (
            MainPurpose::Adventure,
            &[
                ("pickup", 1.0),
                ("suv", 0.95),
                ("crossover", 0.6),
                ("wagon", 0.4),
                ("sedan", 0.2),
                ("hatch", 0.2),
                ("sports", 0.1),
                ("convertible", 0.1),
            ],
        ),
    ];

    rows.iter()
        .map(|(purpose, row)| {
            let row = row
                .iter()
                .map(|(category, value)| (category.to_string(), *value))
                .collect();
            (*purpose, row)
        })
        .collect()
}

/// Scores for the preference-fit outcomes
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PreferencePolicy {
    #[serde(default = "default_full_match")]
    pub full_match: f64,
    #[serde(default = "default_partial_match")]
    pub partial_match: f64,
    #[serde(default = "default_no_signal")]
    pub no_signal: f64,
    #[serde(default)]
    pub mismatch: f64,
}

impl Default for PreferencePolicy {
    fn default() -> Self {
        Self {
            full_match: default_full_match(),
            partial_match: default_partial_match(),
            no_signal: default_no_signal(),
            mismatch: 0.0,
        }
    }
}

fn default_full_match() -> f64 { 1.0 }
fn default_partial_match() -> f64 { 0.6 }
fn default_no_signal() -> f64 { 0.3 }

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReliabilityTables {
    #[serde(default)]
    pub maintenance: MaintenanceTiers,
    #[serde(default)]
    pub recalls: RecallSteps,
    #[serde(default)]
    pub parts: PartsTiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MaintenanceTiers {
    #[serde(default = "default_tier_best")]
    pub low: f64,
    #[serde(default = "default_tier_middle")]
    pub medium: f64,
    #[serde(default = "default_tier_worst")]
    pub high: f64,
}

impl Default for MaintenanceTiers {
    fn default() -> Self {
        Self {
            low: default_tier_best(),
            medium: default_tier_middle(),
            high: default_tier_worst(),
        }
    }
}

impl MaintenanceTiers {
    #[inline]
    pub fn score(&self, tier: CostTier) -> f64 {
        match tier {
            CostTier::Low => self.low,
            CostTier::Medium => self.medium,
            CostTier::High => self.high,
        }
    }

    #[inline]
    pub fn worst(&self) -> f64 {
        self.score(CostTier::High)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PartsTiers {
    #[serde(default = "default_tier_best")]
    pub wide: f64,
    #[serde(default = "default_tier_middle")]
    pub moderate: f64,
    #[serde(default = "default_tier_worst")]
    pub scarce: f64,
}

impl Default for PartsTiers {
    fn default() -> Self {
        Self {
            wide: default_tier_best(),
            moderate: default_tier_middle(),
            scarce: default_tier_worst(),
        }
    }
}

impl PartsTiers {
    #[inline]
    pub fn score(&self, tier: AvailabilityTier) -> f64 {
        match tier {
            AvailabilityTier::Wide => self.wide,
            AvailabilityTier::Moderate => self.moderate,
            AvailabilityTier::Scarce => self.scarce,
        }
    }

    #[inline]
    pub fn worst(&self) -> f64 {
        self.score(AvailabilityTier::Scarce)
    }
}

fn default_tier_best() -> f64 { 1.0 }
fn default_tier_middle() -> f64 { 0.6 }
fn default_tier_worst() -> f64 { 0.2 }

/// Step table from recall count to score; counts past the last step get `beyond`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecallSteps {
    #[serde(default = "default_recall_steps")]
    pub steps: Vec<RecallStep>,
    #[serde(default = "default_tier_worst")]
    pub beyond: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RecallStep {
    pub max_count: u32,
    pub score: f64,
}

impl Default for RecallSteps {
    fn default() -> Self {
        Self {
            steps: default_recall_steps(),
            beyond: default_tier_worst(),
        }
    }
}

impl RecallSteps {
    pub fn score(&self, count: u32) -> f64 {
        self.steps
            .iter()
            .filter(|step| count <= step.max_count)
            .min_by_key(|step| step.max_count)
            .map(|step| step.score)
            .unwrap_or(self.beyond)
    }

    #[inline]
    pub fn worst(&self) -> f64 {
        self.steps
            .iter()
            .map(|step| step.score)
            .fold(self.beyond, f64::min)
    }
}

fn default_recall_steps() -> Vec<RecallStep> {
    vec![
        RecallStep { max_count: 0, score: 1.0 },
        RecallStep { max_count: 1, score: 0.8 },
        RecallStep { max_count: 3, score: 0.5 },
    ]
}

/// Fixed weights for criteria that are not user-adjustable
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AggregationWeights {
    #[serde(default = "default_usage_weight")]
    pub usage: f64,
    #[serde(default = "default_preference_weight")]
    pub preference: f64,
}

impl Default for AggregationWeights {
    fn default() -> Self {
        Self {
            usage: default_usage_weight(),
            preference: default_preference_weight(),
        }
    }
}

fn default_usage_weight() -> f64 { 1.0 }
fn default_preference_weight() -> f64 { 0.5 }

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct JustificationPolicy {
    #[serde(default = "default_strong_threshold")]
    pub strong_threshold: f64,
    #[serde(default = "default_caution_threshold")]
    pub caution_threshold: f64,
}

impl Default for JustificationPolicy {
    fn default() -> Self {
        Self {
            strong_threshold: default_strong_threshold(),
            caution_threshold: default_caution_threshold(),
        }
    }
}

fn default_strong_threshold() -> f64 { 0.75 }
fn default_caution_threshold() -> f64 { 0.4 }

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RankingPolicy {
    /// Overall scores closer than this are ranked as ties
    #[serde(default = "default_tie_epsilon")]
    pub tie_epsilon: f64,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self { tie_epsilon: default_tie_epsilon() }
    }
}

fn default_tie_epsilon() -> f64 { 1e-6 }

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct FilterPolicy {
    /// Require the profile's state in the listing's region list
    #[serde(default)]
    pub enforce_regions: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_are_valid() {
        assert!(EngineTables::default().validate().is_ok());
    }

    #[test]
    fn test_default_constants() {
        let tables = EngineTables::default();
        assert_eq!(tables.budget.tolerance, 0.15);
        assert_eq!(tables.family.penalty_per_seat, 0.25);
        assert_eq!(tables.weights.usage, 1.0);
        assert_eq!(tables.weights.preference, 0.5);
        assert_eq!(tables.usage.lookup(MainPurpose::Family, "suv"), Some(0.9));
        assert_eq!(tables.usage.lookup(MainPurpose::Family, "sports"), Some(0.2));
        assert_eq!(tables.usage.lookup(MainPurpose::Family, "hovercraft"), None);
    }

    #[test]
    fn test_recall_steps() {
        let recalls = RecallSteps::default();
        assert_eq!(recalls.score(0), 1.0);
        assert_eq!(recalls.score(1), 0.8);
        assert_eq!(recalls.score(2), 0.5);
        assert_eq!(recalls.score(3), 0.5);
        assert_eq!(recalls.score(12), 0.2);
        assert_eq!(recalls.worst(), 0.2);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let mut tables = EngineTables::default();
        tables.preference.no_signal = 1.5;
        assert!(matches!(tables.validate(), Err(EngineError::InvalidTables(_))));

        let mut tables = EngineTables::default();
        tables.budget.tolerance = -0.1;
        assert!(tables.validate().is_err());

        let mut tables = EngineTables::default();
        tables.justification.caution_threshold = 0.9;
        assert!(tables.validate().is_err());
    }
}
