use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::{
    aggregator::{aggregate, CriterionWeights},
    filters::filter_candidates,
    justification::justify,
    normalizer::normalize,
    ranker::rank,
    scoring::score_listing,
    tables::{EngineTables, SCORING_VERSION},
};
use crate::error::EngineError;
use crate::models::{RecommendationResult, ScoredCandidate, UserProfile, VehicleListing};

/// Default result size when the caller does not pick one
pub const DEFAULT_TOP_N: usize = 10;

/// Result of one matching run
#[derive(Debug)]
pub struct MatchReport<'a> {
    pub recommendations: Vec<RecommendationResult<'a>>,
    /// Listings in the catalog handed to the engine
    pub total_listings: usize,
    /// Listings that survived the hard constraints
    pub eligible_candidates: usize,
}

/// Matching and ranking engine
///
/// # Pipeline Stages
/// 1. Profile normalization
/// 2. Hard-constraint filtering
/// 3. Per-criterion scoring (parallel across candidates)
/// 4. Weighted aggregation
/// 5. Ranking and truncation
/// 6. Justification of the survivors
///
/// The engine holds only immutable tables, so a single instance can serve
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct Recommender {
    tables: Arc<EngineTables>,
    default_top_n: usize,
}

impl Recommender {
    /// Build an engine around validated scoring tables
    pub fn new(tables: EngineTables) -> Result<Self, EngineError> {
        tables.validate()?;
        Ok(Self {
            tables: Arc::new(tables),
            default_top_n: DEFAULT_TOP_N,
        })
    }

    pub fn with_default_tables() -> Self {
        Self {
            tables: Arc::new(EngineTables::default()),
            default_top_n: DEFAULT_TOP_N,
        }
    }

    /// Result size used by [`Recommender::recommend_default`]
    pub fn with_default_top_n(mut self, top_n: usize) -> Self {
        self.default_top_n = top_n;
        self
    }

    pub fn tables(&self) -> &EngineTables {
        &self.tables
    }

    /// Rank the catalog against a profile and return the best `top_n` listings
    ///
    /// An empty catalog, or one where nothing survives filtering, yields an
    /// empty list rather than an error.
    pub fn recommend<'a>(
        &self,
        profile: &UserProfile,
        catalog: &'a [VehicleListing],
        top_n: usize,
    ) -> Result<Vec<RecommendationResult<'a>>, EngineError> {
        self.run(profile, catalog, top_n).map(|report| report.recommendations)
    }

    /// [`Recommender::recommend`] with the configured default result size
    pub fn recommend_default<'a>(
        &self,
        profile: &UserProfile,
        catalog: &'a [VehicleListing],
    ) -> Result<Vec<RecommendationResult<'a>>, EngineError> {
        self.recommend(profile, catalog, self.default_top_n)
    }

    /// Full matching run with pipeline counts
    pub fn run<'a>(
        &self,
        profile: &UserProfile,
        catalog: &'a [VehicleListing],
        top_n: usize,
    ) -> Result<MatchReport<'a>, EngineError> {
        let tables = self.tables.as_ref();
        let profile = normalize(profile)?;
        let weights = CriterionWeights::from_priorities(&profile.priorities, &tables.weights);

        let candidates = filter_candidates(catalog, &profile, tables);
        let eligible_candidates = candidates.len();

        // Candidates are independent; ranking waits for the full set
        let scored: Vec<ScoredCandidate<'a>> = candidates
            .par_iter()
            .map(|candidate| {
                let (breakdown, defaulted) = score_listing(candidate.listing, &profile, tables);
                if !defaulted.is_empty() {
                    debug!(
                        listing_id = %candidate.listing.id,
                        attributes = ?defaulted,
                        "Missing listing attributes scored at worst tier"
                    );
                }
                ScoredCandidate {
                    listing: candidate.listing,
                    catalog_index: candidate.catalog_index,
                    score: aggregate(&breakdown, &weights),
                    breakdown,
                    rank: 0,
                    defaulted,
                }
            })
            .collect();

        let ranked = rank(scored, top_n, tables.ranking.tie_epsilon);

        let recommendations: Vec<RecommendationResult<'a>> = ranked
            .into_iter()
            .map(|candidate| RecommendationResult {
                listing: candidate.listing,
                score: candidate.score,
                rank: candidate.rank,
                justification: justify(&candidate.breakdown, &tables.justification),
                breakdown: candidate.breakdown,
                defaulted_attributes: candidate.defaulted,
            })
            .collect();

        info!(
            scoring_version = SCORING_VERSION,
            total_listings = catalog.len(),
            eligible_candidates,
            returned = recommendations.len(),
            "Recommendation run complete"
        );

        Ok(MatchReport {
            recommendations,
            total_listings: catalog.len(),
            eligible_candidates,
        })
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_tables()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AvailabilityTier, Budget, CostTier, FamilyProfile, Location, MarketIndicators, Preferences,
        Price, ReliabilityIndicators, Usage,
    };
    use std::collections::BTreeMap;

    fn create_listing(id: &str, category: &str, price: f64, seats: u8) -> VehicleListing {
        VehicleListing {
            id: id.to_string(),
            brand: "Hyundai".to_string(),
            model: format!("Model {}", id),
            year: Some(2022),
            price: Price::Fixed(price),
            category: category.to_string(),
            fuel_type: Some("flex".to_string()),
            transmission: Some("automatic".to_string()),
            seating_capacity: Some(seats),
            cargo_volume_liters: None,
            easy_access: None,
            reliability: ReliabilityIndicators {
                maintenance_cost: Some(CostTier::Medium),
                recall_count: Some(1),
                parts_availability: Some(AvailabilityTier::Moderate),
            },
            market: MarketIndicators::default(),
            available: true,
            regions: vec![],
        }
    }

    fn create_profile() -> UserProfile {
        UserProfile {
            budget: Budget { min: 50_000.0, max: 80_000.0 },
            location: Location::default(),
            usage: Usage {
                main_purpose: "familia".to_string(),
                frequency: "diario".to_string(),
            },
            family: FamilyProfile { size: 4, has_children: true, has_elderly: false },
            priorities: BTreeMap::new(),
            preferences: Preferences::default(),
        }
    }

    #[test]
    fn test_recommend_basic() {
        let recommender = Recommender::with_default_tables();
        let catalog = vec![
            create_listing("1", "suv", 65_000.0, 5),
            create_listing("2", "suv", 200_000.0, 5), // Over budget band
            create_listing("3", "sedan", 70_000.0, 5),
        ];

        let report = recommender.run(&create_profile(), &catalog, 10).unwrap();

        assert_eq!(report.total_listings, 3);
        assert_eq!(report.eligible_candidates, 2);
        assert_eq!(report.recommendations.len(), 2);
        assert_eq!(report.recommendations[0].listing.id, "1");
        assert_eq!(report.recommendations[0].rank, 1);
        assert_eq!(report.recommendations[1].rank, 2);
    }

    #[test]
    fn test_respects_top_n() {
        let recommender = Recommender::with_default_tables();
        let catalog: Vec<VehicleListing> = (0..20)
            .map(|i| create_listing(&i.to_string(), "suv", 55_000.0 + i as f64 * 1_000.0, 5))
            .collect();

        let results = recommender.recommend(&create_profile(), &catalog, 5).unwrap();

        assert_eq!(results.len(), 5);
    }

    #[test]
    fn test_recommend_default_uses_configured_size() {
        let recommender = Recommender::with_default_tables().with_default_top_n(3);
        let catalog: Vec<VehicleListing> = (0..8)
            .map(|i| create_listing(&i.to_string(), "suv", 60_000.0, 5))
            .collect();

        let results = recommender.recommend_default(&create_profile(), &catalog).unwrap();

        assert_eq!(results.len(), 3);
        // Identical listings fall back to catalog order
        let ids: Vec<&str> = results.iter().map(|r| r.listing.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_invalid_profile_is_an_error() {
        let recommender = Recommender::with_default_tables();
        let mut profile = create_profile();
        profile.budget = Budget { min: 90_000.0, max: 10_000.0 };

        let result = recommender.recommend(&profile, &[], 10);

        assert!(matches!(result, Err(EngineError::Validation { .. })));
    }

    #[test]
    fn test_new_rejects_invalid_tables() {
        let mut tables = EngineTables::default();
        tables.weights.preference = -1.0;

        assert!(Recommender::new(tables).is_err());
    }
}
