// Model exports
pub mod listing;
pub mod profile;
pub mod recommendation;

pub use listing::{AvailabilityTier, CostTier, ListingAttribute, MarketIndicators, Price, ReliabilityIndicators, VehicleListing};
pub use profile::{Budget, FamilyProfile, Location, MainPurpose, NormalizedProfile, Preferences, Priorities, Usage, UsageFrequency, UserProfile};
pub use recommendation::{Criterion, Justification, RecommendationResult, ScoreBreakdown, ScoredCandidate};
