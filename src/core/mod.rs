// Core algorithm exports
pub mod aggregator;
pub mod filters;
pub mod justification;
pub mod normalizer;
pub mod ranker;
pub mod recommender;
pub mod scoring;
pub mod tables;

pub use aggregator::{aggregate, CriterionWeights};
pub use filters::{check_constraints, filter_candidates, Candidate, Exclusion};
pub use justification::justify;
pub use normalizer::normalize;
pub use ranker::rank;
pub use recommender::{MatchReport, Recommender, DEFAULT_TOP_N};
pub use scoring::{score_listing, CriterionScore};
pub use tables::{EngineTables, SCORING_VERSION};
