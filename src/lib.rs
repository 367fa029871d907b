//! Car Match - profile-to-catalog matching engine for car recommendations
//!
//! This library takes a buyer profile collected by a questionnaire and a
//! catalog of vehicle listings, and produces a ranked, justified list of
//! recommendations. It implements a multi-stage pipeline: normalize, filter,
//! score, aggregate, rank, justify.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod models;

// Re-export commonly used types
pub use crate::config::Settings;
pub use crate::core::{EngineTables, MatchReport, Recommender, SCORING_VERSION};
pub use error::EngineError;
pub use models::{Criterion, Justification, RecommendationResult, ScoreBreakdown, UserProfile, VehicleListing};
