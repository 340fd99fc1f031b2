//! Companion Matcher - fuzzy trait matching for adoptable shelter dogs
//!
//! This library scores shelter dog records against a sparse trait query
//! (breed, size, color, age, temperament, household fit, free text) and
//! ranks them. The HTTP service around it pulls the catalog from demo data,
//! RescueGroups.org or a local JSON file.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{normalize_query, MatchError, MatchResult, Matcher};
pub use models::{AnimalRecord, ScoreBreakdown, ScoredRecord, ScoringWeights, TraitQuery};
