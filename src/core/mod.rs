// Core algorithm exports
pub mod error;
pub mod matcher;
pub mod query;
pub mod scoring;
pub mod similarity;
pub mod tables;

pub use error::MatchError;
pub use matcher::{Matcher, MatchResult, MATCH_TYPE};
pub use query::normalize_query;
pub use scoring::calculate_match_score;
pub use similarity::{HeuristicSimilarity, SimilarityStrategy};
pub use tables::{MatchThresholds, HEURISTIC_THRESHOLDS};
