// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AgeValue, AnimalRecord, Attributes, Address, Compatibility, Dimension, Environment, Photo,
    ScoreBreakdown, ScoredRecord, ScoringWeights, Shelter, TraitQuery,
};
pub use requests::MatchRequest;
pub use responses::{CatalogResponse, DataSourceResponse, ErrorResponse, HealthResponse, RefreshResponse};
