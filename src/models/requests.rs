use crate::models::domain::TraitQuery;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to rank the catalog against a trait query
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    /// `None` when the key is missing or `null`
    #[serde(default)]
    pub traits: Option<TraitQuery>,
    /// Number of results to return; the configured default when absent
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<u16>,
}
