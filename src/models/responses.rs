use crate::models::domain::AnimalRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub data_source: String,
    #[serde(rename = "hasRealAPI")]
    pub has_real_api: bool,
    pub cached_dogs: usize,
    pub last_fetch: Option<DateTime<Utc>>,
}

/// Data source description
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceResponse {
    pub source: String,
    pub description: String,
    pub configured: bool,
    #[serde(rename = "hasRealAPI")]
    pub has_real_api: bool,
    pub cached: usize,
    pub last_fetch: Option<DateTime<Utc>>,
}

/// Current catalog contents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub dogs: Vec<AnimalRecord>,
    pub count: usize,
    pub source: String,
    pub last_fetch: Option<DateTime<Utc>>,
}

/// Catalog refresh response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub count: usize,
    pub source: String,
    pub message: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
