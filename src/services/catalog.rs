use crate::config::Settings;
use crate::models::domain::{lenient, non_empty, non_empty_age, string_or_list};
use crate::models::{AgeValue, AnimalRecord, Shelter};
use crate::services::demo::generate_demo_dogs;
use crate::services::rescue_groups::{is_configured, RescueGroupsClient, RescueGroupsError};
use chrono::{DateTime, Utc};
use moka::future::Cache;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;

const SNAPSHOT_KEY: &str = "catalog";

/// Errors that can occur while acquiring the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("RescueGroups error: {0}")]
    RescueGroups(#[from] RescueGroupsError),

    #[error("Failed to read fallback data {path}: {source}")]
    FallbackRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid fallback data: {0}")]
    FallbackParse(#[from] serde_json::Error),
}

/// Where catalog records come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Demo,
    RescueGroups,
    Fallback,
}

impl DataSource {
    /// Demo mode wins, then a usable RescueGroups key, then the local file
    pub fn select(demo_mode: bool, api_key: Option<&str>) -> Self {
        if demo_mode {
            DataSource::Demo
        } else if is_configured(api_key) {
            DataSource::RescueGroups
        } else {
            DataSource::Fallback
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Demo => "demo",
            DataSource::RescueGroups => "rescuegroups",
            DataSource::Fallback => "fallback",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DataSource::Demo => "Demo Mode - Generated realistic Atlanta shelter data",
            DataSource::RescueGroups => "RescueGroups.org API - Live data from rescue organizations",
            DataSource::Fallback => "Fallback Mode - Using local JSON data",
        }
    }

    pub fn has_real_api(&self) -> bool {
        matches!(self, DataSource::RescueGroups)
    }
}

/// One fetched catalog
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub records: Arc<Vec<AnimalRecord>>,
    pub fetched_at: DateTime<Utc>,
    /// Source the records actually came from
    pub source: DataSource,
}

/// Catalog acquisition with a TTL cache
///
/// The current snapshot lives in a moka cache and expires after the
/// configured TTL. The last successful snapshot is also kept outside the
/// cache so a failed refetch can keep serving it.
pub struct CatalogService {
    source: DataSource,
    demo_count: usize,
    fallback_path: PathBuf,
    rescue_groups: Option<RescueGroupsClient>,
    cache: Cache<&'static str, CatalogSnapshot>,
    last_good: RwLock<Option<CatalogSnapshot>>,
}

impl CatalogService {
    pub fn new(source: DataSource, demo_count: usize, fallback_path: PathBuf, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(ttl)
            .build();

        Self {
            source,
            demo_count,
            fallback_path,
            rescue_groups: None,
            cache,
            last_good: RwLock::new(None),
        }
    }

    pub fn with_rescue_groups(mut self, client: RescueGroupsClient) -> Self {
        self.rescue_groups = Some(client);
        self
    }

    /// Build the service for the configured data source
    pub fn from_settings(settings: &Settings) -> Result<Self, CatalogError> {
        let rg = &settings.rescue_groups;
        let source = DataSource::select(settings.catalog.demo_mode, rg.api_key.as_deref());

        let service = Self::new(
            source,
            settings.catalog.demo_count,
            settings.catalog.fallback_path.clone(),
            Duration::from_secs(settings.catalog.cache_ttl_secs),
        );

        match (source, &rg.api_key) {
            (DataSource::RescueGroups, Some(api_key)) => {
                let client = RescueGroupsClient::new(
                    rg.endpoint.clone(),
                    api_key.clone(),
                    rg.radius_miles,
                    rg.postal_code.clone(),
                    Duration::from_secs(rg.timeout_secs),
                )?;
                Ok(service.with_rescue_groups(client))
            }
            _ => Ok(service),
        }
    }

    /// Configured data source
    pub fn source(&self) -> DataSource {
        self.source
    }

    /// Current snapshot, fetching when the cache is empty or expired
    pub async fn records(&self) -> Result<CatalogSnapshot, CatalogError> {
        if let Some(snapshot) = self.cache.get(SNAPSHOT_KEY).await {
            tracing::debug!("Serving {} cached records", snapshot.records.len());
            return Ok(snapshot);
        }

        self.refresh().await
    }

    /// Fetch a new snapshot regardless of the cache
    pub async fn refresh(&self) -> Result<CatalogSnapshot, CatalogError> {
        match self.fetch().await {
            Ok(snapshot) => {
                tracing::info!(
                    "Fetched {} dogs from {}",
                    snapshot.records.len(),
                    snapshot.source.as_str()
                );
                self.cache.insert(SNAPSHOT_KEY, snapshot.clone()).await;
                *self.last_good.write().await = Some(snapshot.clone());
                Ok(snapshot)
            }
            Err(e) => match self.last_good.read().await.clone() {
                Some(stale) => {
                    tracing::warn!(
                        "Catalog fetch failed ({}), serving {} records from {}",
                        e,
                        stale.records.len(),
                        stale.fetched_at
                    );
                    Ok(stale)
                }
                None => Err(e),
            },
        }
    }

    /// Number of records in the last successful snapshot
    pub async fn cached_count(&self) -> usize {
        self.last_good
            .read()
            .await
            .as_ref()
            .map_or(0, |snapshot| snapshot.records.len())
    }

    /// Time of the last successful fetch
    pub async fn last_fetch(&self) -> Option<DateTime<Utc>> {
        self.last_good.read().await.as_ref().map(|snapshot| snapshot.fetched_at)
    }

    async fn fetch(&self) -> Result<CatalogSnapshot, CatalogError> {
        tracing::debug!("Using data source: {}", self.source.as_str());

        let (records, source) = match (self.source, &self.rescue_groups) {
            (DataSource::RescueGroups, Some(client)) => match client.fetch_available_dogs().await {
                Ok(dogs) => (dogs, DataSource::RescueGroups),
                Err(e) => {
                    tracing::warn!("RescueGroups API failed ({}), falling back to demo data", e);
                    (generate_demo_dogs(self.demo_count), DataSource::Demo)
                }
            },
            (DataSource::Fallback, _) => (load_fallback(&self.fallback_path).await?, DataSource::Fallback),
            _ => (generate_demo_dogs(self.demo_count), DataSource::Demo),
        };

        Ok(CatalogSnapshot {
            records: Arc::new(records),
            fetched_at: Utc::now(),
            source,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FallbackId {
    Number(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FallbackShelter {
    Name(String),
    Full(Shelter),
}

/// Entry of the local fallback file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FallbackDog {
    id: FallbackId,
    #[serde(default, deserialize_with = "non_empty")]
    name: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    breed: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    size: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    color: Option<String>,
    #[serde(default, deserialize_with = "non_empty_age")]
    age: Option<AgeValue>,
    #[serde(default, deserialize_with = "non_empty")]
    gender: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    temperament: Vec<String>,
    #[serde(default, deserialize_with = "non_empty")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    shelter: Option<FallbackShelter>,
}

impl FallbackDog {
    fn into_record<R: Rng + ?Sized>(self, rng: &mut R, now: DateTime<Utc>) -> AnimalRecord {
        let id = match self.id {
            FallbackId::Number(n) => n.to_string(),
            FallbackId::Text(s) => s,
        };

        let description = self.description.unwrap_or_else(|| {
            format!(
                "{} is a {} {} looking for a loving home.",
                self.name.as_deref().unwrap_or("This dog"),
                self.age.as_ref().map_or_else(|| "young".to_string(), |age| age.to_string()),
                self.breed.as_deref().unwrap_or("dog")
            )
        });

        let shelter = self.shelter.map(|shelter| match shelter {
            FallbackShelter::Name(name) => Shelter {
                id: "unknown".to_string(),
                name,
                ..Default::default()
            },
            FallbackShelter::Full(shelter) => shelter,
        });

        AnimalRecord {
            id,
            name: self.name,
            breed: self.breed,
            size: self.size,
            color: self.color,
            age: self.age,
            gender: self.gender,
            temperament: self.temperament,
            description: Some(description),
            adoption_fee: Some("Contact shelter for details".to_string()),
            published_at: Some(now),
            status_changed_at: Some(now),
            distance: Some(rng.random_range(2.0..17.0)),
            shelter,
            ..Default::default()
        }
    }
}

/// Parse the fallback JSON array into records
pub fn parse_fallback(json: &str) -> Result<Vec<AnimalRecord>, CatalogError> {
    let entries: Vec<FallbackDog> = serde_json::from_str(json)?;
    let mut rng = rand::rng();
    let now = Utc::now();

    Ok(entries
        .into_iter()
        .map(|entry| entry.into_record(&mut rng, now))
        .collect())
}

async fn load_fallback(path: &Path) -> Result<Vec<AnimalRecord>, CatalogError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::FallbackRead {
            path: path.to_path_buf(),
            source,
        })?;

    parse_fallback(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::rescue_groups::PLACEHOLDER_API_KEY;

    const FALLBACK_JSON: &str = r#"[
        { "id": 1, "name": "Rex", "breed": "Boxer", "age": "Adult", "temperament": "Friendly", "shelter": "Midtown Rescue" },
        { "id": "b-2", "name": "Mia", "breed": "Beagle", "description": "Loves snacks.",
          "shelter": { "id": "s1", "name": "PAWS Atlanta", "address": { "city": "Decatur" } } },
        { "id": 3, "name": "Ollie", "breed": "Poodle" }
    ]"#;

    fn write_fallback(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "companion-fallback-{}-{}.json",
            std::process::id(),
            rand::rng().random::<u32>()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn fallback_service(path: PathBuf) -> CatalogService {
        CatalogService::new(DataSource::Fallback, 10, path, Duration::from_secs(3600))
    }

    #[test]
    fn test_source_selection() {
        assert_eq!(DataSource::select(true, Some("key")), DataSource::Demo);
        assert_eq!(DataSource::select(false, Some("key")), DataSource::RescueGroups);
        assert_eq!(DataSource::select(false, Some(PLACEHOLDER_API_KEY)), DataSource::Fallback);
        assert_eq!(DataSource::select(false, None), DataSource::Fallback);

        assert!(DataSource::RescueGroups.has_real_api());
        assert!(!DataSource::Demo.has_real_api());
    }

    #[test]
    fn test_parse_fallback() {
        let dogs = parse_fallback(FALLBACK_JSON).unwrap();

        assert_eq!(dogs.len(), 3);
        assert_eq!(dogs[0].id, "1");
        assert_eq!(dogs[1].id, "b-2");

        assert_eq!(dogs[0].temperament, vec!["Friendly"]);
        assert_eq!(
            dogs[0].description.as_deref(),
            Some("Rex is a Adult Boxer looking for a loving home.")
        );
        assert_eq!(
            dogs[2].description.as_deref(),
            Some("Ollie is a young Poodle looking for a loving home.")
        );
        assert_eq!(dogs[1].description.as_deref(), Some("Loves snacks."));

        let named = dogs[0].shelter.as_ref().unwrap();
        assert_eq!(named.id, "unknown");
        assert_eq!(named.name, "Midtown Rescue");

        let full = dogs[1].shelter.as_ref().unwrap();
        assert_eq!(full.id, "s1");
        assert_eq!(full.address.city.as_deref(), Some("Decatur"));
    }

    #[test]
    fn test_parse_fallback_tolerates_bad_fields() {
        let dogs = parse_fallback(
            r#"[
                { "id": 1, "name": "Rex", "breed": "Boxer", "size": 3, "age": true, "shelter": 12 },
                { "id": 2, "name": "Mia", "temperament": [1, "Gentle"] }
            ]"#,
        )
        .unwrap();

        assert_eq!(dogs.len(), 2);
        assert_eq!(dogs[0].breed.as_deref(), Some("Boxer"));
        assert!(dogs[0].size.is_none());
        assert!(dogs[0].age.is_none());
        assert!(dogs[0].shelter.is_none());
        assert_eq!(dogs[1].temperament, vec!["Gentle"]);
    }

    #[test]
    fn test_parse_fallback_rejects_garbage() {
        assert!(matches!(
            parse_fallback(r#"{"dogs": []}"#),
            Err(CatalogError::FallbackParse(_))
        ));
    }

    #[tokio::test]
    async fn test_demo_catalog_is_cached() {
        let service = CatalogService::new(DataSource::Demo, 12, PathBuf::new(), Duration::from_secs(3600));

        let first = service.records().await.unwrap();
        let second = service.records().await.unwrap();

        assert_eq!(first.records.len(), 12);
        assert!(Arc::ptr_eq(&first.records, &second.records));
        assert_eq!(service.cached_count().await, 12);
        assert!(service.last_fetch().await.is_some());
    }

    #[tokio::test]
    async fn test_refresh_replaces_snapshot() {
        let service = CatalogService::new(DataSource::Demo, 5, PathBuf::new(), Duration::from_secs(3600));

        let first = service.records().await.unwrap();
        let refreshed = service.refresh().await.unwrap();

        assert!(!Arc::ptr_eq(&first.records, &refreshed.records));
        let current = service.records().await.unwrap();
        assert!(Arc::ptr_eq(&refreshed.records, &current.records));
    }

    #[tokio::test]
    async fn test_fallback_file_and_stale_snapshot() {
        let path = write_fallback(FALLBACK_JSON);
        let service = fallback_service(path.clone());

        let snapshot = service.records().await.unwrap();
        assert_eq!(snapshot.records.len(), 3);
        assert_eq!(snapshot.source, DataSource::Fallback);

        std::fs::remove_file(&path).unwrap();

        let stale = service.refresh().await.unwrap();
        assert!(Arc::ptr_eq(&snapshot.records, &stale.records));
    }

    #[tokio::test]
    async fn test_missing_fallback_without_snapshot_fails() {
        let service = fallback_service(PathBuf::from("/nonexistent/dogs.json"));

        let err = service.records().await.unwrap_err();
        assert!(matches!(err, CatalogError::FallbackRead { .. }));
        assert_eq!(service.cached_count().await, 0);
    }

    #[tokio::test]
    async fn test_rescue_groups_failure_falls_back_to_demo() {
        let mut server = mockito::Server::new_async().await;
        let _down = server
            .mock("POST", "/public/animals/search/available/dogs")
            .with_status(500)
            .create_async()
            .await;

        let client = RescueGroupsClient::new(
            server.url(),
            "key".to_string(),
            20,
            "30303".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        let service = CatalogService::new(DataSource::RescueGroups, 7, PathBuf::new(), Duration::from_secs(60))
            .with_rescue_groups(client);

        let snapshot = service.records().await.unwrap();

        assert_eq!(snapshot.records.len(), 7);
        assert_eq!(snapshot.source, DataSource::Demo);
        assert_eq!(service.source(), DataSource::RescueGroups);
    }
}
