use crate::models::ScoringWeights;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub catalog: CatalogSettings,
    pub rescue_groups: RescueGroupsSettings,
    pub matching: MatchingSettings,
    pub scoring: ScoringSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            workers: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub demo_mode: bool,
    pub demo_count: usize,
    pub fallback_path: PathBuf,
    pub cache_ttl_secs: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            demo_mode: false,
            demo_count: 60,
            fallback_path: PathBuf::from("data/dogs.json"),
            cache_ttl_secs: 3600,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RescueGroupsSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub radius_miles: u32,
    pub postal_code: String,
    pub timeout_secs: u64,
}

impl Default for RescueGroupsSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.rescuegroups.org/v5".to_string(),
            api_key: None,
            radius_miles: 20,
            postal_code: "30303".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatchingSettings {
    pub result_limit: usize,
    pub max_limit: usize,
    pub include_breakdown: bool,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            result_limit: 20,
            max_limit: 100,
            include_breakdown: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_breed_weight")]
    pub breed: f64,
    #[serde(default = "default_size_weight")]
    pub size: f64,
    #[serde(default = "default_color_weight")]
    pub color: f64,
    #[serde(default = "default_age_weight")]
    pub age: f64,
    #[serde(default = "default_gender_weight")]
    pub gender: f64,
    #[serde(default = "default_coat_weight")]
    pub coat: f64,
    #[serde(default = "default_temperament_weight")]
    pub temperament: f64,
    #[serde(default = "default_environment_weight")]
    pub environment: f64,
    #[serde(default = "default_special_weight")]
    pub special: f64,
    #[serde(default = "default_text_search_weight")]
    pub text_search: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            breed: default_breed_weight(),
            size: default_size_weight(),
            color: default_color_weight(),
            age: default_age_weight(),
            gender: default_gender_weight(),
            coat: default_coat_weight(),
            temperament: default_temperament_weight(),
            environment: default_environment_weight(),
            special: default_special_weight(),
            text_search: default_text_search_weight(),
        }
    }
}

fn default_breed_weight() -> f64 { 25.0 }
fn default_size_weight() -> f64 { 15.0 }
fn default_color_weight() -> f64 { 10.0 }
fn default_age_weight() -> f64 { 12.0 }
fn default_gender_weight() -> f64 { 8.0 }
fn default_coat_weight() -> f64 { 8.0 }
fn default_temperament_weight() -> f64 { 12.0 }
fn default_environment_weight() -> f64 { 10.0 }
fn default_special_weight() -> f64 { 5.0 }
fn default_text_search_weight() -> f64 { 15.0 }

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            breed: config.breed,
            size: config.size,
            color: config.color,
            age: config.age,
            gender: config.gender,
            coat: config.coat,
            temperament: config.temperament,
            environment: config.environment,
            special: config.special,
            text_search: config.text_search,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration files (config/default, config/local)
    /// 3. Environment variables (prefixed with COMPANION__)
    /// 4. Unprefixed variables from existing `.env` files (PORT, DEMO_MODE, ...)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., COMPANION__SERVER__PORT -> server.port
            .add_source(prefixed_env())
            .build()?;

        let settings = apply_legacy_env(settings, |key| std::env::var(key).ok())?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(prefixed_env())
            .build()?;

        settings.try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

fn prefixed_env() -> Environment {
    Environment::with_prefix("COMPANION")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Map unprefixed legacy variables onto their config keys
///
/// `PORT`, `DEMO_MODE`, `RESCUEGROUPS_API_KEY` and `SEARCH_RADIUS_MILES`
/// win over files and prefixed variables. Unparseable numbers are ignored.
fn apply_legacy_env<F>(settings: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = Config::builder().add_source(settings);

    if let Some(port) = lookup("PORT").and_then(|v| v.trim().parse::<u16>().ok()) {
        builder = builder.set_override("server.port", i64::from(port))?;
    }
    if let Some(demo) = lookup("DEMO_MODE") {
        builder = builder.set_override("catalog.demo_mode", demo.trim() == "true")?;
    }
    if let Some(api_key) = lookup("RESCUEGROUPS_API_KEY") {
        builder = builder.set_override("rescue_groups.api_key", api_key)?;
    }
    if let Some(miles) = lookup("SEARCH_RADIUS_MILES").and_then(|v| v.trim().parse::<u32>().ok()) {
        builder = builder.set_override("rescue_groups.radius_miles", i64::from(miles))?;
    }

    builder.build()
}
