use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    pub max_entries: Option<u64>,
    pub ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    pub default_min_score: Option<u8>,
    pub default_limit: Option<u16>,
    pub max_limit: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_age_range_weight")]
    pub age_range: f64,
    #[serde(default = "default_nanny_type_weight")]
    pub nanny_type: f64,
    #[serde(default = "default_activities_weight")]
    pub activities: f64,
    #[serde(default = "default_contract_regime_weight")]
    pub contract_regime: f64,
    #[serde(default = "default_availability_weight")]
    pub availability: f64,
    #[serde(default = "default_children_count_weight")]
    pub children_count: f64,
    #[serde(default = "default_seal_weight")]
    pub seal: f64,
    #[serde(default = "default_reviews_weight")]
    pub reviews: f64,
    #[serde(default = "default_distance_bonus_weight")]
    pub distance_bonus: f64,
    #[serde(default = "default_budget_bonus_weight")]
    pub budget_bonus: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            age_range: default_age_range_weight(),
            nanny_type: default_nanny_type_weight(),
            activities: default_activities_weight(),
            contract_regime: default_contract_regime_weight(),
            availability: default_availability_weight(),
            children_count: default_children_count_weight(),
            seal: default_seal_weight(),
            reviews: default_reviews_weight(),
            distance_bonus: default_distance_bonus_weight(),
            budget_bonus: default_budget_bonus_weight(),
        }
    }
}

fn default_age_range_weight() -> f64 { 20.0 }
fn default_nanny_type_weight() -> f64 { 10.0 }
fn default_activities_weight() -> f64 { 10.0 }
fn default_contract_regime_weight() -> f64 { 10.0 }
fn default_availability_weight() -> f64 { 20.0 }
fn default_children_count_weight() -> f64 { 10.0 }
fn default_seal_weight() -> f64 { 5.0 }
fn default_reviews_weight() -> f64 { 5.0 }
fn default_distance_bonus_weight() -> f64 { 5.0 }
fn default_budget_bonus_weight() -> f64 { 5.0 }

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        // Negative weights would break the 0-100 normalization
        Self {
            age_range: config.age_range.max(0.0),
            nanny_type: config.nanny_type.max(0.0),
            activities: config.activities.max(0.0),
            contract_regime: config.contract_regime.max(0.0),
            availability: config.availability.max(0.0),
            children_count: config.children_count.max(0.0),
            seal: config.seal.max(0.0),
            reviews: config.reviews.max(0.0),
            distance_bonus: config.distance_bonus.max(0.0),
            budget_bonus: config.budget_bonus.max(0.0),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with NANNY_MATCH__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., NANNY_MATCH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("NANNY_MATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}
