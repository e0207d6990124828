use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::weights::Weights;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub predictive: PredictiveSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

/// Weight table as loaded from config. Defaults match the fixed production
/// table; `Settings::load` validates the sum invariant before the table is
/// used.
#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_engagement_weight")]
    pub engagement: f64,
    #[serde(default = "default_niche_weight")]
    pub niche: f64,
    #[serde(default = "default_price_weight")]
    pub price: f64,
    #[serde(default = "default_location_weight")]
    pub location: f64,
    #[serde(default = "default_campaign_type_weight")]
    pub campaign_type: f64,
    #[serde(default = "default_reliability_weight")]
    pub reliability: f64,
    #[serde(default = "default_availability_weight")]
    pub availability: f64,
    #[serde(default = "default_predicted_roi_weight")]
    pub predicted_roi: f64,
    #[serde(default = "default_track_record_weight")]
    pub track_record: f64,
    #[serde(default = "default_insight_weight")]
    pub insight: f64,
    #[serde(default = "default_intent_weight")]
    pub intent: f64,
    #[serde(default = "default_personalization_weight")]
    pub personalization: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            engagement: default_engagement_weight(),
            niche: default_niche_weight(),
            price: default_price_weight(),
            location: default_location_weight(),
            campaign_type: default_campaign_type_weight(),
            reliability: default_reliability_weight(),
            availability: default_availability_weight(),
            predicted_roi: default_predicted_roi_weight(),
            track_record: default_track_record_weight(),
            insight: default_insight_weight(),
            intent: default_intent_weight(),
            personalization: default_personalization_weight(),
        }
    }
}

impl From<WeightsConfig> for Weights {
    fn from(cfg: WeightsConfig) -> Self {
        Weights {
            engagement: cfg.engagement,
            niche: cfg.niche,
            price: cfg.price,
            location: cfg.location,
            campaign_type: cfg.campaign_type,
            reliability: cfg.reliability,
            availability: cfg.availability,
            predicted_roi: cfg.predicted_roi,
            track_record: cfg.track_record,
            insight: cfg.insight,
            intent: cfg.intent,
            personalization: cfg.personalization,
        }
    }
}

fn default_engagement_weight() -> f64 { 0.11 }
fn default_niche_weight() -> f64 { 0.11 }
fn default_price_weight() -> f64 { 0.11 }
fn default_location_weight() -> f64 { 0.08 }
fn default_campaign_type_weight() -> f64 { 0.08 }
fn default_reliability_weight() -> f64 { 0.08 }
fn default_availability_weight() -> f64 { 0.08 }
fn default_predicted_roi_weight() -> f64 { 0.07 }
fn default_track_record_weight() -> f64 { 0.07 }
fn default_insight_weight() -> f64 { 0.07 }
fn default_intent_weight() -> f64 { 0.07 }
fn default_personalization_weight() -> f64 { 0.07 }

#[derive(Debug, Clone, Deserialize)]
pub struct PredictiveSettings {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for PredictiveSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize, Default)]
pub struct NotificationSettings {
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
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
    /// Load configuration from files and environment variables.
    ///
    /// Later sources override earlier ones:
    /// 1. Defaults baked into the structs
    /// 2. config/default.toml, then config/local.toml
    /// 3. Environment variables prefixed CREATOR_MATCH__
    ///    (e.g. CREATOR_MATCH__SERVER__PORT -> server.port)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("CREATOR_MATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CREATOR_MATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Enforce the weight-sum invariant at load time rather than trusting
    /// call sites.
    fn validate(&self) -> Result<(), ConfigError> {
        let weights: Weights = self.scoring.weights.clone().into();
        weights
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_match_fixed_table() {
        let weights: Weights = WeightsConfig::default().into();
        assert_eq!(weights.engagement, 0.11);
        assert_eq!(weights.niche, 0.11);
        assert_eq!(weights.price, 0.11);
        assert_eq!(weights.location, 0.08);
        assert_eq!(weights.campaign_type, 0.08);
        assert_eq!(weights.reliability, 0.08);
        assert_eq!(weights.availability, 0.08);
        assert_eq!(weights.predicted_roi, 0.07);
        assert_eq!(weights.track_record, 0.07);
        assert_eq!(weights.insight, 0.07);
        assert_eq!(weights.intent, 0.07);
        assert_eq!(weights.personalization, 0.07);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_default_settings_validate() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.logging.level, "info");
    }
}
