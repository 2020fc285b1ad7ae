//! Forecast engine configuration

use crate::error::{ForecastError, Result};
use crate::models::ModelKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Smallest history the models can index safely.
pub const MIN_HISTORY_POINTS: usize = 30;

/// Horizons offered by the dashboard timeframe selector.
pub const HORIZON_PRESETS: [usize; 3] = [7, 14, 30];

/// Label for a horizon selector button
pub fn horizon_label(days: usize) -> String {
    format!("{} Days", days)
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Histories shorter than this are rejected as insufficient.
    #[serde(default = "default_min_history_points")]
    pub min_history_points: usize,

    /// Days of history callers should fetch before forecasting.
    #[serde(default = "default_historical_days")]
    pub historical_days: u32,

    /// Model used when a request does not name one.
    #[serde(default)]
    pub default_model: ModelKind,

    /// Horizon used when a request does not name one.
    #[serde(default = "default_horizon")]
    pub default_horizon: usize,

    /// Seed for the jitter source. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_min_history_points() -> usize {
    MIN_HISTORY_POINTS
}

fn default_historical_days() -> u32 {
    90
}

fn default_horizon() -> usize {
    HORIZON_PRESETS[0]
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            min_history_points: default_min_history_points(),
            historical_days: default_historical_days(),
            default_model: ModelKind::default(),
            default_horizon: default_horizon(),
            seed: None,
        }
    }
}

impl ForecastConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_history_points < MIN_HISTORY_POINTS {
            return Err(ForecastError::ConfigError(format!(
                "min_history_points must be at least {}, got {}",
                MIN_HISTORY_POINTS, self.min_history_points
            )));
        }

        if self.default_horizon == 0 {
            return Err(ForecastError::ConfigError(
                "default_horizon must be greater than zero".to_string(),
            ));
        }

        if (self.historical_days as usize) < self.min_history_points {
            return Err(ForecastError::ConfigError(format!(
                "historical_days ({}) cannot be less than min_history_points ({})",
                self.historical_days, self.min_history_points
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ForecastConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_history_points, 30);
        assert_eq!(config.historical_days, 90);
        assert_eq!(config.default_horizon, 7);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ForecastConfig::from_json_str(r#"{"default_model": "prophet"}"#).unwrap();
        assert_eq!(config.default_model, ModelKind::TrendSeasonality);
        assert_eq!(config.historical_days, 90);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_rejects_lowered_minimum() {
        let err = ForecastConfig::from_json_str(r#"{"min_history_points": 10}"#).unwrap_err();
        assert!(matches!(err, ForecastError::ConfigError(_)));
    }

    #[test]
    fn test_horizon_labels() {
        let labels: Vec<String> = HORIZON_PRESETS.iter().map(|&d| horizon_label(d)).collect();
        assert_eq!(labels, vec!["7 Days", "14 Days", "30 Days"]);
    }
}
