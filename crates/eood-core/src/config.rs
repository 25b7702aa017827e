//! Classifier thresholds and analysis configuration.

use std::path::{Path, PathBuf};

use eood_map::AliasConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a finite, non-negative number (got {value})")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("id_score must be a finite number above zero (got {value})")]
    InvalidIdScore { value: f64 },

    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Thresholds for the KPI and spike rules plus the in-distribution score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Relative KPI deviation above which a record is flagged (default: 0.5).
    pub deviation_threshold: f64,
    /// Z-score above which a record is flagged as a spike (default: 3.0).
    pub spike_threshold: f64,
    /// Placeholder score for in-distribution records (default: 0.05).
    pub id_score: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            deviation_threshold: 0.5,
            spike_threshold: 3.0,
            id_score: 0.05,
        }
    }
}

impl ClassifierConfig {
    #[must_use]
    pub fn with_deviation_threshold(mut self, value: f64) -> Self {
        self.deviation_threshold = value;
        self
    }

    #[must_use]
    pub fn with_spike_threshold(mut self, value: f64) -> Self {
        self.spike_threshold = value;
        self
    }

    /// Rejects negative or non-finite thresholds and a zero `id_score`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_threshold("deviation_threshold", self.deviation_threshold)?;
        check_threshold("spike_threshold", self.spike_threshold)?;
        if self.id_score.is_finite() && self.id_score > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidIdScore {
                value: self.id_score,
            })
        }
    }
}

fn check_threshold(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}

/// Everything an analysis session needs: thresholds and column aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub classifier: ClassifierConfig,
    pub aliases: AliasConfig,
}

/// Loads an [`AnalysisConfig`] from a JSON file; absent fields keep defaults.
pub fn load_config(path: &Path) -> Result<AnalysisConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: AnalysisConfig =
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    config.classifier.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_canonical() {
        let config = ClassifierConfig::default();
        assert_eq!(config.deviation_threshold, 0.5);
        assert_eq!(config.spike_threshold, 3.0);
        assert_eq!(config.id_score, 0.05);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_negative_and_nan_thresholds() {
        let negative = ClassifierConfig::default().with_deviation_threshold(-0.1);
        assert!(matches!(
            negative.validate(),
            Err(ConfigError::InvalidThreshold {
                name: "deviation_threshold",
                ..
            })
        ));
        let nan = ClassifierConfig::default().with_spike_threshold(f64::NAN);
        assert!(nan.validate().is_err());
    }

    #[test]
    fn id_score_must_stay_above_zero() {
        let zero = ClassifierConfig {
            id_score: 0.0,
            ..ClassifierConfig::default()
        };
        assert!(matches!(
            zero.validate(),
            Err(ConfigError::InvalidIdScore { value }) if value == 0.0
        ));
        let tiny = ClassifierConfig {
            id_score: 0.001,
            ..ClassifierConfig::default()
        };
        assert!(tiny.validate().is_ok());
    }
}
