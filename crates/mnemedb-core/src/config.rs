//! `MnemeDB` Configuration Module
//!
//! Provides configuration file support via `mnemedb.toml`, environment
//! variables, and runtime overrides.
//!
//! # Priority (highest to lowest)
//!
//! 1. Runtime overrides (API)
//! 2. Environment variables (`MNEMEDB_*`, sections separated by `__`)
//! 3. Configuration file (`mnemedb.toml`)
//! 4. Default values

use crate::lifecycle::LifecycleConfig;
use crate::scoring::ScoringConfig;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },
}

/// Retrieval configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Default number of results per query.
    pub top_k: usize,
    /// Score above which the caller forwards results to the shared context.
    pub broadcast_threshold: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            broadcast_threshold: 0.8,
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace.
    pub level: String,
    /// Log format: text or json.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Main `MnemeDB` configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MnemeConfig {
    /// Scoring configuration.
    pub scoring: ScoringConfig,
    /// Lifecycle configuration.
    pub lifecycle: LifecycleConfig,
    /// Retrieval configuration.
    pub retrieval: RetrievalConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl MnemeConfig {
    /// Loads configuration from default sources.
    ///
    /// Priority: defaults < file < environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("mnemedb.toml")
    }

    /// Loads configuration from a specific file path.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("MNEMEDB_").split("__").lowercase(false));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Creates a configuration from a TOML string.
    ///
    /// # Arguments
    ///
    /// * `toml_str` - TOML configuration string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// All range checks run here, at load time — an out-of-range weight or
    /// threshold never survives to first use.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate scoring config
        for (key, value) in [
            ("scoring.similarity_weight", self.scoring.similarity_weight),
            ("scoring.recency_weight", self.scoring.recency_weight),
            ("scoring.importance_weight", self.scoring.importance_weight),
            ("scoring.recency_lambda", self.scoring.recency_lambda),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("value {value} must be finite and non-negative"),
                });
            }
        }

        // Validate lifecycle config
        if !self.lifecycle.decay_rate.is_finite() || self.lifecycle.decay_rate < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "lifecycle.decay_rate".to_string(),
                message: format!(
                    "value {} must be finite and non-negative",
                    self.lifecycle.decay_rate
                ),
            });
        }

        for (key, value) in [
            ("lifecycle.archive_threshold", self.lifecycle.archive_threshold),
            ("lifecycle.consolidation_bump", self.lifecycle.consolidation_bump),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("value {value} is out of range [0, 1]"),
                });
            }
        }

        // Validate retrieval config
        if self.retrieval.top_k == 0 || self.retrieval.top_k > 10_000 {
            return Err(ConfigError::InvalidValue {
                key: "retrieval.top_k".to_string(),
                message: format!("value {} is out of range [1, 10000]", self.retrieval.top_k),
            });
        }

        if !self.retrieval.broadcast_threshold.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "retrieval.broadcast_threshold".to_string(),
                message: format!(
                    "value {} must be finite",
                    self.retrieval.broadcast_threshold
                ),
            });
        }

        // Validate logging level
        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        // Validate logging format
        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.format".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.format, valid_formats
                ),
            });
        }

        Ok(())
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
