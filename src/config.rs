//! Configuration management for the `ItinerAI` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::ItinerAiError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `ItinerAI` application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ItinerAiConfig {
    /// Destination enrichment configuration
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
    /// Language model configuration
    #[serde(default)]
    pub model: ModelConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Destination enrichment (encyclopedia summary) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Base URL of the REST summary API
    #[serde(default = "default_enrichment_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_enrichment_timeout")]
    pub timeout_seconds: u32,
    /// User agent sent with summary requests
    #[serde(default = "default_enrichment_user_agent")]
    pub user_agent: String,
}

/// Language model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model identifier resolved against the Hugging Face Hub
    #[serde(default = "default_model_id")]
    pub model_id: String,
    /// Model revision (branch, tag, or commit)
    #[serde(default = "default_model_revision")]
    pub revision: String,
    /// Optional Hub access token for gated models
    #[serde(default)]
    pub hf_token: Option<String>,
    /// Force CPU execution even when an accelerator is available
    #[serde(default)]
    pub cpu: bool,
    /// Maximum prompt tokens; longer prompts are truncated at encode time
    #[serde(default = "default_max_input_tokens")]
    pub max_input_tokens: usize,
    /// Maximum tokens generated after the prompt
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: usize,
    /// Sampling temperature; unset means greedy decoding
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Nucleus sampling cutoff; unset disables top-p filtering
    #[serde(default)]
    pub top_p: Option<f64>,
    /// Sampling seed
    #[serde(default = "default_seed")]
    pub seed: u64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_enrichment_base_url() -> String {
    "https://en.wikipedia.org/api/rest_v1".to_string()
}

fn default_enrichment_timeout() -> u32 {
    10
}

fn default_enrichment_user_agent() -> String {
    format!("ItinerAI/{}", env!("CARGO_PKG_VERSION"))
}

fn default_model_id() -> String {
    "unsloth/Llama-3.2-1B".to_string()
}

fn default_model_revision() -> String {
    "main".to_string()
}

fn default_max_input_tokens() -> usize {
    1024
}

fn default_max_new_tokens() -> usize {
    512
}

fn default_seed() -> u64 {
    42
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            base_url: default_enrichment_base_url(),
            timeout_seconds: default_enrichment_timeout(),
            user_agent: default_enrichment_user_agent(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            revision: default_model_revision(),
            hf_token: None,
            cpu: false,
            max_input_tokens: default_max_input_tokens(),
            max_new_tokens: default_max_new_tokens(),
            temperature: None,
            top_p: None,
            seed: default_seed(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ItinerAiConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with ITINERAI_ prefix
        builder = builder.add_source(
            Environment::with_prefix("ITINERAI")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: ItinerAiConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("itinerai").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.enrichment.timeout_seconds == 0 || self.enrichment.timeout_seconds > 300 {
            return Err(ItinerAiError::config(
                "Enrichment timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.model.max_input_tokens == 0 || self.model.max_input_tokens > 32768 {
            return Err(ItinerAiError::config(
                "Maximum input tokens must be between 1 and 32768",
            )
            .into());
        }

        if self.model.max_new_tokens == 0 || self.model.max_new_tokens > 8192 {
            return Err(ItinerAiError::config(
                "Maximum new tokens must be between 1 and 8192",
            )
            .into());
        }

        if let Some(temperature) = self.model.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ItinerAiError::config(format!(
                    "Sampling temperature must be between 0.0 and 2.0, got: {temperature}"
                ))
                .into());
            }
        }

        if let Some(top_p) = self.model.top_p {
            if !(0.0..=1.0).contains(&top_p) {
                return Err(ItinerAiError::config(format!(
                    "Top-p must be between 0.0 and 1.0, got: {top_p}"
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ItinerAiError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ItinerAiError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.enrichment.base_url.starts_with("http://")
            && !self.enrichment.base_url.starts_with("https://")
        {
            return Err(ItinerAiError::config(
                "Enrichment base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.model.model_id.trim().is_empty() {
            return Err(ItinerAiError::config("Model identifier cannot be empty").into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ItinerAiConfig::default();
        assert_eq!(
            config.enrichment.base_url,
            "https://en.wikipedia.org/api/rest_v1"
        );
        assert_eq!(config.enrichment.timeout_seconds, 10);
        assert_eq!(config.model.model_id, "unsloth/Llama-3.2-1B");
        assert_eq!(config.model.max_input_tokens, 1024);
        assert_eq!(config.model.max_new_tokens, 512);
        assert!(config.model.temperature.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ItinerAiConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = ItinerAiConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = ItinerAiConfig::default();
        config.enrichment.timeout_seconds = 500; // Invalid - too high
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout"));

        let mut config = ItinerAiConfig::default();
        config.model.max_new_tokens = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_temperature_range() {
        let mut config = ItinerAiConfig::default();
        config.model.temperature = Some(0.7);
        assert!(config.validate().is_ok());

        config.model.temperature = Some(3.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_base_url() {
        let mut config = ItinerAiConfig::default();
        config.enrichment.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_path_generation() {
        let path = ItinerAiConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("itinerai"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
