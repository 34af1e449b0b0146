//! Configuration for report generation

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default generation model (the lighter variant)
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// Configuration for report generation
///
/// Read once at process start and treated as immutable for the process
/// lifetime; every request shares the same value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default generation model identifier
    pub default_model: String,

    /// Request timeout for the market-data calls
    pub request_timeout: Duration,

    /// Sampling temperature forwarded to the generation service, when set
    pub temperature: Option<f32>,

    /// Output token ceiling forwarded to the generation service, when set
    pub max_output_tokens: Option<usize>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_model: DEFAULT_MODEL.to_string(),
            request_timeout: Duration::from_secs(30),
            temperature: None,
            max_output_tokens: None,
        }
    }
}

impl ReportConfig {
    /// Create a new configuration builder
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.default_model.trim().is_empty() {
            return Err(ReportError::ConfigError(
                "default_model must not be empty".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(ReportError::ConfigError(
                "request_timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for ReportConfig
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    default_model: Option<String>,
    request_timeout: Option<Duration>,
    temperature: Option<f32>,
    max_output_tokens: Option<usize>,
}

impl ReportConfigBuilder {
    /// Set the default generation model
    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    /// Set the market-data request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the output token ceiling
    pub fn max_output_tokens(mut self, max_output_tokens: usize) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Build the configuration, falling back to defaults for unset fields
    pub fn build(self) -> ReportConfig {
        let defaults = ReportConfig::default();
        ReportConfig {
            default_model: self.default_model.unwrap_or(defaults.default_model),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.default_model, DEFAULT_MODEL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ReportConfig::builder()
            .default_model("gemini-2.5-flash")
            .request_timeout(Duration::from_secs(10))
            .temperature(0.2)
            .max_output_tokens(4096)
            .build();

        assert_eq!(config.default_model, "gemini-2.5-flash");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.max_output_tokens, Some(4096));
    }

    #[test]
    fn test_validate_rejects_empty_model() {
        let config = ReportConfig::builder().default_model("  ").build();
        assert!(matches!(
            config.validate(),
            Err(ReportError::ConfigError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ReportConfig::builder()
            .request_timeout(Duration::ZERO)
            .build();
        assert!(matches!(
            config.validate(),
            Err(ReportError::ConfigError(_))
        ));
    }
}
