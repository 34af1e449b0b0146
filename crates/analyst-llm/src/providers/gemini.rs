//! Google Gemini provider implementation
//!
//! This module implements the TextGenerator trait for Google's Gemini models
//! via the `generateContent` REST endpoint.
//! See: https://ai.google.dev/api/generate-content
//!
//! # Examples
//!
//! ## Basic usage with environment variable
//!
//! ```no_run
//! use analyst_llm::{GenerationRequest, TextGenerator};
//! use analyst_llm::providers::GeminiProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create provider from GOOGLE_API_KEY environment variable
//!     let provider = GeminiProvider::from_env()?;
//!
//!     // Build request
//!     let request = GenerationRequest::builder("gemini-2.5-flash")
//!         .prompt("Write a one-line market summary.")
//!         .build();
//!
//!     // Generate
//!     let response = provider.generate(request).await?;
//!     println!("{}", response.text);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Custom configuration
//!
//! ```no_run
//! use analyst_llm::providers::{GeminiConfig, GeminiProvider};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GeminiConfig::new("AIza...")
//!     .with_api_base("https://generativelanguage.googleapis.com/v1beta")
//!     .with_timeout(120);
//!
//! let provider = GeminiProvider::with_config(config)?;
//! # Ok(())
//! # }
//! ```

use crate::{
    FinishReason, GenerationRequest, GenerationResponse, Result, TextGenerator, TokenUsage,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for Gemini provider
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the Gemini API
    /// (default: "https://generativelanguage.googleapis.com/v1beta")
    pub api_base: String,

    /// Request timeout in seconds (default: 120)
    ///
    /// Generation can block for tens of seconds on long reports; this is the
    /// transport-level ceiling on that wait.
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from environment variable
    ///
    /// Reads the API key from `GOOGLE_API_KEY`. Optionally reads the base URL
    /// from `GEMINI_API_BASE` if set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GOOGLE_API_KEY").map_err(|_| {
            crate::GenerationError::ConfigurationError(
                "GOOGLE_API_KEY environment variable not set".to_string(),
            )
        })?;

        let api_base = std::env::var("GEMINI_API_BASE")
            .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string());

        Ok(Self {
            api_key,
            api_base,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Set custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Gemini provider
///
/// Supports Gemini models including:
/// - gemini-2.5-flash
/// - gemini-2.5-flash-lite
/// - gemini-2.5-pro
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Create a new Gemini provider with custom configuration
    pub fn with_config(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a new Gemini provider with API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(GeminiConfig::new(api_key))
    }

    /// Create a provider from environment variable
    ///
    /// Reads the API key from the `GOOGLE_API_KEY` environment variable.
    /// Optionally reads the base URL from `GEMINI_API_BASE` if set.
    pub fn from_env() -> Result<Self> {
        let config = GeminiConfig::from_env()?;
        Self::with_config(config)
    }

    /// Get the current configuration
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        debug!("Sending request to Gemini API at {}", self.config.api_base);

        let gemini_request = build_gemini_request(&request);

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.config.api_base, request.model
            ))
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&gemini_request)
            .send()
            .await?;

        // Handle errors
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 | 403 => crate::GenerationError::AuthenticationFailed,
                429 => crate::GenerationError::RateLimitExceeded(error_text),
                400 => crate::GenerationError::InvalidRequest(error_text),
                404 => crate::GenerationError::ModelNotFound(request.model),
                _ => crate::GenerationError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        // Parse response
        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            crate::GenerationError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        parse_gemini_response(gemini_response)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

// ============================================================================
// Gemini-specific request types
// ============================================================================

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<usize>,
}

fn build_gemini_request(request: &GenerationRequest) -> GeminiRequest {
    let generation_config =
        if request.temperature.is_some() || request.max_output_tokens.is_some() {
            Some(GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            })
        } else {
            None
        };

    GeminiRequest {
        contents: vec![GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart {
                text: request.prompt.clone(),
            }],
        }],
        generation_config,
    }
}

// ============================================================================
// Gemini-specific response types
// ============================================================================

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "usageMetadata", default)]
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct GeminiUsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: usize,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: usize,
}

fn parse_gemini_response(response: GeminiResponse) -> Result<GenerationResponse> {
    let candidate = response.candidates.into_iter().next().ok_or_else(|| {
        crate::GenerationError::UnexpectedResponse("No candidates in response".to_string())
    })?;

    let finish_reason = map_finish_reason(candidate.finish_reason.as_deref());

    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(crate::GenerationError::UnexpectedResponse(format!(
            "Candidate contained no text (finish reason: {finish_reason:?})"
        )));
    }

    let usage = response.usage_metadata.unwrap_or_default();

    debug!(
        "Received response - finish_reason: {:?}, tokens: {}/{}",
        finish_reason, usage.prompt_token_count, usage.candidates_token_count
    );

    Ok(GenerationResponse {
        text,
        finish_reason,
        usage: TokenUsage {
            input_tokens: usage.prompt_token_count,
            output_tokens: usage.candidates_token_count,
        },
    })
}

fn map_finish_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        Some("STOP") | None => FinishReason::Stop,
        Some("MAX_TOKENS") => FinishReason::MaxTokens,
        Some("SAFETY") => FinishReason::Safety,
        Some(_) => FinishReason::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_with_generation_config() {
        let request = GenerationRequest::builder("gemini-2.5-flash")
            .prompt("hello")
            .temperature(0.5)
            .max_output_tokens(1024)
            .build();

        let gemini_request = build_gemini_request(&request);
        let json = serde_json::to_value(&gemini_request).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["generationConfig"]["temperature"], 0.5);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 1024);
    }

    #[test]
    fn test_build_request_omits_empty_generation_config() {
        let request = GenerationRequest::builder("gemini-2.5-flash-lite")
            .prompt("hello")
            .build();

        let gemini_request = build_gemini_request(&request);
        let json = serde_json::to_value(&gemini_request).unwrap();

        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn test_parse_response() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "# NVDA Report\n"}, {"text": "Looks strong."}]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 320,
                "candidatesTokenCount": 1800,
                "totalTokenCount": 2120
            }
        });

        let response: GeminiResponse = serde_json::from_value(raw).unwrap();
        let parsed = parse_gemini_response(response).unwrap();

        assert_eq!(parsed.text, "# NVDA Report\nLooks strong.");
        assert_eq!(parsed.finish_reason, FinishReason::Stop);
        assert_eq!(parsed.usage.input_tokens, 320);
        assert_eq!(parsed.usage.output_tokens, 1800);
    }

    #[test]
    fn test_parse_response_without_candidates() {
        let response: GeminiResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        let result = parse_gemini_response(response);
        assert!(matches!(
            result,
            Err(crate::GenerationError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn test_parse_response_with_empty_text() {
        let raw = serde_json::json!({
            "candidates": [{
                "finishReason": "SAFETY"
            }]
        });

        let response: GeminiResponse = serde_json::from_value(raw).unwrap();
        let result = parse_gemini_response(response);
        assert!(matches!(
            result,
            Err(crate::GenerationError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn test_map_finish_reason() {
        assert_eq!(map_finish_reason(Some("STOP")), FinishReason::Stop);
        assert_eq!(map_finish_reason(None), FinishReason::Stop);
        assert_eq!(map_finish_reason(Some("MAX_TOKENS")), FinishReason::MaxTokens);
        assert_eq!(map_finish_reason(Some("SAFETY")), FinishReason::Safety);
        assert_eq!(map_finish_reason(Some("RECITATION")), FinishReason::Other);
    }

    #[test]
    fn test_config_builders() {
        let config = GeminiConfig::new("test-key")
            .with_api_base("http://localhost:8080/v1beta")
            .with_timeout(30);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.api_base, "http://localhost:8080/v1beta");
        assert_eq!(config.timeout_secs, 30);
    }
}
