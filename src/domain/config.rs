//! Application configuration domain models.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;
use crate::domain::document::DEFAULT_LANGUAGE;

/// Upper bound on transport retries; more would burn through the external quota.
pub const MAX_RETRIES_LIMIT: u32 = 1;

/// Configuration loaded from `draftsmith.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub document: DocumentConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.generation.validate()?;
        self.sampling.validate()?;
        self.document.validate()?;
        Ok(())
    }
}

/// Generation service endpoint and transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Base URL of the generative language API.
    #[serde(default = "default_api_base")]
    pub api_base: Url,
    /// Model identifier appended to the base URL.
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Retries after the first attempt on transient transport failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay before a retry in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Engine tag recorded in document metadata.
    #[serde(default = "default_engine_tag")]
    pub engine_tag: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            engine_tag: default_engine_tag(),
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.model.trim().is_empty() {
            return Err(AppError::InvalidConfig("model must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        if self.max_retries > MAX_RETRIES_LIMIT {
            return Err(AppError::InvalidConfig(format!(
                "max_retries must be at most {}",
                MAX_RETRIES_LIMIT
            )));
        }
        if self.retry_delay_ms == 0 {
            return Err(AppError::InvalidConfig(
                "retry_delay_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Full `generateContent` endpoint for the configured model.
    pub fn endpoint(&self) -> Result<Url, AppError> {
        let base = self.api_base.as_str().trim_end_matches('/');
        Url::parse(&format!("{}/models/{}:generateContent", base, self.model.trim()))
            .map_err(|e| AppError::InvalidConfig(format!("invalid generation endpoint: {}", e)))
    }
}

fn default_api_base() -> Url {
    Url::parse("https://generativelanguage.googleapis.com/v1beta")
        .expect("Default API base URL must be valid")
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    1
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_engine_tag() -> String {
    "Gemini".to_string()
}

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplingConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

impl SamplingConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::InvalidConfig(
                "temperature must be between 0.0 and 2.0".to_string(),
            ));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(AppError::InvalidConfig("top_p must be in (0, 1]".to_string()));
        }
        if self.top_k == 0 {
            return Err(AppError::InvalidConfig("top_k must be greater than 0".to_string()));
        }
        if self.max_output_tokens == 0 {
            return Err(AppError::InvalidConfig(
                "max_output_tokens must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.95
}

fn default_top_k() -> u32 {
    40
}

fn default_max_output_tokens() -> u32 {
    2048
}

/// Institutional identity and document defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentConfig {
    /// Short institution name used in export titles and file names.
    #[serde(default = "default_institution")]
    pub institution: String,
    /// Full institution name used in the assistant identity preamble.
    #[serde(default = "default_institution_name")]
    pub institution_name: String,
    #[serde(default = "default_language")]
    pub default_language: String,
    /// Number of prior versions embedded in refinement prompts.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            institution: default_institution(),
            institution_name: default_institution_name(),
            default_language: default_language(),
            history_window: default_history_window(),
        }
    }
}

impl DocumentConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.institution.trim().is_empty() || self.institution_name.trim().is_empty() {
            return Err(AppError::InvalidConfig("institution must not be empty".to_string()));
        }
        if self.default_language.trim().is_empty() {
            return Err(AppError::InvalidConfig("default_language must not be empty".to_string()));
        }
        Ok(())
    }
}

fn default_institution() -> String {
    "TUM".to_string()
}

fn default_institution_name() -> String {
    "Technical University of Munich".to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_history_window() -> usize {
    3
}

/// Typing-emulation settings for interactive output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    #[serde(default = "default_chunk_chars")]
    pub chunk_chars: usize,
    #[serde(default = "default_chunk_delay_ms")]
    pub chunk_delay_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { chunk_chars: default_chunk_chars(), chunk_delay_ms: default_chunk_delay_ms() }
    }
}

fn default_chunk_chars() -> usize {
    50
}

fn default_chunk_delay_ms() -> u64 {
    15
}
