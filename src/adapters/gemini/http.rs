//! Gemini API client implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, HeaderValue, RETRY_AFTER};
use url::Url;

use crate::domain::{AppError, GenerationConfig, SamplingConfig};
use crate::ports::{GenerationResult, TextGenerator};

use super::types::{GenerateContentRequest, GenerateContentResponse};

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

const X_GOOG_API_KEY: &str = "x-goog-api-key";
const DEFAULT_STATUS_MESSAGE: &str = "Generation request failed";

/// HTTP transport for the Gemini `generateContent` endpoint.
///
/// This client performs a single request per call. Retry behavior is implemented
/// by [`super::RetryingGenerator`].
#[derive(Clone)]
pub struct HttpGeminiClient {
    api_key: String,
    endpoint: Url,
    engine_tag: String,
    client: Client,
}

impl std::fmt::Debug for HttpGeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGeminiClient")
            .field("endpoint", &self.endpoint)
            .field("engine_tag", &self.engine_tag)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpGeminiClient {
    /// Create a new HTTP client with the given API key and configuration.
    pub fn new(api_key: String, config: &GenerationConfig) -> Result<Self, AppError> {
        if api_key.trim().is_empty() {
            return Err(AppError::MissingCredential(API_KEY_ENV.to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::service(format!("Failed to create HTTP client: {}", e), None))?;

        Ok(Self {
            api_key,
            endpoint: config.endpoint()?,
            engine_tag: config.engine_tag.clone(),
            client,
        })
    }

    /// Create from the `GOOGLE_API_KEY` environment variable.
    pub fn from_env_with_config(config: &GenerationConfig) -> Result<Self, AppError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AppError::MissingCredential(API_KEY_ENV.to_string()))?;

        Self::new(api_key, config)
    }

    fn send_request(&self, request: &GenerateContentRequest<'_>) -> GenerationResult {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(X_GOOG_API_KEY, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        let retry_after_ms = response.headers().get(RETRY_AFTER).and_then(parse_retry_after_ms);
        let body_text = response.text().unwrap_or_default();

        if status.is_success() {
            let api_response: GenerateContentResponse = serde_json::from_str(&body_text)
                .map_err(|e| {
                    AppError::service_caused_by(
                        format!("Failed to parse response: {}", e),
                        Some(status.as_u16()),
                        e,
                    )
                })?;

            let text = api_response.text();
            if text.trim().is_empty() {
                if let Some(reason) = api_response.block_reason() {
                    return Err(AppError::service(
                        format!("Prompt blocked by the generation service ({})", reason),
                        Some(status.as_u16()),
                    ));
                }
                return Err(AppError::EmptyGenerationResult);
            }
            return Ok(text);
        }

        let mut message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.clone()
            } else if status.as_u16() == 429 {
                "Rate limited".to_string()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        if let Some(value) = retry_after_ms {
            message.push_str(&format!(" (retry_after_ms={})", value));
        }

        Err(AppError::service(message, Some(status.as_u16())))
    }
}

fn transport_error(error: reqwest::Error) -> AppError {
    let summary = if error.is_timeout() {
        "HTTP request timed out"
    } else if error.is_connect() {
        "HTTP connection failed"
    } else {
        "HTTP request failed"
    };
    AppError::service_caused_by(format!("{}: {}", summary, error), None, error)
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

fn parse_retry_after_ms(value: &HeaderValue) -> Option<u64> {
    let raw = value.to_str().ok()?.trim();
    let seconds = raw.parse::<u64>().ok()?;
    Some(seconds.saturating_mul(1000))
}

impl TextGenerator for HttpGeminiClient {
    fn generate(&self, prompt: &str, sampling: &SamplingConfig) -> GenerationResult {
        tracing::debug!(
            endpoint = %self.endpoint,
            prompt_chars = prompt.len(),
            "sending generation request"
        );
        self.send_request(&GenerateContentRequest::new(prompt, sampling))
    }

    fn engine_tag(&self) -> &str {
        &self.engine_tag
    }
}
