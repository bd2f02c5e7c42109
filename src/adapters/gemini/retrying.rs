//! Bounded retry wrapper around a generation client.

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::domain::config::MAX_RETRIES_LIMIT;
use crate::domain::error::is_transient_service_failure;
use crate::domain::{AppError, GenerationConfig, SamplingConfig};
use crate::ports::{GenerationResult, TextGenerator};

const DEFAULT_MAX_DELAY_MS: u64 = 10_000;
const RETRY_AFTER_TOKEN: &str = "retry_after_ms=";
const MAX_LOG_ERROR_CHARS: usize = 512;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            max_attempts: 1 + config.max_retries.min(MAX_RETRIES_LIMIT),
            base_delay_ms: config.retry_delay_ms.max(1),
            max_delay_ms: DEFAULT_MAX_DELAY_MS.max(config.retry_delay_ms),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    fn delay_for_retry(&self, error: &AppError) -> Duration {
        if let Some(retry_after_ms) = extract_retry_after_ms(error) {
            return Duration::from_millis(retry_after_ms.min(self.max_delay_ms));
        }

        let backoff_ms = self.base_delay_ms.min(self.max_delay_ms);
        let jitter_ms = compute_jitter_ms(backoff_ms);
        Duration::from_millis(backoff_ms.saturating_add(jitter_ms).min(self.max_delay_ms))
    }
}

/// Resubmits a prompt once when the service fails transiently.
///
/// Empty completions are never resubmitted.
pub struct RetryingGenerator {
    inner: Box<dyn TextGenerator>,
    policy: RetryPolicy,
}

impl RetryingGenerator {
    pub fn new(inner: Box<dyn TextGenerator>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl TextGenerator for RetryingGenerator {
    fn generate(&self, prompt: &str, sampling: &SamplingConfig) -> GenerationResult {
        let mut attempt = 1;
        loop {
            match self.inner.generate(prompt, sampling) {
                Ok(text) => return Ok(text),
                Err(error) => {
                    if !should_retry(&error) || attempt >= self.policy.max_attempts {
                        return Err(error);
                    }

                    let delay = self.policy.delay_for_retry(&error);
                    tracing::warn!(
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %format_error_for_log(&error),
                        "generation failed, retrying"
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
            }
        }
    }

    fn engine_tag(&self) -> &str {
        self.inner.engine_tag()
    }
}

fn should_retry(error: &AppError) -> bool {
    match error {
        AppError::GenerationService { message, status, .. } => {
            is_transient_service_failure(message, *status)
        }
        _ => false,
    }
}

fn extract_retry_after_ms(error: &AppError) -> Option<u64> {
    let message = match error {
        AppError::GenerationService { message, .. } => message,
        _ => return None,
    };

    let start = message.find(RETRY_AFTER_TOKEN)? + RETRY_AFTER_TOKEN.len();
    let digits: String =
        message[start..].chars().take_while(|ch| ch.is_ascii_digit()).collect();
    digits.parse::<u64>().ok()
}

fn compute_jitter_ms(backoff_ms: u64) -> u64 {
    let jitter_cap = backoff_ms / 4;
    if jitter_cap == 0 {
        return 0;
    }

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.subsec_nanos() as u64)
        .unwrap_or(0);

    nanos % jitter_cap
}

fn format_error_for_log(error: &AppError) -> String {
    match error {
        AppError::GenerationService { message, status, .. } => {
            let sanitized = sanitize_and_truncate_for_log(message);
            match status {
                Some(code) => format!("GenerationService(status={}): {}", code, sanitized),
                None => format!("GenerationService: {}", sanitized),
            }
        }
        _ => sanitize_and_truncate_for_log(&error.to_string()),
    }
}

fn sanitize_and_truncate_for_log(input: &str) -> String {
    let truncated: String = input
        .chars()
        .take(MAX_LOG_ERROR_CHARS)
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect();

    let mut compact = truncated.split_whitespace().collect::<Vec<_>>().join(" ");
    if input.chars().count() > MAX_LOG_ERROR_CHARS {
        compact.push_str(" [truncated]");
    }
    compact
}
