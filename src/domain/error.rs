use std::io;

use thiserror::Error;

/// Library-wide error type for draftsmith operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Requested document type is outside the supported set.
    #[error(
        "Unknown document type '{0}': must be one of Announcement, Student Communication, Meeting Summary"
    )]
    UnknownDocumentType(String),

    /// A required request field is blank after trimming.
    #[error("Missing required field: {field}")]
    MissingRequiredField { field: &'static str },

    /// Refinement input is blank after trimming.
    #[error("Refinement input '{field}' must not be empty")]
    EmptyInput { field: &'static str },

    /// Refinement instruction is below the minimum length.
    #[error("Refinement instruction is too short: {actual} characters (minimum {min})")]
    InstructionTooShort { min: usize, actual: usize },

    /// The model returned no usable text.
    #[error("The generation service returned an empty response. Please try again.")]
    EmptyGenerationResult,

    /// Transport, authentication, quota, or payload failure from the generation service.
    #[error("Generation service error: {message}")]
    GenerationService {
        message: String,
        status: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Credential required to construct the generation client is absent.
    #[error("Credential not found: set the {0} environment variable")]
    MissingCredential(String),

    /// The request was refused by the prompt screening policy.
    #[error("Request refused: {0}")]
    PolicyViolation(String),

    /// The refined output failed validation.
    #[error("Refinement rejected: {0}")]
    RefinementRejected(String),

    /// Embedded template asset is missing from the binary.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Template rendering failed (including unbound placeholders).
    #[error("Failed to render template {template}: {reason}")]
    TemplateRender { template: String, reason: String },

    /// Export target format has no renderer.
    #[error("Export format '{0}' is not supported")]
    UnsupportedExportFormat(String),

    /// Ledger lookup outside the recorded range.
    #[error("No document at history position {index} (ledger holds {len})")]
    LedgerIndexOutOfRange { index: usize, len: usize },

    /// Configuration value is invalid.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    pub(crate) fn service<S: Into<String>>(message: S, status: Option<u16>) -> Self {
        AppError::GenerationService { message: message.into(), status, source: None }
    }

    /// Service failure caused by a lower-level error, kept as the `source`.
    pub(crate) fn service_caused_by<S, E>(message: S, status: Option<u16>, cause: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        AppError::GenerationService {
            message: message.into(),
            status,
            source: Some(Box::new(cause)),
        }
    }

    /// Whether the caller may reasonably resubmit the same request.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::EmptyGenerationResult => true,
            AppError::GenerationService { message, status, .. } => {
                is_transient_service_failure(message, *status)
            }
            _ => false,
        }
    }

    /// Provide an `io::ErrorKind`-like view for process exit handling.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::UnknownDocumentType(_)
            | AppError::MissingRequiredField { .. }
            | AppError::EmptyInput { .. }
            | AppError::InstructionTooShort { .. }
            | AppError::PolicyViolation(_)
            | AppError::UnsupportedExportFormat(_)
            | AppError::InvalidConfig(_)
            | AppError::TomlParse(_) => io::ErrorKind::InvalidInput,
            AppError::MissingCredential(_)
            | AppError::TemplateNotFound(_)
            | AppError::LedgerIndexOutOfRange { .. } => io::ErrorKind::NotFound,
            AppError::EmptyGenerationResult
            | AppError::RefinementRejected(_)
            | AppError::Serialization(_) => io::ErrorKind::InvalidData,
            AppError::GenerationService { .. } | AppError::TemplateRender { .. } => {
                io::ErrorKind::Other
            }
        }
    }
}

/// Transient upstream failure: throttling, timeouts, server errors, dropped connections.
pub(crate) fn is_transient_service_failure(message: &str, status: Option<u16>) -> bool {
    if status.is_some_and(|code| code == 429 || code == 408 || code >= 500) {
        return true;
    }

    let lower = message.to_ascii_lowercase();
    lower.contains("timeout")
        || lower.contains("timed out")
        || lower.contains("connect")
        || lower.contains("connection")
        || lower.contains("temporar")
}
