//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together context creation
//! and command execution.

use crate::adapters::gemini::{API_KEY_ENV, HttpGeminiClient, RetryPolicy, RetryingGenerator};
use crate::adapters::{EmbeddedTemplateStore, PlainTextExporter};
use crate::app::{AppContext, commands};
use crate::domain::{AppConfig, DocumentRequest, FinalPrompt, SamplingConfig, Session};
use crate::ports::{ExportFormat, GenerationResult, TextGenerator};

pub use crate::app::commands::{ExportedFile, SessionSettings};
pub use crate::app::config::load_config;
pub use crate::domain::AppError;

/// Context wired to the Gemini service and the embedded templates.
pub type GeminiContext = AppContext<RetryingGenerator, EmbeddedTemplateStore>;

/// Build a connected context. Fails when the API credential is absent.
pub fn connect(config: AppConfig) -> Result<GeminiContext, AppError> {
    let client = HttpGeminiClient::from_env_with_config(&config.generation)?;
    let generator =
        RetryingGenerator::new(Box::new(client), RetryPolicy::from_config(&config.generation));
    Ok(AppContext::new(generator, EmbeddedTemplateStore::new(), config))
}

/// Stand-in generator for operations that never reach the model.
struct OfflineGenerator;

impl TextGenerator for OfflineGenerator {
    fn generate(&self, _prompt: &str, _sampling: &SamplingConfig) -> GenerationResult {
        Err(AppError::MissingCredential(API_KEY_ENV.to_string()))
    }

    fn engine_tag(&self) -> &str {
        "offline"
    }
}

/// Bind a request into its template without contacting the model.
pub fn preview_prompt(
    config: AppConfig,
    request: &DocumentRequest,
) -> Result<FinalPrompt, AppError> {
    let ctx = AppContext::new(OfflineGenerator, EmbeddedTemplateStore::new(), config);
    commands::preview_prompt(&ctx, request)
}

/// Parse an export format name, accepting only formats that render to a file.
pub fn renderable_format(name: &str) -> Result<ExportFormat, AppError> {
    let format: ExportFormat = name.parse()?;
    if !PlainTextExporter::renders(format) {
        return Err(AppError::UnsupportedExportFormat(format.to_string()));
    }
    Ok(format)
}

/// Export a session entry with the plain-text exporter.
pub fn export_entry(
    ctx: &GeminiContext,
    session: &Session,
    index: usize,
    format: ExportFormat,
) -> Result<ExportedFile, AppError> {
    let exporter = PlainTextExporter::new(ctx.config().document.institution.as_str());
    commands::export(ctx, session, index, format, &exporter)
}
